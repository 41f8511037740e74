pub mod get;
pub mod list;

pub use get::{DriverProfile, DriverRaceResult, GetDriverError, GetDriverQuery, GetDriverResponse};
pub use list::{DriverListItem, DriverTotals, ListDriversError, ListDriversQuery, ListDriversResponse};
