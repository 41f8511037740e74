pub mod queries;
pub mod routes;

pub use queries::{
    DriverListItem, DriverProfile, DriverRaceResult, DriverTotals, GetDriverError, GetDriverQuery,
    GetDriverResponse, ListDriversError, ListDriversQuery, ListDriversResponse,
};

pub use routes::drivers_routes;
