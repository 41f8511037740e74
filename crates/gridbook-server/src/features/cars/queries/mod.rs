pub mod list_accepted;
pub mod reference;

pub use list_accepted::{ListAcceptedCarsError, ListAcceptedCarsQuery};
pub use reference::{CarReferenceResponse, GetCarReferenceError, GetCarReferenceQuery};
