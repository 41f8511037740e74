pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    SetCarStatusCommand, SetCarStatusError, SubmitCarCommand, SubmitCarError, SubmitCarResponse, SubmitOutcome,
};
pub use queries::{
    CarReferenceResponse, GetCarReferenceError, GetCarReferenceQuery, ListAcceptedCarsError,
    ListAcceptedCarsQuery,
};
pub use types::CarRecord;

pub use routes::cars_routes;
