pub mod queries;
pub mod routes;

pub use queries::{
    DriverResultsError, DriverResultsQuery, DriverResultsResponse, DriverSelector, LookupError, LookupQuery,
    LookupResponse, ReferenceEntity, SeasonResultsQuery,
};

pub use routes::reference_routes;
