pub mod lookup;
pub mod results;

pub use lookup::{
    CircuitRecord, ConstructorRecord, DriverRecord, LookupError, LookupQuery, LookupResponse, RaceRecord,
    ReferenceEntity,
};
pub use results::{
    DriverResultsError, DriverResultsQuery, DriverResultsResponse, DriverSelector, ResultRecord,
    SeasonResultsQuery,
};
