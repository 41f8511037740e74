pub mod queries;
pub mod routes;

pub use queries::{
    CircuitDetail, CircuitListItem, CircuitRace, GetCircuitError, GetCircuitQuery,
    GetCircuitResponse, ListCircuitsError, ListCircuitsQuery, ListCircuitsResponse,
};

pub use routes::circuits_routes;
