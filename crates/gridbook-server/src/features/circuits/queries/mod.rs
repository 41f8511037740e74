pub mod get;
pub mod list;

pub use get::{CircuitDetail, CircuitRace, GetCircuitError, GetCircuitQuery, GetCircuitResponse};
pub use list::{CircuitListItem, ListCircuitsError, ListCircuitsQuery, ListCircuitsResponse};
