pub mod queries;
pub mod routes;

pub use queries::{
    DecodeVinError, DecodeVinQuery, DecodeVinResponse, SearchModelsError, SearchModelsQuery,
    SearchModelsResponse,
};

pub use routes::vehicles_routes;
