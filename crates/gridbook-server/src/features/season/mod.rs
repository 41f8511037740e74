pub mod queries;
pub mod routes;

pub use queries::{GetSeasonWinnersError, GetSeasonWinnersQuery, GetSeasonWinnersResponse, RaceWinner};

pub use routes::season_routes;
