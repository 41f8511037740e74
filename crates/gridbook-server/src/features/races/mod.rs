pub mod queries;
pub mod routes;

pub use queries::{
    GetRaceError, GetRaceQuery, GetRaceResponse, GetRaceStandingsError, GetRaceStandingsQuery,
    GetRaceStandingsResponse, ListRacesError, ListRacesQuery, ListRacesResponse, RaceListItem,
    RaceResultRow, StandingRow,
};

pub use routes::races_routes;
