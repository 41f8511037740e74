pub mod get;
pub mod list;
pub mod standings;

pub use get::{GetRaceError, GetRaceQuery, GetRaceResponse, RaceCircuit, RaceDetail, RaceResultRow};
pub use list::{ListRacesError, ListRacesQuery, ListRacesResponse, RaceListItem};
pub use standings::{GetRaceStandingsError, GetRaceStandingsQuery, GetRaceStandingsResponse, StandingRow};
