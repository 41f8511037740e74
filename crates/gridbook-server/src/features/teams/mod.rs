pub mod queries;
pub mod routes;

pub use queries::{
    GetTeamError, GetTeamQuery, GetTeamResponse, ListTeamsError, ListTeamsQuery, ListTeamsResponse,
    SeasonDriver, SeasonDrivers, TeamListItem, TeamProfile, TeamTotals,
};

pub use routes::teams_routes;
