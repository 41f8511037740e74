pub mod get;
pub mod list;

pub use get::{GetTeamError, GetTeamQuery, GetTeamResponse, SeasonDriver, SeasonDrivers, TeamProfile};
pub use list::{ListTeamsError, ListTeamsQuery, ListTeamsResponse, TeamListItem, TeamTotals};
