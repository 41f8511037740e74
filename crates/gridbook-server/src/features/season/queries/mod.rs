pub mod winners;

pub use winners::{GetSeasonWinnersError, GetSeasonWinnersQuery, GetSeasonWinnersResponse, RaceWinner};
