//! Pure summarisation over rows already loaded from the store
//!
//! Nothing in here touches the database or HTTP; feature queries load rows,
//! then hand them to these functions.

pub mod career;
pub mod listing;

pub use career::{constructor_career, driver_career, CareerEntry, CareerHistory, SeasonSpan, TeamRef};
pub use listing::{filter_by_search, group_races_by_year, paginate, Page, PageInfo, SeasonGroup, Searchable, Seasonal};
