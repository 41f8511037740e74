//! Driver and constructor career summaries
//!
//! A driver's team for a season is the team of that season's first race
//! (lowest round, then lowest result id). Seasons are then grouped by team
//! identity, so a driver who returns to a former team after time elsewhere
//! gets one entry for that team covering both stints. This grouping is the
//! established behaviour of the career view; do not split it into per-stint
//! ranges without a product decision.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Constructor identity as shown in career listings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamRef {
    pub constructor_id: i64,
    pub name: String,
}

/// One result row reduced to what the career summary needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerEntry {
    pub year: i32,
    pub round: i32,
    pub result_id: i64,
    pub team: TeamRef,
}

/// Seasons a driver spent with one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamTenure {
    pub team: TeamRef,
    /// Ascending, no duplicates
    pub seasons: Vec<i32>,
    /// "2019", "2019 - 2021" or "2023 - present"
    pub span: String,
}

/// Career summary for one driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CareerHistory {
    /// Ordered by each team's first season with the driver
    pub teams: Vec<TeamTenure>,
    /// Team of the driver's most recent season
    pub current_team: Option<TeamRef>,
}

impl CareerHistory {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Every season of the career, ascending
    pub fn seasons(&self) -> Vec<i32> {
        let mut seasons: Vec<i32> = self
            .teams
            .iter()
            .flat_map(|t| t.seasons.iter().copied())
            .collect();
        seasons.sort_unstable();
        seasons
    }
}

/// Distinct seasons a constructor competed in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonSpan {
    pub seasons: Vec<i32>,
    pub first: Option<i32>,
    pub last: Option<i32>,
    pub span: Option<String>,
}

/// Display label for a run of seasons
///
/// A run whose latest season is the current year is still open and reads
/// "{first} - present", even when it is a single season.
pub fn span_label(first: i32, last: i32, current_year: i32) -> String {
    if last == current_year {
        format!("{} - present", first)
    } else if first == last {
        format!("{}", first)
    } else {
        format!("{} - {}", first, last)
    }
}

/// Build a driver's team history from their results
///
/// Input order does not matter. No results yields an empty history.
pub fn driver_career<I>(entries: I, current_year: i32) -> CareerHistory
where
    I: IntoIterator<Item = CareerEntry>,
{
    let mut entries: Vec<CareerEntry> = entries.into_iter().collect();
    entries.sort_by_key(|e| (e.year, e.round, e.result_id));

    let mut season_team: BTreeMap<i32, TeamRef> = BTreeMap::new();
    for entry in entries {
        season_team.entry(entry.year).or_insert(entry.team);
    }

    let current_team = season_team.values().next_back().cloned();

    let mut teams: Vec<TeamTenure> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for (year, team) in season_team {
        match index.get(&team.constructor_id) {
            Some(&i) => teams[i].seasons.push(year),
            None => {
                index.insert(team.constructor_id, teams.len());
                teams.push(TeamTenure {
                    team,
                    seasons: vec![year],
                    span: String::new(),
                });
            },
        }
    }

    for tenure in &mut teams {
        // seasons were pushed in ascending year order
        if let (Some(&first), Some(&last)) = (tenure.seasons.first(), tenure.seasons.last()) {
            tenure.span = span_label(first, last, current_year);
        }
    }

    CareerHistory {
        teams,
        current_team,
    }
}

/// Summarize the seasons a constructor took part in
pub fn constructor_career<I>(years: I, current_year: i32) -> SeasonSpan
where
    I: IntoIterator<Item = i32>,
{
    let seasons: Vec<i32> = years.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    let first = seasons.first().copied();
    let last = seasons.last().copied();
    let span = first.zip(last).map(|(f, l)| span_label(f, l, current_year));

    SeasonSpan {
        seasons,
        first,
        last,
        span,
    }
}
