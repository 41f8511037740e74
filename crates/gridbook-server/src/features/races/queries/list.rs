use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::aggregate::listing::{group_races_by_year, SeasonGroup, Seasonal};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRacesQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceListItem {
    pub race_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
    pub race_date: NaiveDate,
    pub circuit_id: i64,
    pub circuit_name: String,
    pub country: String,
}

impl Seasonal for RaceListItem {
    fn season(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRacesResponse {
    pub total_races: i64,
    pub total_seasons: i64,
    pub total_circuits: i64,
    pub latest_year: Option<i32>,
    /// Newest season first
    pub seasons: Vec<SeasonGroup<RaceListItem>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListRacesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListRacesResponse, ListRacesError>> for ListRacesQuery {}

impl crate::cqrs::middleware::Query for ListRacesQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, _query: ListRacesQuery) -> Result<ListRacesResponse, ListRacesError> {
    let races = sqlx::query_as::<_, RaceListItem>(
        r#"
        SELECT ra.race_id, ra.year, ra.round, ra.name, ra.race_date,
               c.circuit_id, c.name AS circuit_name, c.country
        FROM races ra
        JOIN circuits c ON c.circuit_id = ra.circuit_id
        ORDER BY ra.race_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let (total_races, total_seasons, total_circuits, latest_year): (i64, i64, i64, Option<i32>) =
        sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(DISTINCT year), COUNT(DISTINCT circuit_id), MAX(year)
            FROM races
            "#,
        )
        .fetch_one(&pool)
        .await?;

    Ok(ListRacesResponse {
        total_races,
        total_seasons,
        total_circuits,
        latest_year,
        seasons: group_races_by_year(races),
    })
}
