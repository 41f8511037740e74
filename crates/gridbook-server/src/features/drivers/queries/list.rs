use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::aggregate::career::TeamRef;
use crate::aggregate::listing::{filter_by_search, PageInfo, Searchable};
use crate::features::shared::pagination::PaginationParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDriversQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverListItem {
    pub driver_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub code: String,
    pub number: i16,
    pub nationality: String,
    /// Team of the driver's most recent season
    pub latest_team: Option<TeamRef>,
}

impl Searchable for DriverListItem {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.nationality.clone(),
            self.number.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverTotals {
    pub teams: i64,
    pub nationalities: i64,
    /// Drivers matching the search, across all pages
    pub drivers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListDriversResponse {
    pub items: Vec<DriverListItem>,
    pub pagination: PageInfo,
    pub totals: DriverTotals,
}

#[derive(Debug, thiserror::Error)]
pub enum ListDriversError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListDriversResponse, ListDriversError>> for ListDriversQuery {}

impl crate::cqrs::middleware::Query for ListDriversQuery {}

#[derive(Debug, sqlx::FromRow)]
struct DriverRecord {
    driver_id: i64,
    first_name: String,
    last_name: String,
    code: String,
    number: i16,
    nationality: String,
    team_id: Option<i64>,
    team_name: Option<String>,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListDriversQuery,
) -> Result<ListDriversResponse, ListDriversError> {
    // latest season first, then that season's opening race
    let records = sqlx::query_as::<_, DriverRecord>(
        r#"
        SELECT d.driver_id, d.first_name, d.last_name, d.code, d.number, d.nationality,
               lt.constructor_id AS team_id, lt.name AS team_name
        FROM drivers d
        LEFT JOIN LATERAL (
            SELECT c.constructor_id, c.name
            FROM results r
            JOIN races ra ON ra.race_id = r.race_id
            JOIN constructors c ON c.constructor_id = r.constructor_id
            WHERE r.driver_id = d.driver_id
            ORDER BY ra.year DESC, ra.round ASC, r.result_id ASC
            LIMIT 1
        ) lt ON TRUE
        ORDER BY d.last_name, d.first_name, d.driver_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let drivers: Vec<DriverListItem> = records
        .into_iter()
        .map(|r| DriverListItem {
            driver_id: r.driver_id,
            first_name: r.first_name,
            last_name: r.last_name,
            code: r.code,
            number: r.number,
            nationality: r.nationality,
            latest_team: r.team_id.zip(r.team_name).map(|(constructor_id, name)| TeamRef {
                constructor_id,
                name,
            }),
        })
        .collect();

    let (teams, nationalities): (i64, i64) = sqlx::query_as(
        r#"
        SELECT (SELECT COUNT(*) FROM constructors),
               (SELECT COUNT(DISTINCT nationality) FROM drivers)
        "#,
    )
    .fetch_one(&pool)
    .await?;

    let matching = filter_by_search(drivers, query.search.as_deref());
    let total = matching.len();
    let page = query.pagination.apply(matching);

    Ok(ListDriversResponse {
        items: page.items,
        pagination: page.info,
        totals: DriverTotals {
            teams,
            nationalities,
            drivers: total,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    async fn seed(pool: &PgPool) -> sqlx::Result<(i64, i64)> {
        let monza = TestCircuit::new("monza", "Monza", "Italy").insert(pool).await?;
        let r2023 = TestRace::new(monza, 2023, 14, "Italian Grand Prix").insert(pool).await?;
        let r2024 = TestRace::new(monza, 2024, 16, "Italian Grand Prix").insert(pool).await?;
        let mercedes = insert_constructor(pool, "Mercedes", "German").await?;
        let ferrari = insert_constructor(pool, "Ferrari", "Italian").await?;

        let ham = TestDriver::new("Lewis", "Hamilton", "British")
            .with_number(44)
            .insert(pool)
            .await?;
        TestDriver::new("Lando", "Norris", "British").with_number(4).insert(pool).await?;
        TestDriver::new("Max", "Verstappen", "Dutch").with_number(1).insert(pool).await?;

        TestResult::new(r2023, ham, mercedes, "6").insert(pool).await?;
        TestResult::new(r2024, ham, ferrari, "5").insert(pool).await?;
        Ok((ham, ferrari))
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_lists_with_latest_team(pool: PgPool) -> sqlx::Result<()> {
        let (ham, ferrari) = seed(&pool).await?;

        let response = handle(pool, ListDriversQuery::default()).await.unwrap();

        let names: Vec<&str> = response.items.iter().map(|d| d.last_name.as_str()).collect();
        assert_eq!(names, vec!["Hamilton", "Norris", "Verstappen"]);

        let hamilton = response.items.iter().find(|d| d.driver_id == ham).unwrap();
        assert_eq!(hamilton.latest_team.as_ref().map(|t| t.constructor_id), Some(ferrari));
        assert!(response.items[1].latest_team.is_none());

        assert_eq!(response.totals.teams, 2);
        assert_eq!(response.totals.nationalities, 2);
        assert_eq!(response.totals.drivers, 3);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_search_and_paginate(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;

        let query = ListDriversQuery {
            search: Some("british".to_string()),
            pagination: PaginationParams::new(Some("2"), Some("1")),
        };
        let response = handle(pool, query).await.unwrap();

        assert_eq!(response.totals.drivers, 2);
        assert_eq!(response.pagination.pages, 2);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].last_name, "Norris");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_number_zero_is_searchable(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        TestDriver::new("Nino", "Farina", "Italian").with_number(0).insert(&pool).await?;

        let query = ListDriversQuery {
            search: Some("0".to_string()),
            ..Default::default()
        };
        let response = handle(pool, query).await.unwrap();

        assert_eq!(response.totals.drivers, 1);
        assert_eq!(response.items[0].last_name, "Farina");
        Ok(())
    }
}
