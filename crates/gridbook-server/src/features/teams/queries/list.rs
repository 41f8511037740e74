use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::aggregate::career::constructor_career;
use crate::aggregate::listing::{filter_by_search, PageInfo, Searchable};
use crate::features::shared::pagination::PaginationParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTeamsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
    /// Filled from configuration by the route
    #[serde(skip)]
    pub current_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamListItem {
    pub constructor_id: i64,
    pub name: String,
    pub nationality: String,
    pub first_season: Option<i32>,
    pub last_season: Option<i32>,
    pub span: Option<String>,
}

impl Searchable for TeamListItem {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTotals {
    pub teams: usize,
    pub nationalities: i64,
    /// Teams with at least one result in the current season
    pub active_teams: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub items: Vec<TeamListItem>,
    pub pagination: PageInfo,
    pub totals: TeamTotals,
}

#[derive(Debug, thiserror::Error)]
pub enum ListTeamsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListTeamsResponse, ListTeamsError>> for ListTeamsQuery {}

impl crate::cqrs::middleware::Query for ListTeamsQuery {}

#[derive(Debug, sqlx::FromRow)]
struct TeamRecord {
    constructor_id: i64,
    name: String,
    nationality: String,
    years: Vec<i32>,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListTeamsQuery) -> Result<ListTeamsResponse, ListTeamsError> {
    let records = sqlx::query_as::<_, TeamRecord>(
        r#"
        SELECT c.constructor_id, c.name, c.nationality,
               COALESCE(
                   ARRAY_AGG(DISTINCT ra.year) FILTER (WHERE ra.year IS NOT NULL),
                   '{}'
               ) AS years
        FROM constructors c
        LEFT JOIN results r ON r.constructor_id = c.constructor_id
        LEFT JOIN races ra ON ra.race_id = r.race_id
        GROUP BY c.constructor_id, c.name, c.nationality
        ORDER BY c.name, c.constructor_id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let teams: Vec<TeamListItem> = records
        .into_iter()
        .map(|r| {
            let career = constructor_career(r.years, query.current_year);
            TeamListItem {
                constructor_id: r.constructor_id,
                name: r.name,
                nationality: r.nationality,
                first_season: career.first,
                last_season: career.last,
                span: career.span,
            }
        })
        .collect();

    let (nationalities, active_teams): (i64, i64) = sqlx::query_as(
        r#"
        SELECT (SELECT COUNT(DISTINCT nationality) FROM constructors),
               (SELECT COUNT(DISTINCT r.constructor_id)
                FROM results r
                JOIN races ra ON ra.race_id = r.race_id
                WHERE ra.year = $1)
        "#,
    )
    .bind(query.current_year)
    .fetch_one(&pool)
    .await?;

    let matching = filter_by_search(teams, query.search.as_deref());
    let total_teams = matching.len();
    let page = query.pagination.apply(matching);

    Ok(ListTeamsResponse {
        items: page.items,
        pagination: page.info,
        totals: TeamTotals {
            teams: total_teams,
            nationalities,
            active_teams,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_season_bounds_and_active_count(pool: PgPool) -> sqlx::Result<()> {
        let monza = TestCircuit::new("monza", "Monza", "Italy").insert(&pool).await?;
        let r2010 = TestRace::new(monza, 2010, 14, "Italian Grand Prix").insert(&pool).await?;
        let r2012 = TestRace::new(monza, 2012, 13, "Italian Grand Prix").insert(&pool).await?;
        let r2025 = TestRace::new(monza, 2025, 16, "Italian Grand Prix").insert(&pool).await?;

        let williams = insert_constructor(&pool, "Williams", "British").await?;
        let ferrari = insert_constructor(&pool, "Ferrari", "Italian").await?;
        insert_constructor(&pool, "Brabham", "British").await?;
        let driver = TestDriver::new("Test", "Driver", "British").insert(&pool).await?;

        TestResult::new(r2010, driver, williams, "8").insert(&pool).await?;
        TestResult::new(r2012, driver, williams, "9").insert(&pool).await?;
        TestResult::new(r2025, driver, ferrari, "1").insert(&pool).await?;

        let query = ListTeamsQuery {
            current_year: 2025,
            ..Default::default()
        };
        let response = handle(pool, query).await.unwrap();

        let names: Vec<&str> = response.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Brabham", "Ferrari", "Williams"]);

        let brabham = &response.items[0];
        assert_eq!((brabham.first_season, brabham.last_season), (None, None));

        let williams = &response.items[2];
        assert_eq!((williams.first_season, williams.last_season), (Some(2010), Some(2012)));
        assert_eq!(williams.span.as_deref(), Some("2010 - 2012"));
        assert_eq!(response.items[1].span.as_deref(), Some("2025 - present"));

        assert_eq!(response.totals.teams, 3);
        assert_eq!(response.totals.nationalities, 2);
        assert_eq!(response.totals.active_teams, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_name_search(pool: PgPool) -> sqlx::Result<()> {
        insert_constructor(&pool, "Red Bull", "Austrian").await?;
        insert_constructor(&pool, "RB F1 Team", "Italian").await?;
        insert_constructor(&pool, "McLaren", "British").await?;

        let query = ListTeamsQuery {
            search: Some("red".to_string()),
            current_year: 2025,
            ..Default::default()
        };
        let response = handle(pool, query).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].name, "Red Bull");
        assert_eq!(response.totals.teams, 1);
        assert_eq!(response.totals.nationalities, 3);
        Ok(())
    }
}
