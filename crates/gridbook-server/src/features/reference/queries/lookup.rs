//! Filtered lookups over the Formula 1 reference tables
//!
//! Each entity carries its own allowlist of query keys. A request with no
//! recognised key returns nothing unless the caller asked for every row.

use chrono::{NaiveDate, NaiveTime};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

use crate::features::shared::filters::{push_filters, select_filters, FieldFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceEntity {
    Drivers,
    Circuits,
    Races,
    Constructors,
}

const DRIVER_FILTERS: &[FieldFilter] = &[
    FieldFilter::substring("name", &["first_name || ' ' || last_name"]),
    FieldFilter::substring("nationality", &["nationality"]),
    FieldFilter::exact("number", &["number"]),
];

const CIRCUIT_FILTERS: &[FieldFilter] = &[
    FieldFilter::substring("name", &["name", "ref_name"]),
    FieldFilter::substring("location", &["location"]),
    FieldFilter::substring("country", &["country"]),
];

const RACE_FILTERS: &[FieldFilter] = &[
    FieldFilter::substring("name", &["name"]),
    FieldFilter::exact("year", &["year"]),
    FieldFilter::substring("date", &["race_date::text"]),
];

const CONSTRUCTOR_FILTERS: &[FieldFilter] = &[
    FieldFilter::substring("name", &["name"]),
    FieldFilter::substring("nationality", &["nationality"]),
];

impl ReferenceEntity {
    /// Query keys this entity understands
    pub fn allowlist(self) -> &'static [FieldFilter] {
        match self {
            Self::Drivers => DRIVER_FILTERS,
            Self::Circuits => CIRCUIT_FILTERS,
            Self::Races => RACE_FILTERS,
            Self::Constructors => CONSTRUCTOR_FILTERS,
        }
    }

    fn select_sql(self) -> &'static str {
        match self {
            Self::Drivers => {
                "SELECT driver_id, ref_name, number, code, first_name, last_name, \
                 date_of_birth, nationality FROM drivers"
            },
            Self::Circuits => {
                "SELECT circuit_id, ref_name, name, location, country, latitude, longitude, \
                 altitude FROM circuits"
            },
            Self::Races => {
                "SELECT race_id, circuit_id, year, round, name, race_date, race_time FROM races"
            },
            Self::Constructors => {
                "SELECT constructor_id, ref_name, name, nationality FROM constructors"
            },
        }
    }

    fn order_sql(self) -> &'static str {
        match self {
            Self::Drivers => " ORDER BY driver_id",
            Self::Circuits => " ORDER BY circuit_id",
            Self::Races => " ORDER BY year, round, race_id",
            Self::Constructors => " ORDER BY constructor_id",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverRecord {
    pub driver_id: i64,
    pub ref_name: String,
    pub number: i16,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CircuitRecord {
    pub circuit_id: i64,
    pub ref_name: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RaceRecord {
    pub race_id: i64,
    pub circuit_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
    pub race_date: NaiveDate,
    pub race_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConstructorRecord {
    pub constructor_id: i64,
    pub ref_name: String,
    pub name: String,
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupQuery {
    pub entity: ReferenceEntity,
    pub filters: HashMap<String, String>,
    /// Return every row when no recognised filter is present
    pub include_all: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Drivers(Vec<DriverRecord>),
    Circuits(Vec<CircuitRecord>),
    Races(Vec<RaceRecord>),
    Constructors(Vec<ConstructorRecord>),
}

impl LookupResponse {
    fn empty(entity: ReferenceEntity) -> Self {
        match entity {
            ReferenceEntity::Drivers => Self::Drivers(Vec::new()),
            ReferenceEntity::Circuits => Self::Circuits(Vec::new()),
            ReferenceEntity::Races => Self::Races(Vec::new()),
            ReferenceEntity::Constructors => Self::Constructors(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Drivers(rows) => rows.len(),
            Self::Circuits(rows) => rows.len(),
            Self::Races(rows) => rows.len(),
            Self::Constructors(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<LookupResponse, LookupError>> for LookupQuery {}

impl crate::cqrs::middleware::Query for LookupQuery {}

async fn fetch<T>(
    pool: &PgPool,
    entity: ReferenceEntity,
    selected: &[(&FieldFilter, String)],
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut builder = QueryBuilder::<Postgres>::new(entity.select_sql());
    push_filters(&mut builder, selected);
    builder.push(entity.order_sql());
    builder.build_query_as::<T>().fetch_all(pool).await
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: LookupQuery) -> Result<LookupResponse, LookupError> {
    let selected = select_filters(query.entity.allowlist(), &query.filters);

    if selected.is_empty() && !query.include_all {
        tracing::debug!(entity = ?query.entity, "No recognised filter, returning nothing");
        return Ok(LookupResponse::empty(query.entity));
    }

    let response = match query.entity {
        ReferenceEntity::Drivers => LookupResponse::Drivers(fetch(&pool, query.entity, &selected).await?),
        ReferenceEntity::Circuits => LookupResponse::Circuits(fetch(&pool, query.entity, &selected).await?),
        ReferenceEntity::Races => LookupResponse::Races(fetch(&pool, query.entity, &selected).await?),
        ReferenceEntity::Constructors => {
            LookupResponse::Constructors(fetch(&pool, query.entity, &selected).await?)
        },
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn lookup(entity: ReferenceEntity, pairs: &[(&str, &str)], include_all: bool) -> LookupQuery {
        LookupQuery {
            entity,
            filters: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            include_all,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_driver_filters_combine(pool: PgPool) -> sqlx::Result<()> {
        TestDriver::new("Lewis", "Hamilton", "British").with_number(44).insert(&pool).await?;
        TestDriver::new("George", "Russell", "British").with_number(63).insert(&pool).await?;
        TestDriver::new("Max", "Verstappen", "Dutch").with_number(1).insert(&pool).await?;

        let by_nationality = handle(
            pool.clone(),
            lookup(ReferenceEntity::Drivers, &[("nationality", "brit")], false),
        )
        .await
        .unwrap();
        assert_eq!(by_nationality.len(), 2);

        let combined = handle(
            pool.clone(),
            lookup(ReferenceEntity::Drivers, &[("nationality", "british"), ("number", "63")], false),
        )
        .await
        .unwrap();
        match combined {
            LookupResponse::Drivers(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].last_name, "Russell");
            },
            other => panic!("unexpected response {:?}", other),
        }

        let full_name = handle(pool, lookup(ReferenceEntity::Drivers, &[("name", "max verst")], false))
            .await
            .unwrap();
        assert_eq!(full_name.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unknown_keys_return_nothing(pool: PgPool) -> sqlx::Result<()> {
        insert_constructor(&pool, "Ferrari", "Italian").await?;

        let response = handle(
            pool.clone(),
            lookup(ReferenceEntity::Constructors, &[("colour", "red"), ("name", "  ")], false),
        )
        .await
        .unwrap();
        assert!(response.is_empty());

        let all = handle(pool, lookup(ReferenceEntity::Constructors, &[("colour", "red")], true))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_circuit_name_matches_ref_name(pool: PgPool) -> sqlx::Result<()> {
        TestCircuit::new("spa", "Circuit de Spa-Francorchamps", "Belgium").insert(&pool).await?;
        TestCircuit::new("monza", "Autodromo Nazionale di Monza", "Italy").insert(&pool).await?;

        let response = handle(pool, lookup(ReferenceEntity::Circuits, &[("name", "SPA")], false))
            .await
            .unwrap();
        assert_eq!(response.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_race_year_is_exact(pool: PgPool) -> sqlx::Result<()> {
        let monza = TestCircuit::new("monza", "Monza", "Italy").insert(&pool).await?;
        TestRace::new(monza, 2023, 14, "Italian Grand Prix").insert(&pool).await?;
        TestRace::new(monza, 2024, 16, "Italian Grand Prix").insert(&pool).await?;

        let response = handle(pool.clone(), lookup(ReferenceEntity::Races, &[("year", "2024")], false))
            .await
            .unwrap();
        assert_eq!(response.len(), 1);

        let partial = handle(pool, lookup(ReferenceEntity::Races, &[("year", "202")], false))
            .await
            .unwrap();
        assert!(partial.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_like_metacharacters_are_literal(pool: PgPool) -> sqlx::Result<()> {
        insert_constructor(&pool, "Williams", "British").await?;

        let response = handle(pool, lookup(ReferenceEntity::Constructors, &[("name", "%")], false))
            .await
            .unwrap();
        assert!(response.is_empty());
        Ok(())
    }
}
