//! Test helpers and fixtures for database tests
//!
//! Builders for the Formula 1 reference tables so handler tests can lay out
//! a small season in a few lines.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gridbook_server::features::shared::test_helpers::*;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let monza = TestCircuit::new("monza", "Autodromo Nazionale di Monza", "Italy")
//!         .insert(&pool)
//!         .await?;
//!     let race = TestRace::new(monza, 2024, 16, "Italian Grand Prix").insert(&pool).await?;
//!     // ... test logic ...
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use sqlx::PgPool;

/// Builder for circuits
#[derive(Debug, Clone)]
pub struct TestCircuit {
    pub ref_name: String,
    pub name: String,
    pub location: String,
    pub country: String,
}

impl TestCircuit {
    pub fn new(ref_name: &str, name: &str, country: &str) -> Self {
        Self {
            ref_name: ref_name.to_string(),
            name: name.to_string(),
            location: ref_name.to_string(),
            country: country.to_string(),
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            "INSERT INTO circuits (ref_name, name, location, country)
             VALUES ($1, $2, $3, $4) RETURNING circuit_id",
        )
        .bind(self.ref_name)
        .bind(self.name)
        .bind(self.location)
        .bind(self.country)
        .fetch_one(pool)
        .await
    }
}

/// Builder for drivers
#[derive(Debug, Clone)]
pub struct TestDriver {
    pub ref_name: String,
    pub number: i16,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
}

impl TestDriver {
    pub fn new(first_name: &str, last_name: &str, nationality: &str) -> Self {
        let ref_name = last_name.to_lowercase();
        let code: String = last_name.chars().take(3).collect::<String>().to_uppercase();
        Self {
            ref_name,
            number: 0,
            code,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            nationality: nationality.to_string(),
        }
    }

    pub fn with_number(mut self, number: i16) -> Self {
        self.number = number;
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        let dob = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default();
        sqlx::query_scalar(
            "INSERT INTO drivers (ref_name, number, code, first_name, last_name, date_of_birth, nationality)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING driver_id",
        )
        .bind(self.ref_name)
        .bind(self.number)
        .bind(self.code)
        .bind(self.first_name)
        .bind(self.last_name)
        .bind(dob)
        .bind(self.nationality)
        .fetch_one(pool)
        .await
    }
}

pub async fn insert_constructor(pool: &PgPool, name: &str, nationality: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO constructors (ref_name, name, nationality) VALUES ($1, $2, $3)
         RETURNING constructor_id",
    )
    .bind(name.to_lowercase().replace(' ', "_"))
    .bind(name)
    .bind(nationality)
    .fetch_one(pool)
    .await
}

/// Builder for races
#[derive(Debug, Clone)]
pub struct TestRace {
    pub circuit_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
}

impl TestRace {
    pub fn new(circuit_id: i64, year: i32, round: i32, name: &str) -> Self {
        Self {
            circuit_id,
            year,
            round,
            name: name.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        let race_date = NaiveDate::from_ymd_opt(self.year, 3, 1)
            .and_then(|d| d.checked_add_days(chrono::Days::new((self.round as u64) * 14)))
            .unwrap_or_default();
        sqlx::query_scalar(
            "INSERT INTO races (circuit_id, year, round, name, race_date)
             VALUES ($1, $2, $3, $4, $5) RETURNING race_id",
        )
        .bind(self.circuit_id)
        .bind(self.year)
        .bind(self.round)
        .bind(self.name)
        .bind(race_date)
        .fetch_one(pool)
        .await
    }
}

/// Builder for race results
#[derive(Debug, Clone)]
pub struct TestResult {
    pub race_id: i64,
    pub driver_id: i64,
    pub constructor_id: i64,
    pub grid: i16,
    pub final_position: String,
    pub points: i16,
}

impl TestResult {
    pub fn new(race_id: i64, driver_id: i64, constructor_id: i64, final_position: &str) -> Self {
        Self {
            race_id,
            driver_id,
            constructor_id,
            grid: 1,
            final_position: final_position.to_string(),
            points: 0,
        }
    }

    pub fn with_grid(mut self, grid: i16) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_points(mut self, points: i16) -> Self {
        self.points = points;
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            "INSERT INTO results (race_id, driver_id, constructor_id, car_number,
                starting_grid_position, final_position, points, laps, time,
                fastest_lap, top_speed_of_fl)
             VALUES ($1, $2, $3, 0, $4, $5, $6, 57, NULL, INTERVAL '1 minute 32.5 seconds', 310.2)
             RETURNING result_id",
        )
        .bind(self.race_id)
        .bind(self.driver_id)
        .bind(self.constructor_id)
        .bind(self.grid)
        .bind(self.final_position)
        .bind(self.points)
        .fetch_one(pool)
        .await
    }
}
