//! # SQLite
//!
//! The record store. One `foods` table; the store assigns ids and owns both
//! timestamps.
//!
//! `AUTOINCREMENT` keeps deleted ids from ever being handed out again, so a
//! deleted record's id stays invalid for lookup forever.

use std::str::FromStr;

use chrono::Utc;
use food_core::{
    Food,
    validate::{ValidFood, ValidPatch},
};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS foods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    calories INTEGER NOT NULL,
    price REAL NOT NULL,
    available_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const COLUMNS: &str = "id, name, category, calories, price, available_date, created_at, updated_at";

/// Open the database and make sure the schema exists.
///
/// A single connection: in-memory databases live and die with their
/// connection, and one writer is all this store needs.
pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open database");

    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create foods table");

    pool
}

#[derive(Clone)]
pub struct FoodStore {
    pool: SqlitePool,
}

impl FoodStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Result<Vec<Food>, sqlx::Error> {
        sqlx::query_as::<_, Food>(&format!("SELECT {COLUMNS} FROM foods ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Food>, sqlx::Error> {
        sqlx::query_as::<_, Food>(&format!("SELECT {COLUMNS} FROM foods WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, food: &ValidFood) -> Result<Food, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Food>(&format!(
            "INSERT INTO foods (name, category, calories, price, available_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        ))
        .bind(&food.name)
        .bind(&food.category)
        .bind(food.calories)
        .bind(food.price)
        .bind(food.available_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    /// Overwrite the submitted fields in place and bump `updated_at`.
    /// Returns `None` when the id does not resolve.
    pub async fn update(&self, id: i64, patch: &ValidPatch) -> Result<Option<Food>, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Food>(&format!(
            "UPDATE foods SET
                name = COALESCE(?1, name),
                category = COALESCE(?2, category),
                calories = COALESCE(?3, calories),
                price = COALESCE(?4, price),
                available_date = COALESCE(?5, available_date),
                updated_at = ?6
             WHERE id = ?7
             RETURNING {COLUMNS}"
        ))
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(patch.calories)
        .bind(patch.price)
        .bind(patch.available_date)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns false when the id does not resolve.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM foods WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert the two canonical rows when the table is empty.
    pub async fn seed(&self) -> Result<(), sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            return Ok(());
        }

        let rows = [
            ("Tacos", "Mexican", 300, 95.0),
            ("Cheeseburger", "American", 750, 99.0),
        ];

        for (name, category, calories, price) in rows {
            self.insert(&ValidFood {
                name: name.to_string(),
                category: category.to_string(),
                calories,
                price,
                available_date: chrono::NaiveDate::from_ymd_opt(2025, 5, 18).unwrap(),
            })
            .await?;
        }

        info!("Seeded {} foods", rows.len());

        Ok(())
    }
}
