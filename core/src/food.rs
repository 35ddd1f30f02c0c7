//! # Food Record
//!
//! The persisted entity. The store assigns `id` and both timestamps;
//! clients never set them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub calories: i64,
    pub price: f64,
    pub available_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
