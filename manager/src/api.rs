use async_trait::async_trait;
use food_core::{FieldErrors, Food, FoodPatch, NewFood};
use thiserror::Error;

/// Everything the resource API can report back. `NotFound` and `Validation`
/// come from the server; `Transport` is detected client-side and covers any
/// response the client cannot make sense of.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Food not found")]
    NotFound,

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Request failed: {0}")]
    Transport(String),
}

/// The five resource operations the manager dispatches.
#[async_trait]
pub trait FoodApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Food>, ApiError>;

    async fn get(&self, id: i64) -> Result<Food, ApiError>;

    async fn create(&self, food: &NewFood) -> Result<Food, ApiError>;

    async fn update(&self, id: i64, patch: &FoodPatch) -> Result<Food, ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}
