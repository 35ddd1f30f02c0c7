use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use food_core::{
    Food, FoodEnvelope, FoodPatch, MessageEnvelope, NewFood,
};
use tracing::info;

use crate::{error::AppError, state::AppState};

pub async fn list_foods(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Food>>, AppError> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Food>, AppError> {
    state.store.get(id).await?.map(Json).ok_or(AppError::NotFound)
}

pub async fn create_food(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewFood>,
) -> Result<(StatusCode, Json<FoodEnvelope>), AppError> {
    let valid = payload.validate().map_err(AppError::Validation)?;

    let food = state.store.insert(&valid).await?;
    info!("Created food {}", food.id);

    Ok((
        StatusCode::CREATED,
        Json(FoodEnvelope {
            message: "Food created successfully!".to_string(),
            food,
        }),
    ))
}

pub async fn update_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<FoodPatch>,
) -> Result<Json<FoodEnvelope>, AppError> {
    // Look the record up first so an unknown id is never reported as a
    // validation failure.
    if state.store.get(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let patch = payload.validate().map_err(AppError::Validation)?;

    let food = state
        .store
        .update(id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    info!("Updated food {id}");

    Ok(Json(FoodEnvelope {
        message: "Food updated successfully!".to_string(),
        food,
    }))
}

pub async fn delete_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageEnvelope>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!("Deleted food {id}");

    Ok(Json(MessageEnvelope {
        message: "Food deleted successfully!".to_string(),
    }))
}
