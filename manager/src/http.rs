use async_trait::async_trait;
use food_core::{
    Food, FoodPatch, NewFood,
    payloads::{FoodEnvelope, MessageEnvelope, ValidationEnvelope},
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, FoodApi};

/// [`FoodApi`] over HTTP. Maps 404 to `NotFound`, 422 to `Validation` with
/// the server's per-field reasons, and everything else unexpected to
/// `Transport`.
pub struct HttpFoodApi {
    client: Client,
    base_url: String,
}

impl HttpFoodApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let envelope: ValidationEnvelope = response
                    .json()
                    .await
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                Err(ApiError::Validation(envelope.errors))
            }
            _ if status.is_success() => response
                .json()
                .await
                .map_err(|e| ApiError::Transport(e.to_string())),
            _ => Err(ApiError::Transport(format!("Unexpected status {status}"))),
        }
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[async_trait]
impl FoodApi for HttpFoodApi {
    async fn list(&self) -> Result<Vec<Food>, ApiError> {
        let response = self
            .client
            .get(self.url("/food"))
            .send()
            .await
            .map_err(transport)?;

        Self::handle(response).await
    }

    async fn get(&self, id: i64) -> Result<Food, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/food/{id}")))
            .send()
            .await
            .map_err(transport)?;

        Self::handle(response).await
    }

    async fn create(&self, food: &NewFood) -> Result<Food, ApiError> {
        let response = self
            .client
            .post(self.url("/food"))
            .json(food)
            .send()
            .await
            .map_err(transport)?;

        let envelope: FoodEnvelope = Self::handle(response).await?;
        Ok(envelope.food)
    }

    async fn update(&self, id: i64, patch: &FoodPatch) -> Result<Food, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/food/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;

        let envelope: FoodEnvelope = Self::handle(response).await?;
        Ok(envelope.food)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/food/{id}")))
            .send()
            .await
            .map_err(transport)?;

        let _: MessageEnvelope = Self::handle(response).await?;
        Ok(())
    }
}
