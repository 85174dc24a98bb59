use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{Category, CreateIncomeRequest, Currency, RecurringIncome, User};

use crate::services::api::{ApiError, LedgerApi};

/// Browser HTTP implementation of [`LedgerApi`].
#[derive(Clone)]
pub struct HttpLedgerApi {
    base_url: String,
}

impl HttpLedgerApi {
    /// Create a client against the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a client against a custom base URL (no trailing slash).
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for HttpLedgerApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl LedgerApi for HttpLedgerApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/operation-categories").await
    }

    async fn get_currency(&self, currency_id: i64) -> Result<Currency, ApiError> {
        self.get_json(&format!("/currency/{}", currency_id)).await
    }

    async fn list_incomes(&self, user_id: i64) -> Result<Vec<RecurringIncome>, ApiError> {
        self.get_json(&format!("/incomes/{}", user_id)).await
    }

    async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.get_json(&format!("/user/{}", user_id)).await
    }

    async fn create_income(&self, request: &CreateIncomeRequest) -> Result<(), ApiError> {
        let url = format!("{}/incomes", self.base_url);
        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}
