use async_trait::async_trait;
use shared::{Category, CreateIncomeRequest, Currency, RecurringIncome, User};
use thiserror::Error;

/// Errors surfaced by the REST gateway.
///
/// Every failure stays distinguishable at this boundary; whether it is
/// swallowed, logged, or shown to the user is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, etc.).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The response body could not be decoded into the expected type.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// REST gateway to the remote ledger API.
///
/// The workflow only ever talks to the API through this trait. The browser
/// implementation lives in [`crate::services::http`]; tests substitute
/// in-memory doubles. Futures are not required to be `Send`: the whole
/// workflow runs on a single logical thread with operations awaited
/// sequentially, never fanned out.
#[async_trait(?Send)]
pub trait LedgerApi {
    /// GET `/operation-categories`
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// GET `/currency/{currencyId}`
    async fn get_currency(&self, currency_id: i64) -> Result<Currency, ApiError>;

    /// GET `/incomes/{userId}`
    async fn list_incomes(&self, user_id: i64) -> Result<Vec<RecurringIncome>, ApiError>;

    /// GET `/user/{userId}`
    async fn get_user(&self, user_id: i64) -> Result<User, ApiError>;

    /// POST `/incomes`. Only the status is consumed.
    async fn create_income(&self, request: &CreateIncomeRequest) -> Result<(), ApiError>;
}
