//! Client-side workflow core for the recurring income ledger.
//!
//! This crate holds everything the income view does apart from rendering:
//! loading reference data and the user's income list, validating the add-income
//! form, submitting new records, and reconciling the cached user profile after
//! a mutation. The HTTP transport and the session cache sit behind traits so
//! the workflow can run against the browser transport in production and
//! in-memory doubles in tests.

pub mod domain;
pub mod services;
pub mod workflow;

pub use domain::income_form::{IncomeForm, IncomeFormConfig, IncomeFormError};
pub use domain::income_view::IncomeCard;
pub use domain::reconcile::{reconcile, refresh_user, RefreshError};
pub use domain::reference_data::ReferenceData;
pub use services::api::{ApiError, LedgerApi};
#[cfg(target_arch = "wasm32")]
pub use services::http::HttpLedgerApi;
pub use services::session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use workflow::{LedgerWorkflow, SubmitOutcome, ViewState};

#[cfg(test)]
pub(crate) mod testing;
