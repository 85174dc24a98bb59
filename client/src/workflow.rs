//! The income view workflow: session start, modal lifecycle, submission.
//!
//! State machine: `Idle -> LoadingReferenceData -> Ready`; `Ready ->
//! ModalOpen -> Submitting -> Ready` on success, or back to `ModalOpen` on
//! failure with the entered values intact. An unauthenticated session at any
//! point lands in `Redirected`, terminal for this view.

use log::{debug, info, warn};
use shared::{RecurringIncome, User};
use std::sync::Arc;

use crate::domain::income_form::{validate, IncomeForm, IncomeFormConfig, IncomeFormError};
use crate::domain::income_view::{build_income_cards, IncomeCard};
use crate::domain::reconcile::{refresh_user, RefreshError};
use crate::domain::reference_data::ReferenceData;
use crate::services::api::LedgerApi;
use crate::services::session::SessionStore;

/// User-facing message for an incomplete form.
pub const MSG_MISSING_FIELDS: &str = "Please fill in all required fields.";
/// User-facing message for a failed submission.
pub const MSG_SUBMIT_FAILED: &str = "Could not add income. Please try again.";

/// Where the view currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    LoadingReferenceData,
    Ready,
    ModalOpen,
    Submitting,
    /// Terminal: the caller must route to the login flow.
    Redirected,
}

/// What a submission attempt came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record created; profile reconciled and list reloaded.
    Created,
    /// Validation rejected the form; nothing was sent.
    Invalid,
    /// The server rejected the record; form left intact for another try.
    Failed,
    /// The session turned out to be unauthenticated.
    Redirected,
}

/// Orchestrates the recurring income view against the REST gateway and the
/// session store. All operations run sequentially on one logical thread;
/// nothing here fans out or races.
pub struct LedgerWorkflow {
    api: Arc<dyn LedgerApi>,
    store: Arc<dyn SessionStore>,
    reference: ReferenceData,
    form_config: IncomeFormConfig,
    state: ViewState,
    user: Option<User>,
    incomes: Vec<RecurringIncome>,
    form: IncomeForm,
    last_error: Option<String>,
}

impl LedgerWorkflow {
    pub fn new(api: Arc<dyn LedgerApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            reference: ReferenceData::new(),
            form_config: IncomeFormConfig::default(),
            state: ViewState::Idle,
            user: None,
            incomes: Vec::new(),
            form: IncomeForm::new(),
            last_error: None,
        }
    }

    /// Override the validation switches (e.g. enable date-order enforcement).
    pub fn with_form_config(mut self, form_config: IncomeFormConfig) -> Self {
        self.form_config = form_config;
        self
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn incomes(&self) -> &[RecurringIncome] {
        &self.incomes
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn form(&self) -> &IncomeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut IncomeForm {
        &mut self.form
    }

    /// Message to surface as a blocking alert, if the last action failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the view should show a progress indicator.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            ViewState::LoadingReferenceData | ViewState::Submitting
        )
    }

    /// The loaded income list prepared for display.
    pub fn income_cards(&self) -> Vec<IncomeCard> {
        build_income_cards(&self.incomes, &self.reference)
    }

    /// Session start: read the cached user, load reference data, then the
    /// income list. Reference failures are logged and skipped; a list
    /// failure leaves the list empty. No cached session redirects to login.
    pub async fn start(&mut self) {
        self.last_error = None;
        let cached = match self.store.load_user() {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("no cached session, redirecting to login");
                self.state = ViewState::Redirected;
                return;
            }
            Err(e) => {
                warn!("failed to read cached session: {e:#}");
                self.state = ViewState::Redirected;
                return;
            }
        };
        if !cached.is_authenticated() {
            info!("cached session has no user id, redirecting to login");
            self.state = ViewState::Redirected;
            return;
        }

        self.state = ViewState::LoadingReferenceData;
        let api = Arc::clone(&self.api);

        if let Err(e) = self.reference.ensure_categories(api.as_ref()).await {
            warn!("category lookup unavailable: {e}");
        }
        if let Some(currency_id) = cached.currency_id {
            if let Err(e) = self.reference.ensure_currency(api.as_ref(), currency_id).await {
                warn!("currency lookup unavailable: {e}");
            }
        }

        self.user = Some(cached);
        self.reload_incomes().await;
        self.state = ViewState::Ready;
    }

    /// Add-income intent: open the modal form.
    pub fn open_modal(&mut self) {
        if self.state == ViewState::Ready {
            self.state = ViewState::ModalOpen;
            self.last_error = None;
        }
    }

    /// Dismiss the modal. Entered fields are kept; only a successful
    /// submission clears them.
    pub fn close_modal(&mut self) {
        if self.state == ViewState::ModalOpen {
            self.state = ViewState::Ready;
        }
    }

    /// Validate and submit the form, then reconcile the cached profile and
    /// reload the income list, in that order.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.last_error = None;

        let Some(user) = self.user.clone() else {
            self.state = ViewState::Redirected;
            return SubmitOutcome::Redirected;
        };
        let Some(user_id) = user.id else {
            self.state = ViewState::Redirected;
            return SubmitOutcome::Redirected;
        };

        let request = match validate(&self.form, user_id, &self.form_config) {
            Ok(request) => request,
            Err(e) => {
                debug!("income form rejected: {e}");
                self.last_error = Some(match e {
                    IncomeFormError::MissingFields => MSG_MISSING_FIELDS.to_string(),
                    other => other.to_string(),
                });
                return SubmitOutcome::Invalid;
            }
        };

        self.state = ViewState::Submitting;
        let api = Arc::clone(&self.api);

        if let Err(e) = api.create_income(&request).await {
            warn!("income submission failed: {e}");
            self.last_error = Some(MSG_SUBMIT_FAILED.to_string());
            self.state = ViewState::ModalOpen;
            return SubmitOutcome::Failed;
        }
        info!(
            "created recurring income '{}' for user {}",
            request.description, user_id
        );

        match refresh_user(api.as_ref(), self.store.as_ref(), &user).await {
            Ok(merged) => self.user = Some(merged),
            Err(RefreshError::AuthRequired) => {
                self.state = ViewState::Redirected;
                return SubmitOutcome::Redirected;
            }
            // The record is in; a failed refresh only means the cached
            // profile stays one step behind.
            Err(RefreshError::Api(e)) => warn!("profile refresh failed: {e}"),
        }

        self.reload_incomes().await;
        self.form.reset();
        self.state = ViewState::Ready;
        SubmitOutcome::Created
    }

    async fn reload_incomes(&mut self) {
        let Some(user_id) = self.user.as_ref().and_then(|u| u.id) else {
            self.incomes.clear();
            return;
        };
        let api = Arc::clone(&self.api);
        match api.list_incomes(user_id).await {
            Ok(incomes) => {
                debug!("loaded {} recurring incomes", incomes.len());
                self.incomes = incomes;
            }
            Err(e) => {
                warn!("failed to load incomes: {e}");
                self.incomes.clear();
            }
        }
    }
}
