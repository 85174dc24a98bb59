//! Reference data loader: the category and currency lookup tables, fetched
//! once per session and memoized.

use log::debug;
use shared::{Category, Currency};

use crate::services::api::{ApiError, LedgerApi};

/// Session-scoped cache of the read-only lookup sets.
///
/// Each resource tracks its own loaded flag: a successful fetch is never
/// repeated, a failed one leaves the resource unpopulated and is retried on
/// the next ensure call.
#[derive(Debug, Default)]
pub struct ReferenceData {
    categories: Vec<Category>,
    categories_loaded: bool,
    currency: Option<Currency>,
    currency_loaded: bool,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Display name for a category id, if the lookup set holds it.
    pub fn category_name(&self, category_id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.category_name.as_str())
    }

    /// Load the category set unless it is already present.
    pub async fn ensure_categories(&mut self, api: &dyn LedgerApi) -> Result<(), ApiError> {
        if self.categories_loaded {
            return Ok(());
        }
        let categories = api.list_categories().await?;
        debug!("loaded {} operation categories", categories.len());
        self.categories = categories;
        self.categories_loaded = true;
        Ok(())
    }

    /// Load the user's currency unless one is already present.
    pub async fn ensure_currency(
        &mut self,
        api: &dyn LedgerApi,
        currency_id: i64,
    ) -> Result<(), ApiError> {
        if self.currency_loaded {
            return Ok(());
        }
        let currency = api.get_currency(currency_id).await?;
        debug!("loaded currency {}", currency.currency_code);
        self.currency = Some(currency);
        self.currency_loaded = true;
        Ok(())
    }
}
