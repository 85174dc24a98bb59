//! Display view-models for the income list.
//!
//! Pure data preparation: the rendering layer consumes these cards without
//! touching domain records or the lookup sets.

use chrono::NaiveDate;
use shared::{Currency, RecurringIncome};

use crate::domain::reference_data::ReferenceData;

/// Shown when an income references a category missing from the lookup set.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One income record prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeCard {
    pub id: i64,
    pub description: String,
    pub formatted_amount: String,
    pub formatted_start: String,
    pub formatted_end: String,
    pub frequency_label: &'static str,
    pub category_name: String,
    pub repeat_count: u32,
}

/// Build display cards for the loaded income list.
pub fn build_income_cards(
    incomes: &[RecurringIncome],
    reference: &ReferenceData,
) -> Vec<IncomeCard> {
    incomes
        .iter()
        .map(|income| IncomeCard {
            id: income.id,
            description: income.description.clone(),
            formatted_amount: format_amount(income.amount, reference.currency()),
            formatted_start: format_date(income.start_date),
            formatted_end: format_date(income.end_date),
            frequency_label: income.frequency.label(),
            category_name: reference
                .category_name(income.operation_category_id)
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
            repeat_count: income.repeat_count,
        })
        .collect()
}

fn format_amount(amount: f64, currency: Option<&Currency>) -> String {
    match currency {
        Some(currency) => format!("{:.2} {}", amount, currency.currency_code),
        None => format!("{:.2}", amount),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_income, MockLedgerApi};

    async fn loaded_reference() -> ReferenceData {
        let api = MockLedgerApi::happy();
        let mut reference = ReferenceData::new();
        reference.ensure_categories(&api).await.unwrap();
        reference.ensure_currency(&api, 3).await.unwrap();
        reference
    }

    #[tokio::test]
    async fn test_card_carries_currency_code_and_category_name() {
        let reference = loaded_reference().await;
        let cards = build_income_cards(&[sample_income()], &reference);

        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.formatted_amount, "1500.00 USD");
        assert_eq!(card.category_name, "Salary");
        assert_eq!(card.frequency_label, "Monthly");
        assert_eq!(card.formatted_start, "March 1, 2026");
        assert_eq!(card.formatted_end, "December 31, 2026");
        assert_eq!(card.repeat_count, 10);
    }

    #[test]
    fn test_card_without_reference_data_falls_back() {
        let reference = ReferenceData::new();
        let cards = build_income_cards(&[sample_income()], &reference);

        let card = &cards[0];
        assert_eq!(card.formatted_amount, "1500.00");
        assert_eq!(card.category_name, UNCATEGORIZED);
    }

    #[tokio::test]
    async fn test_unknown_category_falls_back_even_when_loaded() {
        let reference = loaded_reference().await;
        let mut income = sample_income();
        income.operation_category_id = 999;

        let cards = build_income_cards(&[income], &reference);
        assert_eq!(cards[0].category_name, UNCATEGORIZED);
    }
}
