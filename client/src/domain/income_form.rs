//! Add-income form state and validation.

use chrono::NaiveDate;
use shared::{CreateIncomeRequest, Frequency};
use thiserror::Error;

/// Raw form fields exactly as typed. All seven are required.
///
/// Fields survive a failed submission untouched; they are cleared only by
/// [`IncomeForm::reset`] after the record has been created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeForm {
    pub amount: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub frequency: String,
    pub category: String,
    pub repeat_count: String,
}

impl IncomeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field, as after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validation failures for the add-income form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncomeFormError {
    /// Aggregate signal: at least one required field is empty.
    #[error("please fill in all required fields")]
    MissingFields,
    #[error("amount is not a number: {0}")]
    InvalidAmount(String),
    #[error("repeat count is not a whole number: {0}")]
    InvalidRepeatCount(String),
    #[error("date must be YYYY-MM-DD: {0}")]
    InvalidDate(String),
    #[error("unknown frequency: {0}")]
    InvalidFrequency(String),
    #[error("category selection is not valid: {0}")]
    InvalidCategory(String),
    #[error("end date falls before start date")]
    EndBeforeStart,
}

/// Validation switches.
///
/// `enforce_date_order` is off by default: the income view has always
/// accepted an end date before the start date. Enabling the switch rejects
/// such ranges with [`IncomeFormError::EndBeforeStart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeFormConfig {
    pub enforce_date_order: bool,
}

impl Default for IncomeFormConfig {
    fn default() -> Self {
        Self {
            enforce_date_order: false,
        }
    }
}

/// Check completeness, coerce the numeric and date fields, and build the POST
/// body for the given user.
///
/// No range checks beyond parsing: a negative amount passes through, the
/// server being the authority on business limits.
pub fn validate(
    form: &IncomeForm,
    user_id: i64,
    config: &IncomeFormConfig,
) -> Result<CreateIncomeRequest, IncomeFormError> {
    let amount_raw = form.amount.trim();
    let description_raw = form.description.trim();
    let start_raw = form.start_date.trim();
    let end_raw = form.end_date.trim();
    let frequency_raw = form.frequency.trim();
    let category_raw = form.category.trim();
    let repeat_raw = form.repeat_count.trim();

    if amount_raw.is_empty()
        || description_raw.is_empty()
        || start_raw.is_empty()
        || end_raw.is_empty()
        || frequency_raw.is_empty()
        || category_raw.is_empty()
        || repeat_raw.is_empty()
    {
        return Err(IncomeFormError::MissingFields);
    }

    let amount: f64 = amount_raw
        .parse()
        .map_err(|_| IncomeFormError::InvalidAmount(amount_raw.to_string()))?;
    let repeat_count: u32 = repeat_raw
        .parse()
        .map_err(|_| IncomeFormError::InvalidRepeatCount(repeat_raw.to_string()))?;
    let start_date = parse_date(start_raw)?;
    let end_date = parse_date(end_raw)?;
    let frequency: Frequency = frequency_raw
        .parse()
        .map_err(|_| IncomeFormError::InvalidFrequency(frequency_raw.to_string()))?;
    let operation_category_id: i64 = category_raw
        .parse()
        .map_err(|_| IncomeFormError::InvalidCategory(category_raw.to_string()))?;

    if config.enforce_date_order && end_date < start_date {
        return Err(IncomeFormError::EndBeforeStart);
    }

    Ok(CreateIncomeRequest {
        amount,
        description: description_raw.to_string(),
        start_date,
        end_date,
        frequency,
        repeat_count,
        operation_category_id,
        user_id,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, IncomeFormError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| IncomeFormError::InvalidDate(raw.to_string()))
}
