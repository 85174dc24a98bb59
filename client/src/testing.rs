//! Shared test doubles and fixtures.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{Category, CreateIncomeRequest, Currency, Frequency, RecurringIncome, User};
use std::cell::RefCell;

use crate::domain::income_form::IncomeForm;
use crate::services::api::{ApiError, LedgerApi};

pub(crate) fn sample_user() -> User {
    User {
        id: Some(7),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        currency_id: Some(3),
        current_balance: Some(2500.0),
        created_at: Some("2026-01-02T10:00:00Z".to_string()),
        last_login: Some("2026-02-01T08:30:00Z".to_string()),
        image_url: Some("https://example.com/alice.png".to_string()),
        password_hash: Some("$2b$10$abcdef".to_string()),
    }
}

pub(crate) fn sample_category() -> Category {
    Category {
        id: 4,
        category_name: "Salary".to_string(),
    }
}

pub(crate) fn sample_currency() -> Currency {
    Currency {
        id: 3,
        currency_code: "USD".to_string(),
    }
}

pub(crate) fn sample_income() -> RecurringIncome {
    RecurringIncome {
        id: 11,
        amount: 1500.0,
        description: "Salary".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        frequency: Frequency::Monthly,
        repeat_count: 10,
        operation_category_id: 4,
        user_id: 7,
    }
}

pub(crate) fn filled_form() -> IncomeForm {
    IncomeForm {
        amount: "1500.50".to_string(),
        description: "Salary".to_string(),
        start_date: "2026-03-01".to_string(),
        end_date: "2026-12-31".to_string(),
        frequency: "Monthly".to_string(),
        category: "4".to_string(),
        repeat_count: "10".to_string(),
    }
}

/// Scripted gateway double. Each endpoint returns a preset result; every call
/// is appended to `calls` so tests can assert ordering, and POST bodies are
/// captured in `created`.
pub(crate) struct MockLedgerApi {
    pub calls: RefCell<Vec<&'static str>>,
    pub categories: Result<Vec<Category>, ApiError>,
    pub currency: Result<Currency, ApiError>,
    pub incomes: Result<Vec<RecurringIncome>, ApiError>,
    pub user: Result<User, ApiError>,
    pub create_result: Result<(), ApiError>,
    pub created: RefCell<Vec<CreateIncomeRequest>>,
}

impl MockLedgerApi {
    /// Every endpoint answers successfully with the sample fixtures.
    pub fn happy() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            categories: Ok(vec![sample_category()]),
            currency: Ok(sample_currency()),
            incomes: Ok(vec![sample_income()]),
            user: Ok(sample_user()),
            create_result: Ok(()),
            created: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl LedgerApi for MockLedgerApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.calls.borrow_mut().push("list_categories");
        self.categories.clone()
    }

    async fn get_currency(&self, _currency_id: i64) -> Result<Currency, ApiError> {
        self.calls.borrow_mut().push("get_currency");
        self.currency.clone()
    }

    async fn list_incomes(&self, _user_id: i64) -> Result<Vec<RecurringIncome>, ApiError> {
        self.calls.borrow_mut().push("list_incomes");
        self.incomes.clone()
    }

    async fn get_user(&self, _user_id: i64) -> Result<User, ApiError> {
        self.calls.borrow_mut().push("get_user");
        self.user.clone()
    }

    async fn create_income(&self, request: &CreateIncomeRequest) -> Result<(), ApiError> {
        self.calls.borrow_mut().push("create_income");
        self.created.borrow_mut().push(request.clone());
        self.create_result.clone()
    }
}
