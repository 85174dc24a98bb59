use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logged-in user's profile as served by the remote profile service.
///
/// A copy of this record is cached client-side under a well-known storage key.
/// The cached copy must only ever be updated field-by-field with server values
/// that are present and differ from what is already held (see the reconcile
/// rules in the client crate) - never replaced wholesale.
///
/// All wire fields are camelCase to match the remote API's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier. A cached user without one is an
    /// unauthenticated session and must be redirected to login.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Reference to the user's preferred currency, if one is configured.
    #[serde(default)]
    pub currency_id: Option<i64>,
    #[serde(default)]
    pub current_balance: Option<f64>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl User {
    /// Whether this cached record belongs to an authenticated session.
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

/// A read-only operation category used to annotate income records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

/// A read-only currency record referenced by a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: i64,
    pub currency_code: String,
}

/// How often a recurring income repeats.
///
/// Single source of truth for the frequency set: validation parses into it,
/// the wire format serializes it, and presentation renders it, so the three
/// layers cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Monthly,
    Yearly,
}

impl Frequency {
    /// All variants, in the order a selection list should offer them.
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Monthly, Frequency::Yearly];

    /// Human-readable label for selection lists and income cards.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(Frequency::Daily),
            "Monthly" => Ok(Frequency::Monthly),
            "Yearly" => Ok(Frequency::Yearly),
            other => Err(ParseFrequencyError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseFrequencyError(pub String);

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency: {}", self.0)
    }
}

impl std::error::Error for ParseFrequencyError {}

/// A user-defined income schedule: money expected to recur between two dates
/// rather than a single transaction.
///
/// Created through submission and never edited in this workflow; deletion
/// happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringIncome {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    pub repeat_count: u32,
    pub operation_category_id: i64,
    pub user_id: i64,
}

/// POST body for creating a recurring income. Only the response status is
/// consumed; the server does not echo the record back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeRequest {
    pub amount: f64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    pub repeat_count: u32,
    pub operation_category_id: i64,
    pub user_id: i64,
}
