//! Core types for bundle-status.
//!
//! These mirror the records the backend hands out. Status enums are permissive:
//! unrecognized wire values land on `Unknown` instead of failing the whole snapshot.
//!
//! Note: `BundleStatus` (the derived view-model) lives in `state.rs`.

use super::lenient;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identifier. The backend sends numbers for some records and strings for others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Integers stay numeric; any other scalar is kept as its text.
    #[must_use]
    pub fn from_scalar(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            ),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_scalar(&value)
            .ok_or_else(|| de::Error::custom(format!("expected a scalar id, found {value}")))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Payment progress of one participant, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<Value>")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Authorized,
    Completed,
    Cancelled,
    Unknown,
}

impl PaymentStatus {
    /// Authorized or completed: the participant has agreed to be charged.
    #[must_use]
    pub fn is_consented(self) -> bool {
        matches!(self, Self::Authorized | Self::Completed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Authorized => write!(f, "AUTHORIZED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl From<Option<Value>> for PaymentStatus {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Pending,
            Some(Value::String(s)) => Self::from(s.as_str()),
            Some(_) => Self::Unknown,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "authorized" => Self::Authorized,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

/// A participant's consent decision. Independent of payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<Value>")]
pub enum Response {
    #[default]
    None,
    Accepted,
    Rejected,
    Unknown,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl From<Option<Value>> for Response {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::None,
            Some(Value::String(s)) => Self::from(s.as_str()),
            Some(_) => Self::Unknown,
        }
    }
}

impl From<&str> for Response {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Self::None,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Unknown,
        }
    }
}

/// Classification tag of a bundle.
///
/// Accepted as configuration only; every type follows the same status rules today.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "String")]
pub enum BundleType {
    #[default]
    MarketplaceOnetime,
    MarketplaceInstallment,
    Other(String),
}

impl BundleType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MarketplaceOnetime => "marketplace_onetime",
            Self::MarketplaceInstallment => "marketplace_installment",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for BundleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<Value>> for BundleType {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::MarketplaceOnetime,
            Some(Value::String(s)) => Self::from(s.as_str()),
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

impl From<&str> for BundleType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" | "marketplace_onetime" => Self::MarketplaceOnetime,
            "marketplace_installment" => Self::MarketplaceInstallment,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<BundleType> for String {
    fn from(t: BundleType) -> Self {
        t.as_str().to_string()
    }
}

/// A participant reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(
        default,
        alias = "displayName",
        deserialize_with = "lenient::string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl User {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
        }
    }

    /// Uppercase first letter or digit of the name, `?` if there is none.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .as_deref()
            .and_then(|n| n.trim().chars().find(|c| c.is_alphanumeric()))
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}

/// One participant's obligation within a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    #[serde(
        default,
        deserialize_with = "lenient::user",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<User>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub response: Response,
    #[serde(
        default,
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, name: &str) -> Self {
        Self {
            id: id.into(),
            user: Some(User::named(name)),
            payment_status: PaymentStatus::Pending,
            response: Response::None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_payment(mut self, status: PaymentStatus) -> Self {
        self.payment_status = status;
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = response;
        self
    }

    /// Rejected consent or a cancelled payment.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        self.response == Response::Rejected || self.payment_status == PaymentStatus::Cancelled
    }

    /// True if either status field carried a value this crate does not recognize.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        self.payment_status == PaymentStatus::Unknown || self.response == Response::Unknown
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }

    #[must_use]
    pub fn initial(&self) -> char {
        self.user.as_ref().map_or('?', User::initial)
    }
}

/// A shared financial obligation split across household participants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub bundle_type: BundleType,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Bundle {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }
}
