//! Data Transfer Objects
//!
//! Request and response types for the authentication and dashboard
//! endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Authentication
// ============================================

/// Body of `POST /api/login` and `POST /api/signup`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Error envelope of a rejected auth request
///
/// The backend reports codes either as `{"error": CODE}` or, through its
/// framework's default envelope, as `{"detail": CODE}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "detail")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the error code from a raw response body, if any
    pub fn code_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|code| !code.is_empty())
    }
}

/// Known error codes of the authentication API
pub mod codes {
    pub const EMAIL_NOT_FOUND: &str = "EMAIL_NOT_FOUND";
    pub const INVALID_PASSWORD: &str = "INVALID_PASSWORD";
    pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";
}

// ============================================
// Dashboard
// ============================================

/// Aggregate counters shown in the dashboard tiles
///
/// Every field may be missing or `null`; the accessors read those as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_calls: Option<f64>,
    #[serde(default)]
    pub calls_connected: Option<f64>,
    #[serde(default)]
    pub calls_dropped: Option<f64>,
    /// Average conversation length in seconds
    #[serde(default)]
    pub avg_duration: Option<f64>,
    /// Completion rate as a percentage
    #[serde(default)]
    pub success_rate: Option<f64>,
}

impl DashboardStats {
    pub fn total_conversations(&self) -> f64 {
        self.total_calls.unwrap_or(0.0)
    }

    pub fn completed(&self) -> f64 {
        self.calls_connected.unwrap_or(0.0)
    }

    pub fn abandoned(&self) -> f64 {
        self.calls_dropped.unwrap_or(0.0)
    }

    pub fn average_duration_secs(&self) -> f64 {
        self.avg_duration.unwrap_or(0.0)
    }

    pub fn success_rate_percent(&self) -> f64 {
        self.success_rate.unwrap_or(0.0)
    }
}

/// Identifier of a conversation record, as sent by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationId::Number(n) => write!(f, "{}", n),
            ConversationId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of the recent-conversations list
///
/// Only `id` is interpreted; the remaining fields are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ConversationRecord {
    /// A string-valued field, if present
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}
