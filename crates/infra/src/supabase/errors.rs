//! Supabase-specific error types
//!
//! Classifies PostgREST and GoTrue failures with retry metadata and maps
//! them into `CongregateError` at the port boundary.

use congregate_domain::{required_field_message, CongregateError};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

const NOT_NULL_VIOLATION: &str = "23502";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NO_ROWS: &str = "PGRST116";

static MISSING_COLUMN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r#"column "([^"]+)""#).ok());

/// Categories of Supabase errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupabaseErrorCategory {
    /// 401/403 or rejected credentials
    Authentication,
    /// 429
    RateLimit,
    /// 5xx, retryable
    Server,
    /// Other 4xx, non-retryable
    Client,
    /// Transport failure, retryable
    Network,
    /// Missing keys or bad URL
    Config,
    /// Row absent
    NotFound,
    /// Database constraint rejected the write
    Constraint,
}

/// Error body shared by PostgREST and GoTrue
///
/// PostgREST sends `code`/`message`/`details`/`hint`; GoTrue sends
/// `error`/`error_description` or `msg`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Best human-readable text in the body.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.msg.as_deref())
            .or(self.error.as_deref())
    }
}

// GoTrue reports numeric `code` values while PostgREST uses strings.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Supabase operation errors
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint {code} violated: {message}")]
    Constraint { code: String, message: String },
}

impl SupabaseError {
    pub fn category(&self) -> SupabaseErrorCategory {
        match self {
            Self::Auth(_) => SupabaseErrorCategory::Authentication,
            Self::RateLimit(_) => SupabaseErrorCategory::RateLimit,
            Self::Server(_) => SupabaseErrorCategory::Server,
            Self::Client(_) => SupabaseErrorCategory::Client,
            Self::Network(_) => SupabaseErrorCategory::Network,
            Self::Config(_) => SupabaseErrorCategory::Config,
            Self::NotFound(_) => SupabaseErrorCategory::NotFound,
            Self::Constraint { .. } => SupabaseErrorCategory::Constraint,
        }
    }

    /// Transport-level or server-side failure, as opposed to a rejection
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            SupabaseErrorCategory::RateLimit
                | SupabaseErrorCategory::Server
                | SupabaseErrorCategory::Network
        )
    }

    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        match parsed.code.as_deref() {
            Some(code @ (NOT_NULL_VIOLATION | UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION)) => {
                return Self::Constraint { code: code.to_string(), message };
            }
            Some(NO_ROWS) => return Self::NotFound(message),
            _ => {}
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            s if s.is_server_error() => Self::Server(message),
            s if s.is_client_error() => Self::Client(message),
            _ => Self::Network(message),
        }
    }
}

/// Column named in a PostgreSQL not-null violation message.
pub fn missing_column(message: &str) -> Option<&str> {
    let regex = MISSING_COLUMN.as_ref()?;
    regex.captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

impl From<SupabaseError> for CongregateError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Constraint { code, message } => match code.as_str() {
                NOT_NULL_VIOLATION => CongregateError::Validation(required_field_message(
                    missing_column(&message).unwrap_or("desconhecido"),
                )),
                UNIQUE_VIOLATION => CongregateError::Validation("Este registro já existe".into()),
                _ => CongregateError::Remote(format!("registro referenciado: {message}")),
            },
            SupabaseError::NotFound(message) => CongregateError::NotFound(message),
            SupabaseError::Auth(message) => CongregateError::Auth(message),
            SupabaseError::Config(message) => CongregateError::Config(message),
            SupabaseError::Client(message) => CongregateError::Validation(message),
            SupabaseError::RateLimit(message)
            | SupabaseError::Server(message)
            | SupabaseError::Network(message) => CongregateError::Remote(message),
        }
    }
}
