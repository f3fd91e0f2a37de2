//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Congregate
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CongregateError {
    /// Missing or invalid field. The message is already user-facing.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced record no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network, server or store failure.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Role check failed.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A mutation is already in flight.
    #[error("Operation in progress: {0}")]
    Busy(String),

    /// The user declined a confirmation prompt.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CongregateError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Remote(_) => "remote",
            Self::PermissionDenied(_) => "permission_denied",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::Busy(_) => "busy",
            Self::Cancelled(_) => "cancelled",
            Self::Internal(_) => "internal",
        }
    }

    /// Raw message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::NotFound(m)
            | Self::Remote(m)
            | Self::PermissionDenied(m)
            | Self::Auth(m)
            | Self::Config(m)
            | Self::Busy(m)
            | Self::Cancelled(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Result type alias for Congregate operations
pub type Result<T> = std::result::Result<T, CongregateError>;
