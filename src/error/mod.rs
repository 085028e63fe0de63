use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::core::accounts::AccountAction;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The unified error type for pledge-finance
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Payout link unavailable ({action}): {message}")]
    PayoutLinkUnavailable {
        code: u16,
        message: String,
        action: AccountAction,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Finance API error: {message}")]
    Api {
        code: u16,
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Cancelled: {message}")]
    Cancelled { code: u16, message: String },
}

impl FinanceError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with default code
    pub fn validation(message: impl Into<String>) -> Self {
        Self::validation_with_code(ErrorCode::VALIDATION_GENERIC, message, None)
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    /// Create a payout link error for the action that failed
    pub fn payout_link(code: u16, action: AccountAction, message: impl Into<String>) -> Self {
        Self::PayoutLinkUnavailable {
            code,
            message: message.into(),
            action,
            source: None,
        }
    }

    /// Create a finance API error with default code
    pub fn api(message: impl Into<String>) -> Self {
        Self::api_with_status(ErrorCode::API_GENERIC, message, None)
    }

    /// Create a finance API error with specific code and HTTP status
    pub fn api_with_status(code: u16, message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            status,
            source: None,
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            code: ErrorCode::CANCELLED,
            message: message.into(),
        }
    }

    /// Add a source error to this error
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Validation { source: src, .. }
            | Self::PayoutLinkUnavailable { source: src, .. }
            | Self::Api { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Cancelled { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Validation { message, .. }
            | Self::PayoutLinkUnavailable { message, .. }
            | Self::Api { message, .. }
            | Self::Cancelled { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Validation { code, .. }
            | Self::PayoutLinkUnavailable { code, .. }
            | Self::Api { code, .. }
            | Self::Cancelled { code, .. } => *code,
        }
    }

    /// Whether the user can reasonably retry the operation by hand
    ///
    /// Nothing in this crate retries automatically; this only tells the
    /// caller whether to offer a retry affordance.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::PayoutLinkUnavailable { .. } => true,
            Self::Api { status, .. } => !matches!(status, Some(400..=499)),
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Validation { message, field, .. } => {
                if let Some(f) = field {
                    format!("Invalid value for '{}': {}", f, message)
                } else {
                    format!("Invalid value: {}", message)
                }
            }
            Self::PayoutLinkUnavailable { action, .. } => {
                format!("Could not {}. Please try again.", action.describe())
            }
            Self::Api { message, .. } => format!("Could not load finance data: {}", message),
            Self::Cancelled { message, .. } => message.clone(),
        }
    }
}

/// Type alias for Results using FinanceError
pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<reqwest::Error> for FinanceError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let code = if err.is_decode() {
            ErrorCode::API_INVALID_RESPONSE
        } else {
            ErrorCode::API_REQUEST_FAILED
        };
        FinanceError::api_with_status(code, "HTTP request failed", status).with_source(err)
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::api_with_status(ErrorCode::API_INVALID_RESPONSE, "Invalid JSON payload", None)
            .with_source(err)
    }
}

impl From<toml::de::Error> for FinanceError {
    fn from(err: toml::de::Error) -> Self {
        FinanceError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "Invalid TOML syntax")
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_and_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err = FinanceError::config("Cannot read config")
            .with_source(io_err)
            .with_context("while loading finance settings");

        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);
        assert!(err.to_string().contains("[E1000]"));
        assert!(err.user_message().contains("Cannot read config"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_payout_link_error_is_retryable() {
        let err = FinanceError::payout_link(
            ErrorCode::PAYOUT_LINK_REQUEST_FAILED,
            AccountAction::OpenDashboard,
            "connection reset",
        );
        assert!(err.is_retryable());
        assert!(err.to_string().contains("[E3001]"));
        assert_eq!(
            err.user_message(),
            "Could not open the payout dashboard. Please try again."
        );
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = FinanceError::api_with_status(ErrorCode::API_BAD_STATUS, "not found", Some(404));
        assert!(!err.is_retryable());

        let err =
            FinanceError::api_with_status(ErrorCode::API_BAD_STATUS, "bad gateway", Some(502));
        assert!(err.is_retryable());

        assert!(!FinanceError::cancelled("view closed").is_retryable());
        assert!(!FinanceError::validation("negative").is_retryable());
    }
}
