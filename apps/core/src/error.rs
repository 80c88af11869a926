use thiserror::Error;

use crate::models::SessionStatus;

/// Crate-wide error type, consolidating every rejection the evaluator can raise.
///
/// The validation variants are raised on the first violated precondition and are
/// never retried internally. Callers translate them into user-facing messages,
/// typically by switching on [`AppError::kind`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The message was empty after trimming (or after sanitization removed everything).
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// The raw message exceeded the configured character limit.
    #[error("Message too long: {actual} characters exceeds maximum of {max}")]
    MessageTooLong { max: usize, actual: usize },

    /// The session's status does not permit further messages.
    #[error("Session is in {0} state")]
    SessionState(SessionStatus),

    /// The session has no owning user.
    #[error("Unauthorized: session has no owner")]
    Unauthorized,

    /// The request origin or referrer is not in the allow-list.
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    /// The uploaded file is not one of the accepted types.
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// The displayed content diverged from what sanitization produced.
    #[error("Message integrity check failed")]
    Integrity,

    /// A status change not present in the session state machine.
    #[error("Invalid session transition from {from} to {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// Configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external reply generator failed.
    #[error("Responder error: {0}")]
    Responder(String),

    /// Operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// JSON encoding or decoding failures.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Stable snake_case code for the error, suitable for client-side lookup tables.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::EmptyMessage => "empty_message",
            AppError::MessageTooLong { .. } => "message_too_long",
            AppError::SessionState(_) => "session_state",
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidOrigin(_) => "invalid_origin",
            AppError::InvalidFileType(_) => "invalid_file_type",
            AppError::Integrity => "integrity",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::Config(_) => "config",
            AppError::Responder(_) => "responder",
            AppError::Timeout(_) => "timeout",
            AppError::Serialization(_) => "serialization",
        }
    }

    /// Whether the error stems from caller input rather than infrastructure.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            AppError::Config(_)
                | AppError::Responder(_)
                | AppError::Timeout(_)
                | AppError::Serialization(_)
        )
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Responder did not answer in time: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidOrigin(format!("unparsable origin: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}
