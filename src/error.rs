//! Error taxonomy shared by the alias store, its persistence adapter and the harness.

use thiserror::Error;

/// Errors returned by alias store operations.
///
/// Each variant maps to a distinct, stable machine code (see [`AppError::code`])
/// so the harness can report failures without string matching.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input was empty or malformed. No state was changed.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The URL is already mapped. Carries the existing short code.
    #[error("URL already stored as {code}")]
    AlreadyExists { code: String },

    /// A custom short code is already bound to another URL.
    #[error("Short code {code} is already taken")]
    CodeTaken { code: String },

    /// The key is absent from the persisted mapping.
    #[error("{message}")]
    NotFound { message: String },

    /// Persisted state for the key differs from unflushed memory, so a durable
    /// read would be stale.
    #[error("Changes to {key} are pending and have not been persisted yet")]
    NotPersisted { key: String },

    /// Writing a stream to durable storage failed.
    #[error("Failed to persist mapping: {message}")]
    Persistence { message: String },

    /// No unused code could be generated within the retry budget.
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn already_exists(code: impl Into<String>) -> Self {
        Self::AlreadyExists { code: code.into() }
    }

    pub fn code_taken(code: impl Into<String>) -> Self {
        Self::CodeTaken { code: code.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn not_persisted(key: impl Into<String>) -> Self {
        Self::NotPersisted { key: key.into() }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::AlreadyExists { .. } => "already_exists",
            AppError::CodeTaken { .. } => "code_taken",
            AppError::NotFound { .. } => "not_found",
            AppError::NotPersisted { .. } => "not_persisted",
            AppError::Persistence { .. } => "persistence_error",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
        }
    }

    /// Returns true for outcomes that are informational rather than failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, AppError::AlreadyExists { .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::persistence(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::persistence(format!("serialization failed: {e}"))
    }
}
