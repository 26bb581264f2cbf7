//! Custom error types for translation operations

use thiserror::Error;

/// Failure category used by the tool dispatcher to label responses.
///
/// Every [`TranslationError`] falls into exactly one category; the category
/// decides which prefix the rendered tool response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised by or on the way to the DeepL API
    Provider,
    /// A precondition on caller-supplied arguments or configuration failed
    Validation,
    /// Anything that should not happen during normal operation
    Unexpected,
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The DeepL API rejected the request
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Transport-level failure reaching the API
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the documented shape
    #[error("invalid response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Missing or empty required tool argument
    #[error("'{field}' parameter is required")]
    MissingParameter {
        field: String,
    },

    /// Tool argument outside its legal value set
    #[error("invalid '{field}' value: {message}")]
    InvalidParameter {
        field: String,
        message: String,
    },

    /// Configuration error (missing credential, bad endpoint)
    #[error("{message}")]
    Config {
        message: String,
    },

    /// Internal error
    #[error("{message}")]
    Internal {
        message: String,
    },
}

impl TranslationError {
    /// Categorize for the dispatcher's error envelope
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::Api { .. }
            | TranslationError::Network(_)
            | TranslationError::InvalidResponse { .. } => ErrorCategory::Provider,
            TranslationError::MissingParameter { .. }
            | TranslationError::InvalidParameter { .. }
            | TranslationError::Config { .. } => ErrorCategory::Validation,
            TranslationError::Internal { .. } => ErrorCategory::Unexpected,
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
