//! Error types for passbook-core

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("An entry for website '{website}' and username '{username}' already exists")]
    DuplicateEntry { website: String, username: String },

    #[error("No entry found for website '{website}' and username '{username}'")]
    NotFound { website: String, username: String },

    #[error("Verification failed")]
    VerificationFailed,

    #[error("Invalid {field}: {reason}")]
    MalformedInput { field: &'static str, reason: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    SettingsError(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn not_found(website: &str, username: &str) -> Self {
        Self::NotFound {
            website: website.to_string(),
            username: username.to_string(),
        }
    }
}
