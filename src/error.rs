//! Error types for the onboarding core.

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),
}

/// Snapshot-storage errors.
///
/// These never surface to the user during normal operation: the store treats
/// snapshot writes as best-effort and keeps the in-memory state authoritative.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from the external acceptance call.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Application rejected: {0}")]
    Rejected(String),

    #[error("Acceptance service unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for the wizard core.
pub type Result<T> = std::result::Result<T, Error>;
