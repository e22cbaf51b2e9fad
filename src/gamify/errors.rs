use thiserror::Error;

/// Errors that can arise in the storage layer. The repository boundary
/// downgrades all of these to logged warnings; they never reach the host.
#[derive(Debug, Error)]
pub enum GamifyError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, file locking, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
