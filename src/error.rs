//! Error types for the munjiz tracker.

/// Top-level error type for the tracker core.
#[derive(Debug, thiserror::Error)]
pub enum MunjizError {
    /// Durable storage read/write error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A typed update addressed something that does not exist.
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// A reminder time that is not a valid 24-hour `HH:MM` value.
    #[error("invalid reminder time: {0}")]
    InvalidTime(String),

    /// Platform notification sink error.
    #[error("notification error: {0}")]
    Notification(String),

    /// Generative text / lookup collaborator error.
    #[error("companion error: {0}")]
    Companion(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MunjizError>;
