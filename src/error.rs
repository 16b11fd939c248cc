//! Top-level error type for the release binary.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Errors surfaced by the command line entry point.
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Orchestration errors
    #[error(transparent)]
    Release(#[from] crate::release::Error),

    /// Writing the run summary failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReleaseError {
    /// Process exit code for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Release(e) => e.exit_code(),
            ReleaseError::Io(_) => 1,
        }
    }
}
