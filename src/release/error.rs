//! Error types for release orchestration.
//!
//! Every failure the driver can hit is a variant here. Nothing is retried:
//! the first error returned aborts the run and is reported to the caller.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while preparing, building, verifying or packaging.
#[derive(Error, Debug)]
pub enum Error {
    /// A required root path or setting is missing or of the wrong kind.
    ///
    /// Raised before any directory or build work starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An output directory could not be prepared or cleaned.
    #[error("output directory error at {}: {reason}", .path.display())]
    Directory {
        /// Directory (or entry) the operation was applied to
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The build tool exited unsuccessfully for a configuration.
    #[error("build failed for configuration '{configuration}' ({})", describe_code(.code))]
    BuildFailed {
        /// Configuration being built
        configuration: String,
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// The build tool exited successfully but left no artifact behind.
    #[error(
        "build of configuration '{configuration}' reported success but {} does not exist",
        .path.display()
    )]
    MissingArtifact {
        /// Configuration that was built
        configuration: String,
        /// Where the artifact was expected
        path: PathBuf,
    },

    /// The packaging tool exited unsuccessfully.
    #[error("could not build the package ({})", describe_code(.code))]
    PackagingFailed {
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// An external command could not be started at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program that failed to start
        command: String,
        /// Underlying spawn/wait error
        #[source]
        error: io::Error,
    },

    /// `release.toml` could not be parsed.
    #[error("invalid release manifest {}: {error}", .path.display())]
    Manifest {
        /// Manifest location
        path: PathBuf,
        /// Parser error
        #[source]
        error: toml::de::Error,
    },

    /// IO errors
    #[error("{0}")]
    IoError(#[from] io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Process exit code used when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) | Error::Manifest { .. } => 2,
            Error::Directory { .. } => 3,
            Error::BuildFailed { .. } | Error::CommandFailed { .. } => 4,
            Error::MissingArtifact { .. } => 5,
            Error::PackagingFailed { .. } => 6,
            Error::IoError(_) => 1,
        }
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO failure on `path` into [`Error::Directory`], prefixing
    /// the reason with `action`.
    fn fs_context(self, action: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, action: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| Error::Directory {
            path: path.as_ref().to_path_buf(),
            reason: format!("{action}: {e}"),
        })
    }
}

/// Turn an absent value into a configuration error.
pub trait Context<T> {
    /// Fail with [`Error::Configuration`] carrying `msg` if the value is absent.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::Configuration(msg.to_string()))
    }
}
