//! Multi-configuration release library.
//!
//! Drives an external build tool over several named configurations of one
//! project, verifies that each produced its artifact, and hands the ordered
//! set of artifacts to an external packaging tool in a single call.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod release;

// Re-export commonly used types
pub use error::{ReleaseError, Result};
