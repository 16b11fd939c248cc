//! Capability interfaces for the side effects the driver performs.

pub mod fs;
pub mod process;

pub use fs::{EntryKind, FileSystem, LocalFs};
pub use process::{CommandRunner, Exit, Invocation, TokioCommandRunner};
