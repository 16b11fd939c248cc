//! Release orchestration and coordination.
//!
//! The [`Release`] driver:
//! 1. Prepares the output root
//! 2. For each configuration, in declaration order: cleans its output
//!    directory, runs the build tool, verifies the artifact and records it
//! 3. Hands every recorded artifact to the packaging tool in one call
//!
//! Any failure ends the run at the step that hit it.
//!
//! - [`directories`] - output directory creation and cleanup
//! - [`invoker`] - build tool command line and execution
//! - [`targets`] - artifact verification and the ordered target list
//! - [`packaging`] - packaging tool dispatch
//! - [`orchestrator`] - the [`Release`] driver

pub mod directories;
pub mod invoker;
mod orchestrator;
pub mod packaging;
pub mod targets;

pub use orchestrator::{Release, ReleaseReport};
pub use targets::{ArtifactDescriptor, TargetList};
