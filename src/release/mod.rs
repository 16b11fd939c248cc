//! Multi-configuration release building.
//!
//! Builds every declared configuration of a project with an external build
//! tool, checks that each produced its artifact, and passes the complete
//! set to an external packaging tool.
//!
//! # Example
//!
//! ```no_run
//! use multibuild_release::release::{
//!     LocalFs, Release, RootPaths, SettingsBuilder, TokioCommandRunner, resolve_paths,
//! };
//!
//! # async fn example() -> multibuild_release::release::Result<()> {
//! let roots = resolve_paths(&LocalFs, &RootPaths::from_env()?).await?;
//! let settings = SettingsBuilder::new()
//!     .project_root(&roots.project_root)
//!     .build_tool(&roots.build_tool)
//!     .build()?;
//!
//! let report = Release::new(settings, LocalFs, TokioCommandRunner).run().await?;
//! println!("Packaged {} configurations", report.artifacts.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod paths;
pub mod settings;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{ArtifactDescriptor, Release, ReleaseReport, TargetList};
pub use error::{Error, Result};
pub use paths::{ResolvedPaths, RootPaths, locate_program, resolve_paths};
pub use settings::{Configuration, ReleaseManifest, Settings, SettingsBuilder};
pub use utils::{CommandRunner, EntryKind, Exit, FileSystem, Invocation, LocalFs, TokioCommandRunner};
