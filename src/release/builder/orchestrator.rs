//! Main release orchestration.
//!
//! This module provides the [`Release`] driver that builds every configured
//! variant in turn, verifies its artifact, and packages the lot in one call.

use super::{
    directories::{ensure_dir, prepare_output_dir},
    invoker::run_build,
    packaging::dispatch_packaging,
    targets::{ArtifactDescriptor, TargetList, verify_artifact},
};
use crate::release::{
    Result,
    settings::Settings,
    utils::{CommandRunner, FileSystem},
};
use std::ffi::OsString;

/// Outcome of a successful release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Verified artifacts in declaration order
    pub artifacts: Vec<ArtifactDescriptor>,
    /// Target arguments passed to the packaging tool
    pub package_args: Vec<OsString>,
}

/// Release driver.
///
/// Owns the run settings and the two capabilities it acts through. Every
/// step is awaited before the next starts; configurations never overlap
/// because they share the build tool's intermediate state.
///
/// # Examples
///
/// ```no_run
/// use multibuild_release::release::{LocalFs, Release, SettingsBuilder, TokioCommandRunner};
///
/// # async fn example() -> multibuild_release::release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/cbp")
///     .build_tool("/opt/msbuild/msbuild")
///     .build()?;
///
/// let report = Release::new(settings, LocalFs, TokioCommandRunner).run().await?;
/// for artifact in &report.artifacts {
///     println!("{}: {}", artifact.configuration(), artifact.path().display());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Release<F, R> {
    settings: Settings,
    fs: F,
    runner: R,
}

impl<F, R> std::fmt::Debug for Release<F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Release")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<F: FileSystem, R: CommandRunner> Release<F, R> {
    /// Creates a driver for `settings`.
    pub fn new(settings: Settings, fs: F, runner: R) -> Self {
        Self {
            settings,
            fs,
            runner,
        }
    }

    /// Returns a reference to the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole release.
    ///
    /// For each configuration in order: prepare its output directory, build
    /// it, verify its artifact, record it. The first failure is returned
    /// immediately; later configurations are not attempted and packaging
    /// is skipped. Packaging runs exactly once, only after every
    /// configuration succeeded.
    pub async fn run(&self) -> Result<ReleaseReport> {
        let settings = &self.settings;
        ensure_dir(&self.fs, &settings.output_root()).await?;

        let mut targets = TargetList::new();
        for configuration in settings.configurations() {
            let out_dir = settings.output_path(configuration);

            let removed = prepare_output_dir(&self.fs, &out_dir).await?;
            if removed > 0 {
                log::debug!("Cleaned {removed} stale entries from {}", out_dir.display());
            }

            run_build(&self.runner, settings, configuration, &out_dir).await?;
            targets.push(verify_artifact(&self.fs, settings, configuration).await?);
        }

        debug_assert_eq!(targets.len(), settings.configurations().len());

        let artifacts: Vec<_> = targets.iter().cloned().collect();
        let package_args = dispatch_packaging(&self.runner, settings, targets).await?;

        Ok(ReleaseReport {
            artifacts,
            package_args,
        })
    }
}
