//! Command line interface for the release driver.

mod args;

pub use args::Args;

use crate::error::Result;
use crate::release::{
    self, FileSystem, LocalFs, Release, ReleaseManifest, ReleaseReport, RootPaths, Settings,
    SettingsBuilder, TokioCommandRunner, locate_program, resolve_paths,
};
use std::io::Write;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let _args = Args::parse_args();

    let settings = load_settings(&LocalFs, &RootPaths::from_env()?).await?;
    let release = Release::new(settings, LocalFs, TokioCommandRunner);
    log::info!(
        "Releasing {} configuration(s) from {}",
        release.settings().configurations().len(),
        release.settings().project_root().display()
    );

    let report = release.run().await?;
    print_summary(&mut std::io::stdout().lock(), &report)?;

    Ok(0)
}

/// Resolves the roots and assembles the run settings.
///
/// Every check here happens before any directory is touched.
pub async fn load_settings<F: FileSystem>(fs: &F, roots: &RootPaths) -> release::Result<Settings> {
    let roots = resolve_paths(fs, roots).await?;
    let manifest = ReleaseManifest::load(&roots.project_root).await?;

    let builder = SettingsBuilder::new()
        .project_root(&roots.project_root)
        .build_tool(&roots.build_tool)
        .manifest(manifest);
    let interpreter = locate_program(&builder.current_interpreter())?;

    builder.packaging_interpreter(interpreter).build()
}

fn print_summary(out: &mut impl Write, report: &ReleaseReport) -> std::io::Result<()> {
    for artifact in &report.artifacts {
        writeln!(
            out,
            "{}: {}",
            artifact.configuration(),
            artifact.path().display()
        )?;
    }
    writeln!(out, "OK")
}
