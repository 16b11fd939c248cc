//! Build tool invocation.

use crate::release::{
    error::{Error, Result},
    settings::{Configuration, Settings},
    utils::{CommandRunner, Invocation},
};
use std::{ffi::OsString, path::Path};

/// Builds the command line for one configuration.
///
/// `<tool> <solution> -p:Configuration=<name>;OutDir=<out>`, plus
/// `-t:Rebuild` when the settings force a rebuild.
pub fn build_invocation(
    settings: &Settings,
    configuration: &Configuration,
    out_dir: &Path,
) -> Invocation {
    let mut properties = OsString::from("-p:Configuration=");
    properties.push(configuration.name());
    properties.push(";OutDir=");
    properties.push(out_dir);

    let invocation = Invocation::new(settings.build_tool())
        .arg(settings.solution_path())
        .arg(properties);

    if settings.rebuild() {
        invocation.arg("-t:Rebuild")
    } else {
        invocation
    }
}

/// Runs the build tool for `configuration` and waits for it to finish.
///
/// Any exit other than zero is [`Error::BuildFailed`]. No retry.
pub async fn run_build<R: CommandRunner>(
    runner: &R,
    settings: &Settings,
    configuration: &Configuration,
    out_dir: &Path,
) -> Result<()> {
    let invocation = build_invocation(settings, configuration, out_dir);

    log::info!("Building {configuration} ..");
    log::debug!("{invocation}");

    let exit = runner.run(&invocation).await?;
    if !exit.success() {
        return Err(Error::BuildFailed {
            configuration: configuration.name().to_string(),
            code: exit.exit_code(),
        });
    }
    Ok(())
}
