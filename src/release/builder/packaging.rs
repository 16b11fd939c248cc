//! Packaging tool dispatch.

use super::targets::TargetList;
use crate::release::{
    error::{Error, Result},
    settings::Settings,
    utils::{CommandRunner, Invocation},
};
use std::ffi::OsString;

/// Builds `<interpreter> <script> <name>|<path>...`.
pub fn packaging_invocation(settings: &Settings, targets: &TargetList) -> Invocation {
    Invocation::new(settings.packaging_interpreter())
        .arg(settings.packaging_script_path())
        .args(targets.package_args())
}

/// Hands every verified target to the packaging tool in a single call.
///
/// Takes the list by value: it is consumed here and not used again.
/// Returns the target arguments that were passed.
pub async fn dispatch_packaging<R: CommandRunner>(
    runner: &R,
    settings: &Settings,
    targets: TargetList,
) -> Result<Vec<OsString>> {
    let invocation = packaging_invocation(settings, &targets);
    log::info!("Packaging {} target(s): {invocation}", targets.len());

    let exit = runner.run(&invocation).await?;
    if !exit.success() {
        return Err(Error::PackagingFailed {
            code: exit.exit_code(),
        });
    }

    Ok(targets.package_args())
}
