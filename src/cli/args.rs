//! Command line argument parsing.
//!
//! The release takes no orchestration flags: everything comes from the
//! environment and the optional `release.toml`. clap still provides
//! `--help` and `--version`.

use clap::Parser;

/// Multi-configuration release builder
#[derive(Parser, Debug)]
#[command(
    name = "multibuild_release",
    version,
    about = "Builds every release configuration and packages the verified artifacts",
    long_about = "Builds every configuration of the project with the external build tool, \
checks that each one produced its artifact, then runs the packaging script once with \
all of them.

Environment:
  MSBUILD_PATH   Build tool executable, or the directory containing it
  CBP_SLN_ROOT   Project root containing the solution and packaging script
  RUST_LOG       Log filter (e.g. info, debug)

Optional <CBP_SLN_ROOT>/release.toml overrides the configurations, solution,
artifact name, output directory, rebuild flag and packaging script.

Exit code 0 = every configuration built, verified and packaged."
)]
pub struct Args {}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
