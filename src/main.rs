//! Multi-configuration release builder.
//!
//! Builds each configured variant of a project with an external build tool,
//! verifies every artifact, and packages them all with one call to the
//! packaging script. Exit code 0 means the package was produced.

use multibuild_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
