//! Version command implementation.

use anyhow::Result;

use crate::cli::CommandContext;
use crate::format::{VersionOutput, print_json};

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.json {
        print_json(&VersionOutput {
            version,
            build,
            library: roadwatch_lib::VERSION,
        })?;
    } else {
        println!("rw version {version} ({build})");
    }
    Ok(())
}
