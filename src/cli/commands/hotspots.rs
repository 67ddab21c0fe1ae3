//! Hotspots command implementation.

use anyhow::Result;
use roadwatch_lib::sample;

use crate::cli::CommandContext;
use crate::format::{HotspotsOutput, format_hotspot, print_json};

/// Execute the hotspots command.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let output = HotspotsOutput::new(sample::accident_hotspots());

    if ctx.json {
        print_json(&output)?;
        return Ok(());
    }

    for hotspot in &output.hotspots {
        println!("{}", format_hotspot(hotspot));
    }
    println!(
        "\n{} incidents across {} hotspots",
        output.total_incidents,
        output.hotspots.len()
    );
    Ok(())
}
