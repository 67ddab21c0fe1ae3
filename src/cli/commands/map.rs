//! Map command implementation.

use anyhow::Result;
use roadwatch_lib::{MapView, render_marker, sample};

use crate::cli::CommandContext;
use crate::format::{MapOutput, format_marker, print_json};

/// Execute the map command.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let view = MapView::default();
    let markers: Vec<_> = sample::map_markers().iter().map(render_marker).collect();

    if ctx.json {
        print_json(&MapOutput {
            center: [view.latitude, view.longitude],
            zoom: view.zoom,
            markers,
        })?;
        return Ok(());
    }

    println!(
        "Map centred on {:.4}, {:.4} (zoom {})\n",
        view.latitude, view.longitude, view.zoom
    );
    for marker in &markers {
        println!("{}", format_marker(marker));
    }
    Ok(())
}
