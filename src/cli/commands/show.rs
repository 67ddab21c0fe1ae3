//! Show command implementation.

use anyhow::Result;
use roadwatch_lib::{render_card, sample};

use crate::cli::CommandContext;
use crate::format::{format_card, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if no issue has the given id.
pub fn execute(id: &str, ctx: &CommandContext) -> Result<()> {
    let card = render_card(&sample::find_issue(id)?);

    if ctx.json {
        print_json(&card)?;
    } else {
        print!("{}", format_card(&card));
    }
    Ok(())
}
