//! List command implementation.
//!
//! Shows the recently reported issues as cards, optionally filtered.

use anyhow::Result;
use roadwatch_lib::{IssueFilter, IssueType, Severity, Status, render_card, sample};

use crate::cli::{CommandContext, ListArgs};
use crate::format::{DEFAULT_LINE_WIDTH, format_issue_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or JSON output fails.
pub fn execute(args: &ListArgs, ctx: &CommandContext) -> Result<()> {
    let filter = build_filter(args)?;
    let cards: Vec<_> = filter
        .apply(sample::sample_issues())
        .iter()
        .map(render_card)
        .collect();
    tracing::debug!(count = cards.len(), ?filter, "Listing issues");

    if ctx.json {
        print_json(&cards)?;
    } else if cards.is_empty() {
        println!("No issues found.");
    } else {
        for card in &cards {
            println!("{}", format_issue_line(card, DEFAULT_LINE_WIDTH));
        }
        println!("\n{} issue(s)", cards.len());
    }

    Ok(())
}

/// Convert CLI args to a filter. Unknown statuses are an error; unknown
/// types and severities simply match nothing.
fn build_filter(args: &ListArgs) -> Result<IssueFilter> {
    let issue_type = args
        .type_
        .as_deref()
        .map(str::parse::<IssueType>)
        .transpose()?;
    let severity = args
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()?;
    let status = args
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()?;

    Ok(IssueFilter {
        issue_type,
        severity,
        status,
    })
}
