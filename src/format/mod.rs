//! Output formatting for `roadwatch`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! With `--json`, stdout carries only JSON; logs stay on stderr.
//!
//! # JSON Output Types
//!
//! - [`ReportOutput`] - accepted record and card, or field errors (report)
//! - [`MapOutput`] - map centre, zoom and marker views (map)
//! - [`HotspotsOutput`] - hotspots with their incident total (hotspots)
//!
//! `list` and `show` print [`IssueCard`](roadwatch_lib::IssueCard)s directly.

mod output;
mod text;

use serde::Serialize;

pub use output::{HotspotsOutput, MapOutput, ReportOutput, VersionOutput};
pub use text::{
    DEFAULT_LINE_WIDTH, format_card, format_field_errors, format_hotspot, format_issue_line,
    format_marker, format_notice, format_status_icon, truncate_to_width,
};

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
