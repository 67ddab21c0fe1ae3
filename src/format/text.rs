//! Text formatting functions for `roadwatch`.
//!
//! Plain text (non-ANSI) rendering of the library's card and marker
//! projections:
//! - Status icons (○ ◐ ✓)
//! - One-line issue summaries, truncated to the terminal width
//! - Multi-line cards, map pins, hotspots, notices and field errors

use std::fmt::Write as _;

use roadwatch_lib::render::{BadgePlacement, IssueCard, MarkerView};
use roadwatch_lib::{FieldErrors, Hotspot, Notice, Status, render::severity_badge};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open issue, nobody on it yet (hollow circle).
    pub const OPEN: &str = "○";
    /// Work has started (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Fixed (checkmark).
    pub const RESOLVED: &str = "✓";
    /// Unknown status.
    pub const UNKNOWN: &str = "?";
    /// Map pin.
    pub const PIN: &str = "●";
    /// Pulsing (high severity) map pin.
    pub const PULSE: &str = "◉";
}

/// Default width for one-line summaries.
pub const DEFAULT_LINE_WIDTH: usize = 100;

#[must_use]
pub const fn format_status_icon(status: &Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Custom(_) => icons::UNKNOWN,
    }
}

/// Cut `text` to at most `max_width` terminal columns, ending in `…`
/// when anything was dropped.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a single-line card summary.
///
/// Format: `{icon} {id} [{severity}] [{type}] {title}`
#[must_use]
pub fn format_issue_line(card: &IssueCard, max_width: usize) -> String {
    let line = format!(
        "{} {} [{}] [{}] {}",
        format_status_icon(&card.status_value),
        card.id,
        card.severity.label,
        card.type_label,
        card.title,
    );
    truncate_to_width(&line, max_width)
}

/// Format a full card.
#[must_use]
pub fn format_card(card: &IssueCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", card.id, card.title);
    let _ = writeln!(
        out,
        "  {} | {} | {} {}",
        card.severity.label,
        card.type_label,
        format_status_icon(&card.status_value),
        card.status.label
    );
    let _ = writeln!(out, "  Location: {}", card.location);
    let _ = writeln!(out, "  Reported: {}", card.date_reported);
    let _ = writeln!(
        out,
        "  Upvotes: {}  Comments: {}",
        card.upvotes, card.comments
    );
    match (&card.image, card.status_placement) {
        (Some(image), BadgePlacement::ImageOverlay) => {
            let _ = writeln!(out, "  Image: {}", truncate_to_width(&image.url, 72));
        }
        _ => {
            let _ = writeln!(out, "  Image: none");
        }
    }
    let _ = writeln!(out);
    for line in card.description.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

#[must_use]
pub fn format_marker(marker: &MarkerView) -> String {
    let pin = if marker.pulse { icons::PULSE } else { icons::PIN };
    format!(
        "{pin} {} {} ({:.4}, {:.4}) [{}]\n  {}\n  {}",
        marker.id,
        marker.popup_title,
        marker.lat,
        marker.lng,
        marker.color,
        marker.popup_body,
        marker.popup_footer
    )
}

#[must_use]
pub fn format_hotspot(hotspot: &Hotspot) -> String {
    format!(
        "{} ({} incidents, {})\n  {}",
        hotspot.name,
        hotspot.incidents,
        severity_badge(&hotspot.severity).label,
        hotspot.description
    )
}

#[must_use]
pub fn format_notice(notice: &Notice) -> String {
    let marker = if notice.is_destructive() { "!" } else { "*" };
    format!("{marker} {}: {}", notice.title, notice.description)
}

/// One line per field, in form order.
#[must_use]
pub fn format_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}
