//! Read-only projections of records for list and map views.
//!
//! Every function here is total: unknown types, severities and statuses
//! fall back to a neutral style instead of failing.

use serde::Serialize;

use crate::model::{IssueRecord, IssueType, MapMarker, Severity, Status};

/// Date format used on cards and map popups.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Colour family of a badge or marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
    Gray,
}

/// A labelled, coloured badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
    /// Style classes for HTML renderers.
    pub class: &'static str,
}

/// Where the status badge sits on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgePlacement {
    /// Top-right corner of the image.
    ImageOverlay,
    /// Top-right corner of the header when there is no image.
    Header,
}

/// The image region of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardImage {
    pub url: String,
    pub alt: String,
}

/// Summary card for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCard {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub type_label: &'static str,
    pub severity: Badge,
    pub status: Badge,
    /// The workflow status the badge was drawn from.
    pub status_value: Status,
    pub status_placement: BadgePlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
    pub upvotes: u32,
    pub comments: u32,
    pub date_reported: String,
}

/// Human label for an issue type.
#[must_use]
pub const fn type_label(issue_type: &IssueType) -> &'static str {
    match issue_type {
        IssueType::Pothole => "Pothole",
        IssueType::Construction => "Incomplete Construction",
        IssueType::Accident => "Accident Prone Area",
        IssueType::Other | IssueType::Custom(_) => "Other Issue",
    }
}

#[must_use]
pub const fn severity_tone(severity: &Severity) -> Tone {
    match severity {
        Severity::High => Tone::Red,
        Severity::Medium => Tone::Orange,
        Severity::Low => Tone::Yellow,
        Severity::Custom(_) => Tone::Gray,
    }
}

#[must_use]
pub const fn severity_class(severity: &Severity) -> &'static str {
    match severity {
        Severity::High => "bg-hazard text-white",
        Severity::Medium => "bg-hazard-orange text-white",
        Severity::Low => "bg-hazard-yellow text-black",
        Severity::Custom(_) => "bg-muted text-muted-foreground",
    }
}

/// "High Severity", "Medium Severity", ...
#[must_use]
pub fn severity_badge(severity: &Severity) -> Badge {
    Badge {
        label: format!("{} Severity", capitalize(severity.as_str())),
        tone: severity_tone(severity),
        class: severity_class(severity),
    }
}

#[must_use]
pub const fn status_tone(status: &Status) -> Tone {
    match status {
        Status::Open => Tone::Red,
        Status::InProgress => Tone::Blue,
        Status::Resolved => Tone::Green,
        Status::Custom(_) => Tone::Gray,
    }
}

#[must_use]
pub const fn status_class(status: &Status) -> &'static str {
    match status {
        Status::Open => "bg-red-100 text-red-800 border-red-200",
        Status::InProgress => "bg-blue-100 text-blue-800 border-blue-200",
        Status::Resolved => "bg-green-100 text-green-800 border-green-200",
        Status::Custom(_) => "bg-gray-100 text-gray-800 border-gray-200",
    }
}

/// Status badge; the label reads "in progress" rather than "in-progress".
#[must_use]
pub fn status_badge(status: &Status) -> Badge {
    Badge {
        label: status.as_str().replace('-', " "),
        tone: status_tone(status),
        class: status_class(status),
    }
}

/// Project a record into its summary card.
#[must_use]
pub fn render_card(record: &IssueRecord) -> IssueCard {
    let image = record
        .image_url
        .as_ref()
        .filter(|url| !url.is_empty())
        .map(|url| CardImage {
            url: url.clone(),
            alt: record.title.clone(),
        });
    let status_placement = if image.is_some() {
        BadgePlacement::ImageOverlay
    } else {
        BadgePlacement::Header
    };

    IssueCard {
        id: record.id.clone(),
        title: record.title.clone(),
        location: record.location.clone(),
        description: record.description.clone(),
        type_label: type_label(&record.issue_type),
        severity: severity_badge(&record.severity),
        status: status_badge(&record.status),
        status_value: record.status.clone(),
        status_placement,
        image,
        upvotes: record.upvotes,
        comments: record.comments,
        date_reported: record.date_reported.format(DATE_FORMAT).to_string(),
    }
}

// ============================================================================
// Map markers
// ============================================================================

/// Marker fill colour by severity.
#[must_use]
pub const fn marker_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::High => "#DC2626",
        Severity::Medium => "#F97316",
        Severity::Low => "#FBBF24",
        Severity::Custom(_) => "#3B82F6",
    }
}

/// A map pin ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub color: &'static str,
    /// High severity pins pulse.
    pub pulse: bool,
    pub type_label: &'static str,
    pub popup_title: String,
    pub popup_body: String,
    pub popup_footer: String,
}

#[must_use]
pub fn render_marker(marker: &MapMarker) -> MarkerView {
    MarkerView {
        id: marker.id.clone(),
        lat: marker.lat,
        lng: marker.lng,
        color: marker_color(&marker.severity),
        pulse: matches!(marker.severity, Severity::High),
        type_label: type_label(&marker.issue_type),
        popup_title: marker.title.clone(),
        popup_body: marker.description.clone(),
        popup_footer: format!("Reported: {}", marker.date_reported.format(DATE_FORMAT)),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> IssueRecord {
        IssueRecord {
            id: "1".to_string(),
            title: "Deep pothole causing vehicle damage".to_string(),
            description: "Approximately 2 feet wide and 8 inches deep.".to_string(),
            location: "Main St & 5th Ave intersection".to_string(),
            issue_type: IssueType::Pothole,
            severity: Severity::High,
            date_reported: Utc.with_ymd_and_hms(2023, 4, 10, 0, 0, 0).unwrap(),
            upvotes: 24,
            comments: 7,
            image_url: Some("https://example.com/pothole.jpg".to_string()),
            status: Status::Open,
        }
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label(&IssueType::Pothole), "Pothole");
        assert_eq!(type_label(&IssueType::Construction), "Incomplete Construction");
        assert_eq!(type_label(&IssueType::Accident), "Accident Prone Area");
        assert_eq!(type_label(&IssueType::Other), "Other Issue");
        assert_eq!(
            type_label(&IssueType::Custom("flooding".to_string())),
            "Other Issue"
        );
    }

    #[test]
    fn test_severity_badges() {
        let high = severity_badge(&Severity::High);
        assert_eq!(high.label, "High Severity");
        assert_eq!(high.tone, Tone::Red);
        assert_eq!(severity_badge(&Severity::Medium).tone, Tone::Orange);
        assert_eq!(severity_badge(&Severity::Low).tone, Tone::Yellow);

        let custom = severity_badge(&Severity::Custom("extreme".to_string()));
        assert_eq!(custom.label, "Extreme Severity");
        assert_eq!(custom.tone, Tone::Gray);
        assert_eq!(custom.class, "bg-muted text-muted-foreground");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(status_badge(&Status::Open).tone, Tone::Red);
        let in_progress = status_badge(&Status::InProgress);
        assert_eq!(in_progress.label, "in progress");
        assert_eq!(in_progress.tone, Tone::Blue);
        assert_eq!(status_badge(&Status::Resolved).tone, Tone::Green);

        let custom = status_badge(&Status::Custom("on-hold".to_string()));
        assert_eq!(custom.label, "on hold");
        assert_eq!(custom.tone, Tone::Gray);
        assert_eq!(custom.class, "bg-gray-100 text-gray-800 border-gray-200");
    }

    #[test]
    fn test_card_with_image_overlays_status() {
        let card = render_card(&record());
        assert_eq!(card.status_placement, BadgePlacement::ImageOverlay);
        let image = card.image.unwrap();
        assert_eq!(image.alt, "Deep pothole causing vehicle damage");
        assert_eq!(card.date_reported, "2023-04-10");
        assert_eq!(card.type_label, "Pothole");
        assert_eq!(card.upvotes, 24);
        assert_eq!(card.comments, 7);
        assert_eq!(card.status_value, Status::Open);
    }

    #[test]
    fn test_card_without_image_moves_status_to_header() {
        let mut issue = record();
        issue.image_url = None;
        let card = render_card(&issue);
        assert_eq!(card.status_placement, BadgePlacement::Header);
        assert!(card.image.is_none());

        issue.image_url = Some(String::new());
        assert_eq!(render_card(&issue).status_placement, BadgePlacement::Header);
    }

    #[test]
    fn test_card_is_total_over_unknown_values() {
        let mut issue = record();
        issue.issue_type = IssueType::Custom("".to_string());
        issue.severity = Severity::Custom("".to_string());
        issue.status = Status::Custom("".to_string());

        let card = render_card(&issue);
        assert_eq!(card.type_label, "Other Issue");
        assert_eq!(card.severity.tone, Tone::Gray);
        assert_eq!(card.severity.label, " Severity");
        assert_eq!(card.status.tone, Tone::Gray);
    }

    #[test]
    fn test_rendering_does_not_touch_record() {
        let issue = record();
        let before = issue.clone();
        let first = render_card(&issue);
        let second = render_card(&issue);
        assert_eq!(issue, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_markers_colour_and_pulse_by_severity() {
        let mut marker = MapMarker {
            id: "3".to_string(),
            lat: 40.7148,
            lng: -74.009,
            issue_type: IssueType::Accident,
            title: "Frequent accident zone".to_string(),
            description: "Five accidents in the past month".to_string(),
            severity: Severity::High,
            date_reported: Utc.with_ymd_and_hms(2023, 4, 12, 0, 0, 0).unwrap(),
        };
        let view = render_marker(&marker);
        assert_eq!(view.color, "#DC2626");
        assert!(view.pulse);
        assert_eq!(view.popup_footer, "Reported: 2023-04-12");

        marker.severity = Severity::Low;
        let view = render_marker(&marker);
        assert_eq!(view.color, "#FBBF24");
        assert!(!view.pulse);

        marker.severity = Severity::Custom("unknown".to_string());
        assert_eq!(render_marker(&marker).color, "#3B82F6");
    }
}
