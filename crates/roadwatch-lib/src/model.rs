//! Core data types for roadwatch-lib.
//!
//! Record JSON uses the camelCase field names the list and map views
//! consume (`dateReported`, `imageUrl`, `type`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Road issue category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Pothole,
    Construction,
    Accident,
    Other,
    #[serde(untagged)]
    Custom(String),
}

impl IssueType {
    pub const STANDARD: [Self; 4] = [
        Self::Pothole,
        Self::Construction,
        Self::Accident,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pothole => "pothole",
            Self::Construction => "construction",
            Self::Accident => "accident",
            Self::Other => "other",
            Self::Custom(value) => value,
        }
    }

    #[must_use]
    pub const fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = crate::error::ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_lowercase().as_str() {
            "pothole" => Ok(Self::Pothole),
            "construction" => Ok(Self::Construction),
            "accident" => Ok(Self::Accident),
            "other" => Ok(Self::Other),
            _ => Ok(Self::Custom(value.to_string())),
        }
    }
}

/// How urgently an issue needs attention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    #[serde(untagged)]
    Custom(String),
}

impl Severity {
    pub const STANDARD: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Custom(value) => value,
        }
    }

    #[must_use]
    pub const fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = crate::error::ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Ok(Self::Custom(value.to_string())),
        }
    }
}

/// Issue workflow status.
///
/// Standard statuses only move forward: open -> in-progress -> resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    #[serde(untagged)]
    Custom(String),
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Custom(value) => value,
        }
    }

    /// Position in the workflow; `None` for custom statuses.
    #[must_use]
    pub const fn rank(&self) -> Option<u8> {
        match self {
            Self::Open => Some(0),
            Self::InProgress => Some(1),
            Self::Resolved => Some(2),
            Self::Custom(_) => None,
        }
    }

    /// True when moving to `next` advances the workflow.
    #[must_use]
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self.rank(), next.rank()) {
            (Some(current), Some(next)) => next > current,
            _ => false,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(crate::error::ReportError::InvalidStatus {
                status: value.to_string(),
            }),
        }
    }
}

/// A field of the report form that the validator checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    Location,
    Type,
    Severity,
}

impl DraftField {
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Location,
        Self::Type,
        Self::Severity,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Location => "location",
            Self::Type => "type",
            Self::Severity => "severity",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image attachment encoded for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// `data:<mime>;base64,<payload>`.
    pub data_url: String,
    pub mime_type: String,
    /// Size of the source file in bytes.
    pub byte_len: u64,
}

/// In-progress report held by a form session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `None` until the user picks a type.
    pub issue_type: Option<IssueType>,
    /// `None` until the user picks a severity.
    pub severity: Option<Severity>,
    pub image: Option<EncodedImage>,
}

impl IssueDraft {
    /// Apply one field edit. Select values are parsed; unknown values are
    /// kept as custom so the validator can report them.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Title => value.clone_into(&mut self.title),
            DraftField::Description => value.clone_into(&mut self.description),
            DraftField::Location => value.clone_into(&mut self.location),
            DraftField::Type => {
                self.issue_type = if value.trim().is_empty() {
                    None
                } else {
                    value.parse().ok()
                };
            }
            DraftField::Severity => {
                self.severity = if value.trim().is_empty() {
                    None
                } else {
                    value.parse().ok()
                };
            }
        }
    }

    /// True when nothing has been entered or selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.location.is_empty()
            && self.issue_type.is_none()
            && self.severity.is_none()
            && self.image.is_none()
    }
}

/// A finalized issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    /// Assigned by the submission sink, never by the form.
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub date_reported: DateTime<Utc>,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl IssueRecord {
    /// Move the record forward in the workflow.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if `next` does not rank above the
    /// current status, or either status is custom.
    pub fn advance_status(&mut self, next: Status) -> crate::error::Result<()> {
        if !self.status.can_transition_to(&next) {
            return Err(crate::error::ReportError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        tracing::debug!(id = %self.id, from = %self.status, to = %next, "Status advanced");
        self.status = next;
        Ok(())
    }
}

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;

    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when `value` is finite and within `-limit..=limit`.
    #[must_use]
    pub const fn within(value: f64, limit: f64) -> bool {
        value.is_finite() && value.abs() <= limit
    }

    /// True when both axes are finite and on the globe.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        Self::within(self.latitude, Self::MAX_LATITUDE)
            && Self::within(self.longitude, Self::MAX_LONGITUDE)
    }

    /// Location text written into the form, six decimal places.
    #[must_use]
    pub fn location_label(&self) -> String {
        format!("Lat: {:.6}, Lng: {:.6}", self.latitude, self.longitude)
    }
}

/// A pin on the city map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub date_reported: DateTime<Utc>,
}

/// A named location with an aggregated incident count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub name: String,
    pub incidents: u32,
    pub severity: Severity,
    pub description: String,
}
