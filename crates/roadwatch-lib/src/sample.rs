//! Built-in sample data shown by the list, map and dashboard views.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{ReportError, Result};
use crate::model::{Hotspot, IssueRecord, IssueType, MapMarker, Severity, Status};

/// Initial viewport of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.006,
            zoom: 13,
        }
    }
}

/// Filter options for listing issues. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub issue_type: Option<IssueType>,
    pub severity: Option<Severity>,
    pub status: Option<Status>,
}

impl IssueFilter {
    #[must_use]
    pub fn matches(&self, record: &IssueRecord) -> bool {
        self.issue_type
            .as_ref()
            .is_none_or(|t| *t == record.issue_type)
            && self.severity.as_ref().is_none_or(|s| *s == record.severity)
            && self.status.as_ref().is_none_or(|s| *s == record.status)
    }

    #[must_use]
    pub fn apply(&self, records: Vec<IssueRecord>) -> Vec<IssueRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn unsplash(photo: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/{photo}?q=80&w=500&auto=format&fit=crop"
    ))
}

/// Recently reported issues on the home page.
#[must_use]
pub fn sample_issues() -> Vec<IssueRecord> {
    vec![
        IssueRecord {
            id: "1".to_string(),
            title: "Deep pothole causing vehicle damage".to_string(),
            description: "A large pothole near the intersection has damaged multiple vehicles. \
                          It's approximately 2 feet wide and 8 inches deep."
                .to_string(),
            location: "Main St & 5th Ave intersection".to_string(),
            issue_type: IssueType::Pothole,
            severity: Severity::High,
            date_reported: day(2023, 4, 10),
            upvotes: 24,
            comments: 7,
            image_url: unsplash("photo-1596726047970-af3fe860dae2"),
            status: Status::Open,
        },
        IssueRecord {
            id: "2".to_string(),
            title: "Abandoned construction site".to_string(),
            description: "This sidewalk construction has been abandoned for weeks. \
                          The site is dangerous for pedestrians and causing accessibility issues."
                .to_string(),
            location: "Highland Park, near Community Center".to_string(),
            issue_type: IssueType::Construction,
            severity: Severity::Medium,
            date_reported: day(2023, 4, 5),
            upvotes: 18,
            comments: 5,
            image_url: unsplash("photo-1503669678209-c68d00b3765d"),
            status: Status::InProgress,
        },
        IssueRecord {
            id: "3".to_string(),
            title: "Dangerous intersection".to_string(),
            description: "This intersection has had 5 accidents in the past month. \
                          Visibility is poor and there are no proper traffic signs."
                .to_string(),
            location: "Oak Street & River Road".to_string(),
            issue_type: IssueType::Accident,
            severity: Severity::High,
            date_reported: day(2023, 4, 12),
            upvotes: 42,
            comments: 12,
            image_url: unsplash("photo-1465447142348-e9952c393450"),
            status: Status::Open,
        },
    ]
}

/// Look up a sample issue by id.
///
/// # Errors
///
/// Returns `IssueNotFound` if no sample issue has that id.
pub fn find_issue(id: &str) -> Result<IssueRecord> {
    sample_issues()
        .into_iter()
        .find(|issue| issue.id == id)
        .ok_or_else(|| ReportError::IssueNotFound { id: id.to_string() })
}

/// Pins on the city map.
#[must_use]
pub fn map_markers() -> Vec<MapMarker> {
    vec![
        MapMarker {
            id: "1".to_string(),
            lat: 40.7128,
            lng: -74.006,
            issue_type: IssueType::Pothole,
            title: "Deep pothole on Main Street".to_string(),
            description: "A large pothole that has caused damage to multiple vehicles".to_string(),
            severity: Severity::High,
            date_reported: day(2023, 4, 10),
        },
        MapMarker {
            id: "2".to_string(),
            lat: 40.7138,
            lng: -74.008,
            issue_type: IssueType::Construction,
            title: "Incomplete sidewalk construction".to_string(),
            description: "Sidewalk construction has been abandoned for weeks".to_string(),
            severity: Severity::Medium,
            date_reported: day(2023, 4, 8),
        },
        MapMarker {
            id: "3".to_string(),
            lat: 40.7148,
            lng: -74.009,
            issue_type: IssueType::Accident,
            title: "Frequent accident zone".to_string(),
            description: "This intersection has had 5 accidents in the past month".to_string(),
            severity: Severity::High,
            date_reported: day(2023, 4, 12),
        },
    ]
}

fn hotspot(id: &str, name: &str, incidents: u32, severity: Severity, description: &str) -> Hotspot {
    Hotspot {
        id: id.to_string(),
        name: name.to_string(),
        incidents,
        severity,
        description: description.to_string(),
    }
}

/// Accident-prone locations on the dashboard.
#[must_use]
pub fn accident_hotspots() -> Vec<Hotspot> {
    vec![
        hotspot(
            "1",
            "Junction Road & Main Street",
            15,
            Severity::High,
            "Poor visibility at night, lack of proper signage",
        ),
        hotspot(
            "2",
            "Highway 101 Exit 24",
            8,
            Severity::Medium,
            "Sharp curve with inadequate warning signs",
        ),
        hotspot(
            "3",
            "Downtown Bridge Entrance",
            12,
            Severity::High,
            "Slippery when wet, no guard rails",
        ),
        hotspot(
            "4",
            "School Zone on Oak Avenue",
            6,
            Severity::Medium,
            "Speeding vehicles despite school zone warnings",
        ),
    ]
}
