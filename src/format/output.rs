use roadwatch_lib::render::{IssueCard, MarkerView};
use roadwatch_lib::{FieldErrors, Hotspot, IssueRecord, Notice};
use serde::Serialize;

/// Result of `rw report`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportOutput {
    Accepted {
        record: IssueRecord,
        card: IssueCard,
        notices: Vec<Notice>,
    },
    Rejected {
        errors: FieldErrors,
        notices: Vec<Notice>,
    },
}

/// Map view for `rw map`.
#[derive(Debug, Clone, Serialize)]
pub struct MapOutput {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<MarkerView>,
}

/// Dashboard hotspots for `rw hotspots`.
#[derive(Debug, Clone, Serialize)]
pub struct HotspotsOutput {
    pub hotspots: Vec<Hotspot>,
    pub total_incidents: u32,
}

impl HotspotsOutput {
    #[must_use]
    pub fn new(hotspots: Vec<Hotspot>) -> Self {
        let total_incidents = hotspots.iter().map(|h| h.incidents).sum();
        Self {
            hotspots,
            total_incidents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionOutput<'a> {
    pub version: &'a str,
    pub build: &'a str,
    pub library: &'a str,
}
