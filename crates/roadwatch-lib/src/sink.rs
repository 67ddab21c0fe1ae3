//! Where accepted reports go.
//!
//! A [`SubmissionSink`] takes a composed payload and answers with the
//! record id it assigned. The sinks here stand in for a real backend:
//! [`LogSink`] writes the payload to the log and [`MemorySink`] keeps it
//! in memory. Both honour the idempotency key, so a retried submission
//! gets the id of the first attempt instead of a duplicate record.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::model::IssueRecord;

/// A composed report on its way to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// The record to create. `id` is empty until the sink assigns one.
    pub record: IssueRecord,
    pub idempotency_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
}

/// Accepts composed reports.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Accept a report and return its record id.
    ///
    /// # Errors
    ///
    /// Returns `Submission` if the report cannot be accepted; the
    /// `retryable` flag tells the caller whether trying again may work.
    async fn submit(&self, submission: &Submission) -> Result<String>;
}

#[derive(Debug, Default)]
struct Allocations {
    ids: HashSet<String>,
    by_key: HashMap<String, String>,
}

/// Hands out record ids and remembers which key got which id.
#[derive(Debug)]
struct IdAllocator {
    prefix: String,
    state: Mutex<Allocations>,
}

impl IdAllocator {
    fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: Mutex::new(Allocations::default()),
        }
    }

    /// Returns the id and whether it was newly assigned.
    fn assign(&self, submission: &Submission) -> Result<(String, bool)> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ReportError::submission("id allocator lock poisoned", false))?;

        if let Some(id) = state.by_key.get(&submission.idempotency_key) {
            tracing::debug!(%id, "Duplicate submission; reusing id");
            return Ok((id.clone(), false));
        }

        let record = &submission.record;
        let id = crate::util::generate_id(
            &self.prefix,
            &record.title,
            &record.location,
            record.date_reported,
            state.ids.len(),
            |id| state.ids.contains(id),
        );
        state.ids.insert(id.clone());
        state
            .by_key
            .insert(submission.idempotency_key.clone(), id.clone());
        Ok((id, true))
    }
}

/// Logs each accepted payload as JSON.
#[derive(Debug)]
pub struct LogSink {
    ids: IdAllocator,
}

impl LogSink {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            ids: IdAllocator::new(prefix),
        }
    }
}

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, submission: &Submission) -> Result<String> {
        let (id, fresh) = self.ids.assign(submission)?;
        if fresh {
            let mut logged = submission.clone();
            logged.record.id.clone_from(&id);
            let payload = serde_json::to_string(&logged)?;
            tracing::info!(%id, %payload, "Report submitted");
        }
        Ok(id)
    }
}

/// Keeps accepted records in memory.
#[derive(Debug)]
pub struct MemorySink {
    ids: IdAllocator,
    records: Mutex<Vec<IssueRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            ids: IdAllocator::new(prefix),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of every accepted record, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<IssueRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn submit(&self, submission: &Submission) -> Result<String> {
        let (id, fresh) = self.ids.assign(submission)?;
        if fresh {
            let mut record = submission.record.clone();
            record.id.clone_from(&id);
            self.records
                .lock()
                .map_err(|_| ReportError::submission("record store lock poisoned", false))?
                .push(record);
            tracing::debug!(%id, "Report stored in memory");
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueType, Severity, Status};
    use chrono::{TimeZone, Utc};

    fn submission(key: &str, title: &str) -> Submission {
        Submission {
            record: IssueRecord {
                id: String::new(),
                title: title.to_string(),
                description: "Deep enough to lose a wheel".to_string(),
                location: "Main St".to_string(),
                issue_type: IssueType::Pothole,
                severity: Severity::High,
                date_reported: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
                upvotes: 0,
                comments: 0,
                image_url: None,
                status: Status::Open,
            },
            idempotency_key: key.to_string(),
            reporter: None,
        }
    }

    #[tokio::test]
    async fn test_memory_sink_assigns_prefixed_ids() {
        let sink = MemorySink::new("rw");
        let id = sink.submit(&submission("k1", "Deep pothole")).await.unwrap();

        assert!(id.starts_with("rw-"));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
    }

    #[tokio::test]
    async fn test_resubmitting_same_key_returns_same_id() {
        let sink = MemorySink::new("rw");
        let first = sink.submit(&submission("k1", "Deep pothole")).await.unwrap();
        let retry = sink.submit(&submission("k1", "Deep pothole")).await.unwrap();

        assert_eq!(first, retry);
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_identical_content_with_new_key_gets_new_id() {
        let sink = MemorySink::new("rw");
        let first = sink.submit(&submission("k1", "Deep pothole")).await.unwrap();
        let second = sink.submit(&submission("k2", "Deep pothole")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_log_sink_is_idempotent_too() {
        let sink = LogSink::new("city");
        let first = sink.submit(&submission("k1", "Broken curb")).await.unwrap();
        let retry = sink.submit(&submission("k1", "Broken curb")).await.unwrap();

        assert!(first.starts_with("city-"));
        assert_eq!(first, retry);
    }

    #[test]
    fn test_submission_json_omits_anonymous_reporter() {
        let json = serde_json::to_value(submission("k1", "Deep pothole")).unwrap();
        assert!(json.get("reporter").is_none());
        assert_eq!(json["idempotencyKey"], "k1");
        assert_eq!(json["record"]["type"], "pothole");
    }
}
