//! Error types for `roadwatch-lib`.
//!
//! Field validation failures are ordinary data ([`FieldErrors`]) carried
//! by a rejected submission; `ReportError` covers everything that stops
//! an operation outright.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DraftField;

/// Primary error type for roadwatch-lib operations.
#[derive(Error, Debug)]
pub enum ReportError {
    // === Status Errors ===
    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Status change that would move the workflow backwards.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    // === Lookup Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Attachment Errors ===
    /// Selected image exceeds the configured size cap.
    #[error("Image too large: {path} is {size} bytes (limit {limit})")]
    ImageTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    // === Submission Errors ===
    /// The submission sink refused or failed to take the payload.
    #[error("Submission failed: {reason}")]
    Submission { reason: String, retryable: bool },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: DraftField,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Field-keyed validation messages, one per failing field.
///
/// Ordered by form position so every consumer lists errors the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field. A later message for the same field wins.
    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Failing fields in form order.
    #[must_use]
    pub fn fields(&self) -> Vec<DraftField> {
        self.0.keys().copied().collect()
    }
}

impl From<Vec<ValidationError>> for FieldErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        let mut map = Self::new();
        for err in errors {
            map.insert(err.field, err.message);
        }
        map
    }
}

impl ReportError {
    /// Build a submission failure.
    #[must_use]
    pub fn submission(reason: impl Into<String>, retryable: bool) -> Self {
        Self::Submission {
            reason: reason.into(),
            retryable,
        }
    }

    /// Whether retrying the same operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Submission { retryable, .. } => *retryable,
            Self::Io(_) => true,
            _ => false,
        }
    }
}

/// Result type using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;
