//! User-facing notices.
//!
//! The form never prints; it hands [`Notice`]s to a [`Notifier`] and the
//! host decides how to show them.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    #[default]
    Default,
    /// Something the user has to act on.
    Destructive,
}

/// A short message with a title and a supporting line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Acknowledgment after an accepted report.
    #[must_use]
    pub fn issue_reported() -> Self {
        Self::new(
            "Issue reported successfully!",
            "City officials have been notified about this issue.",
        )
    }

    /// The host has a geolocation capability but could not get a fix.
    #[must_use]
    pub fn location_unavailable() -> Self {
        Self::destructive(
            "Could not get location",
            "Please enter your location manually.",
        )
    }

    /// The host has no geolocation capability at all.
    #[must_use]
    pub fn geolocation_unsupported() -> Self {
        Self::destructive(
            "Geolocation not supported",
            "Your browser does not support geolocation.",
        )
    }

    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self.variant, NoticeVariant::Destructive)
    }
}

/// Receives notices emitted by the form workflow.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Default => {
                tracing::info!(title = %notice.title, "{}", notice.description);
            }
            NoticeVariant::Destructive => {
                tracing::warn!(title = %notice.title, "{}", notice.description);
            }
        }
    }
}

/// Buffers notices until the host drains them.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    /// Take every buffered notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(title = %notice.title, "Notice queued");
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
