//! The report form session and its submission state machine.
//!
//! ```text
//! Idle -> Validating -> Invalid ----------------------------> Idle (errors shown)
//!                    -> Valid -> Composing -> sink -> Notifying -> Idle (draft reset)
//!                                               \-> sink error -> Idle (draft kept)
//! ```
//!
//! A rejected or failed submission never discards what the user typed.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{FieldErrors, Result};
use crate::geolocation::{GeolocationProvider, GeolocationResolver};
use crate::image::{FileReader, ImageEncoder};
use crate::model::{DraftField, IssueDraft, IssueRecord, IssueType, Severity, Status};
use crate::notify::{Notice, Notifier};
use crate::session::Session;
use crate::sink::{Submission, SubmissionSink};
use crate::validation::{IssueValidator, ValidatedIssue, ValidationResult};

/// Preselected values for a fresh draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftDefaults {
    pub issue_type: Option<IssueType>,
    pub severity: Option<Severity>,
}

impl DraftDefaults {
    #[must_use]
    pub fn draft(&self) -> IssueDraft {
        IssueDraft {
            issue_type: self.issue_type.clone(),
            severity: self.severity.clone(),
            ..IssueDraft::default()
        }
    }
}

/// Where a form session is in the submission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Composing,
    Notifying,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The report was accepted; the record carries the sink-assigned id.
    Accepted(IssueRecord),
    /// The draft failed validation and was kept as is.
    Rejected(FieldErrors),
}

/// Collaborators a submission needs.
#[derive(Clone, Copy)]
pub struct SubmissionContext<'a> {
    pub sink: &'a dyn SubmissionSink,
    pub notifier: &'a dyn Notifier,
    pub session: &'a Session,
}

impl<'a> SubmissionContext<'a> {
    #[must_use]
    pub fn new(
        sink: &'a dyn SubmissionSink,
        notifier: &'a dyn Notifier,
        session: &'a Session,
    ) -> Self {
        Self {
            sink,
            notifier,
            session,
        }
    }
}

/// A failed attempt, kept so a retry reuses its idempotency key.
#[derive(Debug, Clone)]
struct PendingAttempt {
    issue: ValidatedIssue,
    submitted_at: DateTime<Utc>,
    key: String,
}

/// One open report form.
#[derive(Debug)]
pub struct FormSession {
    draft: IssueDraft,
    errors: FieldErrors,
    state: SubmissionState,
    defaults: DraftDefaults,
    pending: Option<PendingAttempt>,
}

impl FormSession {
    /// Mount a form with a fresh draft.
    #[must_use]
    pub fn new(defaults: DraftDefaults) -> Self {
        Self {
            draft: defaults.draft(),
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            defaults,
            pending: None,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &IssueDraft {
        &self.draft
    }

    /// Errors from the last rejected attempt.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn set_field(&mut self, field: DraftField, value: &str) {
        self.draft.set_field(field, value);
    }

    /// Encode the selected image and attach it, replacing any previous one.
    ///
    /// No selection leaves the draft as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or exceeds the cap;
    /// the current image is kept in that case.
    pub async fn select_image<R: FileReader>(
        &mut self,
        encoder: &ImageEncoder<R>,
        selection: Option<&Path>,
    ) -> Result<()> {
        if let Some(image) = encoder.encode(selection).await? {
            self.draft.image = Some(image);
        }
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.draft.image = None;
    }

    /// Fill the location from the current position.
    ///
    /// Returns `false` and emits a warning notice when no position is
    /// available; the location field is unchanged in that case.
    pub async fn use_current_location<P: GeolocationProvider>(
        &mut self,
        resolver: &GeolocationResolver<P>,
        notifier: &dyn Notifier,
    ) -> bool {
        match resolver.resolve_into(&mut self.draft).await {
            Ok(()) => true,
            Err(warning) => {
                notifier.notify(warning.notice());
                false
            }
        }
    }

    /// Discard the draft and start over with the defaults.
    pub fn reset(&mut self) {
        self.draft = self.defaults.draft();
        self.errors.clear();
        self.pending = None;
        self.state = SubmissionState::Idle;
    }

    /// Same as [`reset`](Self::reset); the user abandoned the form.
    pub fn cancel(&mut self) {
        tracing::debug!("Report cancelled");
        self.reset();
    }

    /// Validate the draft and, if it passes, hand it to the sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if it cannot accept the report. The draft
    /// is preserved and a later retry of the same draft reuses the
    /// idempotency key.
    pub async fn submit(&mut self, ctx: &SubmissionContext<'_>) -> Result<Outcome> {
        self.transition(SubmissionState::Validating);
        let issue = match IssueValidator::validate(&self.draft) {
            ValidationResult::Invalid(errors) => {
                tracing::debug!(fields = ?errors.fields(), "Report rejected");
                self.errors = errors.clone();
                self.transition(SubmissionState::Idle);
                return Ok(Outcome::Rejected(errors));
            }
            ValidationResult::Valid(issue) => issue,
        };
        self.errors.clear();

        self.transition(SubmissionState::Composing);
        let (submitted_at, key) = match &self.pending {
            Some(attempt) if attempt.issue == issue => {
                tracing::debug!("Retrying previous attempt");
                (attempt.submitted_at, attempt.key.clone())
            }
            _ => {
                let now = Utc::now();
                (now, crate::util::idempotency_key(&issue, now))
            }
        };
        let mut submission = Submission {
            record: compose_record(&issue, submitted_at),
            idempotency_key: key.clone(),
            reporter: ctx.session.user().map(str::to_string),
        };

        let id = match ctx.sink.submit(&submission).await {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(error = %err, retryable = err.is_retryable(), "Submission failed");
                self.pending = Some(PendingAttempt {
                    issue,
                    submitted_at,
                    key,
                });
                self.transition(SubmissionState::Idle);
                return Err(err);
            }
        };
        submission.record.id = id;

        self.transition(SubmissionState::Notifying);
        ctx.notifier.notify(Notice::issue_reported());

        self.reset();
        Ok(Outcome::Accepted(submission.record))
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::trace!(from = ?self.state, to = ?next, "Form state");
        self.state = next;
    }
}

/// Build the record for a validated issue with server-side defaults.
fn compose_record(issue: &ValidatedIssue, submitted_at: DateTime<Utc>) -> IssueRecord {
    IssueRecord {
        id: String::new(),
        title: issue.title.clone(),
        description: issue.description.clone(),
        location: issue.location.clone(),
        issue_type: issue.issue_type.clone(),
        severity: issue.severity.clone(),
        date_reported: submitted_at,
        upvotes: 0,
        comments: 0,
        image_url: issue.image.as_ref().map(|image| image.data_url.clone()),
        status: Status::Open,
    }
}
