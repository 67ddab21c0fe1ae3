//! Validation of report drafts.
//!
//! The validator turns an [`IssueDraft`] into either a [`ValidatedIssue`]
//! or the full set of field errors. It never mutates the draft.

use crate::error::{FieldErrors, ValidationError};
use crate::model::{DraftField, EncodedImage, IssueDraft, IssueType, Severity};

pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MIN_LOCATION_CHARS: usize = 5;

/// A draft whose fields satisfy every form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIssue {
    pub title: String,
    pub description: String,
    pub location: String,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub image: Option<EncodedImage>,
}

/// Outcome of validating one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(ValidatedIssue),
    Invalid(FieldErrors),
}

impl ValidationResult {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Errors for an invalid result; empty for a valid one.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid(_) => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }
}

/// Validates report drafts.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a draft and collect every violated rule.
    #[must_use]
    pub fn validate(draft: &IssueDraft) -> ValidationResult {
        let mut errors = Vec::new();

        // Title: at least 5 characters.
        if draft.title.chars().count() < MIN_TITLE_CHARS {
            errors.push(ValidationError::new(
                DraftField::Title,
                format!("Title must be at least {MIN_TITLE_CHARS} characters."),
            ));
        }

        // Description: at least 10 characters.
        if draft.description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(ValidationError::new(
                DraftField::Description,
                format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters."),
            ));
        }

        // Location: at least 5 characters.
        if draft.location.chars().count() < MIN_LOCATION_CHARS {
            errors.push(ValidationError::new(
                DraftField::Location,
                format!("Location must be at least {MIN_LOCATION_CHARS} characters."),
            ));
        }

        // Type: required, one of the standard categories.
        let issue_type = match &draft.issue_type {
            None => {
                errors.push(ValidationError::new(
                    DraftField::Type,
                    "Please select an issue type.",
                ));
                None
            }
            Some(IssueType::Custom(value)) => {
                errors.push(ValidationError::new(
                    DraftField::Type,
                    format!("Unknown issue type '{value}'."),
                ));
                None
            }
            Some(issue_type) => Some(issue_type.clone()),
        };

        // Severity: required, one of low/medium/high.
        let severity = match &draft.severity {
            None => {
                errors.push(ValidationError::new(
                    DraftField::Severity,
                    "Please select a severity level.",
                ));
                None
            }
            Some(Severity::Custom(value)) => {
                errors.push(ValidationError::new(
                    DraftField::Severity,
                    format!("Unknown severity '{value}'."),
                ));
                None
            }
            Some(severity) => Some(severity.clone()),
        };

        match (issue_type, severity) {
            (Some(issue_type), Some(severity)) if errors.is_empty() => {
                ValidationResult::Valid(ValidatedIssue {
                    title: draft.title.clone(),
                    description: draft.description.clone(),
                    location: draft.location.clone(),
                    issue_type,
                    severity,
                    image: draft.image.clone(),
                })
            }
            _ => ValidationResult::Invalid(FieldErrors::from(errors)),
        }
    }
}
