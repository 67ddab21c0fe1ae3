//! `roadwatch-lib` — In-process road issue reporting core.
//!
//! Everything the report form needs, without a UI or a backend:
//! validation of the draft, image attachment encoding, geolocation,
//! the submission state machine, and the read-only card projection
//! used by list and map views.
//!
//! # Quick Start
//!
//! ```no_run
//! use roadwatch_lib::{
//!     CollectingNotifier, DraftDefaults, DraftField, FormSession, MemorySink, Outcome, Session,
//!     SubmissionContext,
//! };
//!
//! # async fn demo() -> roadwatch_lib::Result<()> {
//! let mut form = FormSession::new(DraftDefaults::default());
//! form.set_field(DraftField::Title, "Large pothole here");
//! form.set_field(DraftField::Description, "It is very deep and dangerous");
//! form.set_field(DraftField::Location, "Main St");
//! form.set_field(DraftField::Type, "pothole");
//! form.set_field(DraftField::Severity, "high");
//!
//! let sink = MemorySink::new("rw");
//! let notifier = CollectingNotifier::default();
//! let session = Session::anonymous();
//! let ctx = SubmissionContext::new(&sink, &notifier, &session);
//!
//! if let Outcome::Accepted(record) = form.submit(&ctx).await? {
//!     println!("reported {}", record.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geolocation;
pub mod image;
pub mod model;
pub mod notify;
pub mod render;
pub mod sample;
pub mod session;
pub mod sink;
pub mod submission;
pub mod util;
pub mod validation;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{FieldErrors, ReportError, Result, ValidationError};
pub use geolocation::{
    FixedPosition, GeoError, GeolocationProvider, GeolocationResolver, GeolocationWarning,
    NoGeolocation, PositionOptions,
};
pub use image::{FileReader, ImageEncoder, TokioFileReader};
pub use model::{
    Coordinates, DraftField, EncodedImage, Hotspot, IssueDraft, IssueRecord, IssueType, MapMarker,
    Severity, Status,
};
pub use notify::{CollectingNotifier, Notice, NoticeVariant, Notifier, TracingNotifier};
pub use render::{IssueCard, MarkerView, render_card, render_marker};
pub use sample::{IssueFilter, MapView};
pub use session::Session;
pub use sink::{LogSink, MemorySink, Submission, SubmissionSink};
pub use submission::{DraftDefaults, FormSession, Outcome, SubmissionContext, SubmissionState};
pub use validation::{IssueValidator, ValidatedIssue, ValidationResult};
