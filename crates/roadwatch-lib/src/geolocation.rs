//! Current-position lookup for the location field.
//!
//! The host's geolocation capability is injected as a
//! [`GeolocationProvider`]; the resolver only formats the fix and decides
//! which warning to surface when there is none.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Coordinates, IssueDraft};
use crate::notify::Notice;

/// Errors a geolocation provider can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeoError {
    /// The user refused to share their position.
    #[error("permission denied")]
    PermissionDenied,

    /// The host tried but could not determine a position.
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    /// No fix arrived before the deadline.
    #[error("timed out waiting for position")]
    Timeout,

    /// The host has no geolocation capability.
    #[error("geolocation not supported")]
    Unsupported,
}

/// Options for a single position request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct PositionOptions {
    /// Give up after this long. `None` waits for the provider.
    pub timeout: Option<Duration>,
}

impl PositionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A source of the user's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Request the current position once.
    ///
    /// # Errors
    ///
    /// Returns a `GeoError` when no position can be produced.
    async fn request_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<Coordinates, GeoError>;
}

/// Always answers with the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn request_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// A host without geolocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    async fn request_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<Coordinates, GeoError> {
        Err(GeoError::Unsupported)
    }
}

/// Why the location field could not be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The capability exists but produced no position.
    Unavailable,
    /// The host has no geolocation capability.
    Unsupported,
}

/// A recoverable geolocation failure to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationWarning {
    pub kind: WarningKind,
    pub cause: GeoError,
}

impl GeolocationWarning {
    #[must_use]
    pub fn from_error(cause: GeoError) -> Self {
        let kind = match cause {
            GeoError::Unsupported => WarningKind::Unsupported,
            GeoError::PermissionDenied | GeoError::PositionUnavailable(_) | GeoError::Timeout => {
                WarningKind::Unavailable
            }
        };
        Self { kind, cause }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        match self.kind {
            WarningKind::Unavailable => Notice::location_unavailable(),
            WarningKind::Unsupported => Notice::geolocation_unsupported(),
        }
    }
}

/// Fills the draft's location from the current position.
pub struct GeolocationResolver<P> {
    provider: P,
    options: PositionOptions,
}

impl<P: GeolocationProvider> GeolocationResolver<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: PositionOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Request one position and format it as location text.
    ///
    /// # Errors
    ///
    /// Returns a `GeolocationWarning` if the provider fails or the
    /// configured timeout elapses.
    pub async fn resolve(&self) -> std::result::Result<String, GeolocationWarning> {
        let request = self.provider.request_position(&self.options);
        let result = match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(GeoError::Timeout)),
            None => request.await,
        };

        match result {
            Ok(coords) => Ok(coords.location_label()),
            Err(cause) => {
                tracing::warn!(error = %cause, "Could not resolve current position");
                Err(GeolocationWarning::from_error(cause))
            }
        }
    }

    /// Overwrite the draft's location with the current position.
    ///
    /// On failure the draft is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a `GeolocationWarning` describing why no position was found.
    pub async fn resolve_into(
        &self,
        draft: &mut IssueDraft,
    ) -> std::result::Result<(), GeolocationWarning> {
        let label = self.resolve().await?;
        tracing::debug!(location = %label, "Location filled from current position");
        draft.location = label;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Denied;

    #[async_trait]
    impl GeolocationProvider for Denied {
        async fn request_position(
            &self,
            _options: &PositionOptions,
        ) -> std::result::Result<Coordinates, GeoError> {
            Err(GeoError::PermissionDenied)
        }
    }

    struct Stalled;

    #[async_trait]
    impl GeolocationProvider for Stalled {
        async fn request_position(
            &self,
            _options: &PositionOptions,
        ) -> std::result::Result<Coordinates, GeoError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinates::new(0.0, 0.0))
        }
    }

    #[tokio::test]
    async fn test_success_overwrites_manual_location() {
        let mut draft = IssueDraft {
            location: "somewhere downtown".to_string(),
            ..Default::default()
        };
        let resolver = GeolocationResolver::new(FixedPosition(Coordinates::new(40.7128, -74.006)));

        resolver.resolve_into(&mut draft).await.unwrap();
        assert_eq!(draft.location, "Lat: 40.712800, Lng: -74.006000");
    }

    #[tokio::test]
    async fn test_denial_leaves_draft_untouched() {
        let mut draft = IssueDraft {
            location: "Main St".to_string(),
            ..Default::default()
        };
        let warning = GeolocationResolver::new(Denied)
            .resolve_into(&mut draft)
            .await
            .unwrap_err();

        assert_eq!(warning.kind, WarningKind::Unavailable);
        assert_eq!(warning.notice().title, "Could not get location");
        assert_eq!(draft.location, "Main St");
    }

    #[tokio::test]
    async fn test_missing_capability_is_distinguished() {
        let warning = GeolocationResolver::new(NoGeolocation)
            .resolve()
            .await
            .unwrap_err();
        assert_eq!(warning.kind, WarningKind::Unsupported);
        assert_eq!(warning.notice().title, "Geolocation not supported");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_as_unavailable() {
        let resolver = GeolocationResolver::new(Stalled)
            .with_options(PositionOptions::new().timeout(Duration::from_secs(5)));
        let warning = resolver.resolve().await.unwrap_err();
        assert_eq!(warning.cause, GeoError::Timeout);
        assert_eq!(warning.kind, WarningKind::Unavailable);
    }
}
