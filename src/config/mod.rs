//! Configuration management for `roadwatch`.
//!
//! Configuration is loaded from a single YAML file, the first found of:
//! - the `--config` path
//! - workspace config (`.roadwatch/config.yaml`)
//! - user config (`~/.config/roadwatch/config.yaml`)
//!
//! `ROADWATCH_*` environment variables override the file; command-line
//! flags override both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use roadwatch_lib::{Coordinates, DraftDefaults, IssueType, PositionOptions, Severity};
use serde::Deserialize;
use thiserror::Error;

pub const WORKSPACE_CONFIG: &str = ".roadwatch/config.yaml";
pub const DEFAULT_ID_PREFIX: &str = "rw";
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub default_issue_type: Option<String>,
    pub default_severity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Reject attachments larger than this. Unset means no cap.
    pub max_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeolocationConfig {
    pub timeout_secs: u64,
    /// Fixed position reported by `--use-current-location` when no
    /// coordinates are given on the command line.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_GEOLOCATION_TIMEOUT_SECS,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionConfig {
    pub id_prefix: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub json: bool,
}

/// Resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub form: FormConfig,
    pub image: ImageConfig,
    pub geolocation: GeolocationConfig,
    pub submission: SubmissionConfig,
    pub logging: LoggingConfig,
    /// File the values came from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load the first config file found and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, a file cannot
    /// be read or parsed, or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match find_config_file(explicit)? {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::debug!("No config file found; using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config from YAML text. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid config YAML.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Apply `ROADWATCH_*` overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a numeric or boolean variable does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ROADWATCH_DEFAULT_TYPE") {
            self.form.default_issue_type = Some(value);
        }
        if let Some(value) = lookup("ROADWATCH_DEFAULT_SEVERITY") {
            self.form.default_severity = Some(value);
        }
        if let Some(value) = lookup("ROADWATCH_ID_PREFIX") {
            self.submission.id_prefix = value;
        }
        if let Some(value) = lookup("ROADWATCH_IMAGE_MAX_BYTES") {
            let bytes = value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "ROADWATCH_IMAGE_MAX_BYTES",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            self.image.max_bytes = Some(bytes);
        }
        if let Some(value) = lookup("ROADWATCH_LOG_JSON") {
            self.logging.json = parse_bool("ROADWATCH_LOG_JSON", &value)?;
        }
        Ok(())
    }

    /// Check values that YAML alone cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for the first bad value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.draft_defaults()?;
        if self.submission.id_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "submission.id_prefix",
                value: self.submission.id_prefix.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.geolocation.latitude.is_some() != self.geolocation.longitude.is_some() {
            return Err(ConfigError::InvalidValue {
                key: "geolocation",
                value: format!(
                    "latitude={:?}, longitude={:?}",
                    self.geolocation.latitude, self.geolocation.longitude
                ),
                reason: "latitude and longitude must be set together".to_string(),
            });
        }
        if let Some(position) = self.fixed_position().filter(|p| !p.is_valid()) {
            return Err(ConfigError::InvalidValue {
                key: "geolocation",
                value: format!(
                    "latitude={}, longitude={}",
                    position.latitude, position.longitude
                ),
                reason: "latitude must be within ±90 and longitude within ±180".to_string(),
            });
        }
        Ok(())
    }

    /// Initial type and severity for a new draft.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a configured default is not a standard value.
    pub fn draft_defaults(&self) -> Result<DraftDefaults, ConfigError> {
        let issue_type = self
            .form
            .default_issue_type
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                parse_standard::<IssueType>("form.default_issue_type", v, IssueType::is_standard)
            })
            .transpose()?;
        let severity = self
            .form
            .default_severity
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                parse_standard::<Severity>("form.default_severity", v, Severity::is_standard)
            })
            .transpose()?;
        Ok(DraftDefaults {
            issue_type,
            severity,
        })
    }

    #[must_use]
    pub fn position_options(&self) -> PositionOptions {
        let options = PositionOptions::new();
        if self.geolocation.timeout_secs == 0 {
            options
        } else {
            options.timeout(Duration::from_secs(self.geolocation.timeout_secs))
        }
    }

    /// Position configured for `--use-current-location`, if any.
    #[must_use]
    pub fn fixed_position(&self) -> Option<Coordinates> {
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

fn parse_standard<T>(
    key: &'static str,
    value: &str,
    is_standard: fn(&T) -> bool,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if is_standard(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "not a known value".to_string(),
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// User config path under `$HOME`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config/roadwatch/config.yaml"))
}

/// Locate the config file to load.
///
/// # Errors
///
/// Returns `NotFound` if an explicit path was given but does not exist.
pub fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let workspace = PathBuf::from(WORKSPACE_CONFIG);
    if workspace.is_file() {
        return Ok(Some(workspace));
    }

    Ok(user_config_path().filter(|path| path.is_file()))
}
