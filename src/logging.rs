//! Tracing subscriber setup for the `rw` binary.
//!
//! Logs go to stderr so `--json` output on stdout stays clean.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Default filter directive for the given verbosity flags.
#[must_use]
pub fn default_filter(verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    format!("roadwatch={level},roadwatch_lib={level}")
}

/// Install the global subscriber. `RUST_LOG` overrides the flags.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    format: Option<LogFormat>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    match format.unwrap_or_default() {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose > 1)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_maps_to_levels() {
        assert_eq!(default_filter(0, false), "roadwatch=warn,roadwatch_lib=warn");
        assert_eq!(default_filter(1, false), "roadwatch=info,roadwatch_lib=info");
        assert_eq!(default_filter(2, false), "roadwatch=debug,roadwatch_lib=debug");
        assert_eq!(default_filter(7, false), "roadwatch=trace,roadwatch_lib=trace");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(default_filter(3, true), "roadwatch=error,roadwatch_lib=error");
    }
}
