//! `roadwatch` - Road issue reporting from the command line.
//!
//! This crate provides the `rw` binary on top of `roadwatch-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - YAML configuration with environment overrides
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - Tracing subscriber setup

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the command fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
