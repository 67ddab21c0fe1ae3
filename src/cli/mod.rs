//! Command-line interface for `roadwatch`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roadwatch_lib::{Coordinates, Session};

use crate::config::Config;
use crate::logging::{self, LogFormat};

/// `roadwatch` (rw) - Report road issues to the city.
#[derive(Parser, Debug)]
#[command(name = "rw")]
#[command(
    author,
    version,
    about = "Report potholes, abandoned construction and accident-prone spots",
    long_about = None,
    after_help = "Reports are validated locally and handed to the configured sink."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Signed-in user attached to reports
    #[arg(long, global = true, env = "ROADWATCH_USER")]
    pub user: Option<String>,

    /// Config file (default: .roadwatch/config.yaml, then ~/.config/roadwatch/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report a road issue
    Report(ReportArgs),

    /// List recently reported issues
    List(ListArgs),

    /// Show one issue card
    Show(ShowArgs),

    /// Show issue pins on the city map
    Map,

    /// Show accident hotspots
    Hotspots,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Short summary (at least 5 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// What is wrong (at least 10 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// Where it is (at least 5 characters)
    #[arg(long)]
    pub location: Option<String>,

    /// Issue type: pothole, construction, accident, other
    #[arg(long = "type")]
    pub type_: Option<String>,

    /// Severity: low, medium, high
    #[arg(long)]
    pub severity: Option<String>,

    /// Photo to attach
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fill the location from the current position
    #[arg(long)]
    pub use_current_location: bool,

    /// Latitude reported as the current position
    #[arg(
        long,
        requires = "use_current_location",
        requires = "lng",
        allow_negative_numbers = true,
        value_parser = parse_latitude
    )]
    pub lat: Option<f64>,

    /// Longitude reported as the current position
    #[arg(
        long,
        requires = "use_current_location",
        requires = "lat",
        allow_negative_numbers = true,
        value_parser = parse_longitude
    )]
    pub lng: Option<f64>,
}

fn parse_latitude(value: &str) -> Result<f64, String> {
    parse_coordinate(value, Coordinates::MAX_LATITUDE)
}

fn parse_longitude(value: &str) -> Result<f64, String> {
    parse_coordinate(value, Coordinates::MAX_LONGITUDE)
}

fn parse_coordinate(value: &str, limit: f64) -> Result<f64, String> {
    let parsed = value.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if Coordinates::within(parsed, limit) {
        Ok(parsed)
    } else {
        Err(format!("must be a finite number from -{limit} to {limit}"))
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by issue type
    #[arg(long = "type")]
    pub type_: Option<String>,

    /// Filter by severity
    #[arg(long)]
    pub severity: Option<String>,

    /// Filter by status: open, in-progress, resolved
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue id
    pub id: String,
}

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct CommandContext {
    pub json: bool,
    pub config: Config,
    pub session: Session,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = if config.logging.json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init_logging(cli.verbose, cli.quiet, Some(format))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    tracing::debug!(source = ?config.source, "Configuration resolved");

    let ctx = CommandContext {
        json: cli.json,
        config,
        session: Session::start(cli.user),
    };

    match cli.command {
        Some(Commands::Report(args)) => commands::report::execute(&args, &ctx),
        Some(Commands::List(args)) => commands::list::execute(&args, &ctx),
        Some(Commands::Show(args)) => commands::show::execute(&args.id, &ctx),
        Some(Commands::Map) => commands::map::execute(&ctx),
        Some(Commands::Hotspots) => commands::hotspots::execute(&ctx),
        Some(Commands::Version) => commands::version::execute(&ctx),
        None => {
            println!("rw - Road issue reporting. Use --help for usage.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_args_parse() {
        let cli = Cli::try_parse_from([
            "rw",
            "report",
            "--title",
            "Large pothole here",
            "--type",
            "pothole",
            "--use-current-location",
            "--lat",
            "40.7128",
            "--lng",
            "-74.006",
        ])
        .unwrap();
        let Some(Commands::Report(args)) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.type_.as_deref(), Some("pothole"));
        assert_eq!(args.lng, Some(-74.006));
    }

    #[test]
    fn test_coordinates_need_current_location_flag() {
        let result = Cli::try_parse_from(["rw", "report", "--lat", "1.0", "--lng", "2.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_coordinates_must_be_on_the_globe() {
        let report = |lat: &str, lng: &str| {
            Cli::try_parse_from([
                "rw",
                "report",
                "--use-current-location",
                "--lat",
                lat,
                "--lng",
                lng,
            ])
        };
        for (lat, lng) in [("NaN", "0"), ("91", "0"), ("-90.5", "0"), ("0", "180.5"), ("0", "inf")] {
            let err = report(lat, lng).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{lat},{lng}");
        }
        assert!(report("-90", "180").is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rw", "list", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
