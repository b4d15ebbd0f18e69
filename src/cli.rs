//! Command-line interface definitions for the daily headline collector.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be provided through an environment variable, which
//! is how the scheduled job configures it.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for one collection-and-integration cycle.
///
/// # Examples
///
/// ```sh
/// # Collect today's headlines with the default dataset locations
/// daily_headlines
///
/// # Backfill a specific date into a custom history file
/// daily_headlines --date 2024-06-01 --historical-path ./out/history.csv
///
/// # Use a settings file and print per-strategy diagnostics
/// daily_headlines --config ./headlines.yaml --verbose
///
/// # Check what the extractors find today without writing anything
/// daily_headlines --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Read-only seed dataset (CSV: headline, source, collection_date)
    #[arg(
        short,
        long,
        env = "HEADLINES_SEED_PATH",
        default_value = "data/scraped_headlines_data.csv"
    )]
    pub seed_path: PathBuf,

    /// Historical dataset, rewritten on every run
    #[arg(
        short = 'o',
        long,
        env = "HEADLINES_HISTORICAL_PATH",
        default_value = "data/daily_updated_headlines_data.csv"
    )]
    pub historical_path: PathBuf,

    /// Collection date stamped on today's headlines (defaults to the current UTC date)
    #[arg(short, long, env = "HEADLINES_DATE")]
    pub date: Option<NaiveDate>,

    /// Optional path to a YAML settings file
    #[arg(short, long, env = "HEADLINES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Total fetch attempts per source
    #[arg(long, env = "HEADLINES_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// Seconds to wait between fetch attempts
    #[arg(long, env = "HEADLINES_DELAY_SECS")]
    pub delay_secs: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, env = "HEADLINES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log per-strategy counts and sample headlines
    #[arg(short, long)]
    pub verbose: bool,

    /// Scrape both sources and log what was found without touching either dataset
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["daily_headlines"]);

        assert_eq!(cli.seed_path, PathBuf::from("data/scraped_headlines_data.csv"));
        assert_eq!(
            cli.historical_path,
            PathBuf::from("data/daily_updated_headlines_data.csv")
        );
        assert!(cli.date.is_none());
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "daily_headlines",
            "-s",
            "/tmp/seed.csv",
            "-o",
            "/tmp/history.csv",
            "-d",
            "2024-06-01",
            "-v",
        ]);

        assert_eq!(cli.seed_path, PathBuf::from("/tmp/seed.csv"));
        assert_eq!(cli.historical_path, PathBuf::from("/tmp/history.csv"));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_fetch_overrides() {
        let cli = Cli::parse_from([
            "daily_headlines",
            "--max-retries",
            "5",
            "--delay-secs",
            "2",
            "--timeout-secs",
            "20",
        ]);

        assert_eq!(cli.max_retries, Some(5));
        assert_eq!(cli.delay_secs, Some(2));
        assert_eq!(cli.timeout_secs, Some(20));
    }

    #[test]
    fn test_cli_dry_run() {
        let cli = Cli::parse_from(["daily_headlines", "--dry-run"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["daily_headlines", "--date", "yesterday"]).is_err());
    }
}
