//! # Daily Headlines
//!
//! Collects news headlines (text only) from the Fox News and NBC News
//! homepages, tags each with its source and the collection date, and merges
//! them into a growing, deduplicated CSV history.
//!
//! ## Usage
//!
//! ```sh
//! daily_headlines --seed-path data/scraped_headlines_data.csv \
//!     --historical-path data/daily_updated_headlines_data.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download each homepage with a bounded retry policy
//! 2. **Extracting**: Run the site's ordered strategies over the parsed HTML
//! 3. **Collecting**: Tag headlines with source and date into a daily batch
//! 4. **Integrating**: Merge seed, history and batch, dedup, write atomically
//!
//! A source that fails only lowers the counts; the run fails only when the
//! seed cannot be loaded or the history cannot be read or written.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod dataset;
mod error;
mod fetch;
mod models;
mod normalize;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use fetch::HttpFetcher;
use models::Source;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_headlines starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::resolve(&args)?;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        seed = %settings.seed_path.display(),
        historical = %settings.historical_path.display(),
        max_retries = settings.fetch.max_retries,
        delay_secs = settings.fetch.delay_secs,
        timeout_secs = settings.fetch.timeout_secs,
        "Resolved settings"
    );

    let fetcher = HttpFetcher::new(&settings.fetch.user_agent, settings.fetch.timeout())?;

    if args.dry_run {
        let batch = pipeline::preview(&fetcher, &settings, date).await;
        info!(
            total = batch.records.len(),
            secs = start_time.elapsed().as_secs(),
            "Dry run complete; datasets left untouched"
        );
        return Ok(());
    }

    let report = match pipeline::run_cycle(&fetcher, &settings, date).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Daily collection failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        date = %report.date,
        foxnews = report.collected(Source::FoxNews),
        nbc = report.collected(Source::Nbc),
        batch = report.batch_size,
        rows_before = report.rows_before,
        rows_after = report.rows_after,
        net_new = report.net_new(),
        seeded = report.seeded,
        added = report.added,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Daily collection complete"
    );

    Ok(())
}
