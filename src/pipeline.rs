//! One collection-and-integration cycle, the operation the scheduler runs.

use crate::collector::{DailyBatch, collect_daily_headlines};
use crate::config::Settings;
use crate::dataset::integrate;
use crate::error::DatasetError;
use crate::fetch::Fetch;
use crate::models::RunReport;
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

/// Headlines listed per source by [`preview`].
const PREVIEW_SIZE: usize = 10;

/// Collect headlines for `date` and merge them into the historical dataset.
///
/// Per-source failures only reduce the counts in the returned report. The
/// run fails when the seed dataset cannot be loaded, the historical dataset
/// cannot be read, or the new historical dataset cannot be written.
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn run_cycle<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    date: NaiveDate,
) -> Result<RunReport, DatasetError> {
    info!(%date, "Collection date");

    let batch = collect_daily_headlines(
        fetcher,
        &settings.sources,
        settings.fetch.retry_policy(),
        date,
        settings.verbose,
    )
    .await;

    if batch.records.is_empty() {
        info!("No new headlines collected today");
    }

    let integration = integrate(&batch.records, &settings.seed_path, &settings.historical_path)?;

    Ok(RunReport {
        date: batch.date,
        outcomes: batch.outcomes,
        batch_size: batch.records.len(),
        rows_before: integration.rows_before,
        rows_after: integration.rows_after,
        seeded: integration.seeded,
        added: integration.added,
    })
}

/// Collect headlines for `date` and log them, leaving both datasets alone.
///
/// Strategy diagnostics are always on, since the point is to see what the
/// extractors make of today's pages.
#[instrument(level = "info", skip(fetcher, settings))]
pub async fn preview<F: Fetch>(fetcher: &F, settings: &Settings, date: NaiveDate) -> DailyBatch {
    let batch = collect_daily_headlines(
        fetcher,
        &settings.sources,
        settings.fetch.retry_policy(),
        date,
        true,
    )
    .await;

    for (source, outcome) in &batch.outcomes {
        info!(%source, collected = outcome.count(), ?outcome, "Preview");
        let headlines = batch.records.iter().filter(|r| r.source == *source);
        for (i, record) in headlines.take(PREVIEW_SIZE).enumerate() {
            info!(%source, n = i + 1, headline = %record.headline, "Preview headline");
        }
    }

    if batch.records.is_empty() {
        warn!("No headlines scraped; page layouts may have changed or requests are blocked");
    }
    batch
}
