//! Integration of a daily batch into the historical dataset.
//!
//! # Submodules
//!
//! - [`merge`]: The pure `(seed, historical, batch) -> historical` transition
//! - [`files`]: CSV reading and atomic writing
//! - [`stats`]: Per-source and per-date summaries
//!
//! # Files
//!
//! ```text
//! data/
//! ├── scraped_headlines_data.csv        # seed, never written
//! └── daily_updated_headlines_data.csv  # historical, rewritten every run
//! ```

pub mod files;
pub mod merge;
pub mod stats;

use crate::error::DatasetError;
use crate::models::HeadlineRecord;
use std::path::Path;
use tracing::{info, instrument};

/// Row counts produced by [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integration {
    pub rows_before: usize,
    pub rows_after: usize,
    pub seeded: usize,
    pub added: usize,
}

/// Merge `batch` into the historical dataset at `historical_path`.
///
/// The seed dataset is required and only read. A missing historical file is
/// treated as empty, so the first run writes seed plus batch. The single
/// durable effect is an atomic rewrite of `historical_path`; running this
/// twice with the same batch leaves the same file as running it once.
#[instrument(level = "info", skip(batch), fields(batch = batch.len()))]
pub fn integrate(
    batch: &[HeadlineRecord],
    seed_path: &Path,
    historical_path: &Path,
) -> Result<Integration, DatasetError> {
    let seed = files::load_seed(seed_path)?;
    let historical = files::load_historical(historical_path)?.unwrap_or_default();

    let merged = merge::merge(&seed, &historical, batch);
    info!(
        combined = historical.len() + seed.len() + batch.len(),
        unique = merged.records.len(),
        seeded = merged.seeded,
        added = merged.added,
        "Deduplicated combined dataset"
    );

    files::write_atomic(historical_path, &merged.records)?;
    stats::DatasetStats::from_records(&merged.records).log();

    Ok(Integration {
        rows_before: historical.len(),
        rows_after: merged.records.len(),
        seeded: merged.seeded,
        added: merged.added,
    })
}
