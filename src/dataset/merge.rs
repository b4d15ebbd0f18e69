//! The pure state transition `(seed, historical, batch) -> new historical`.

use crate::models::HeadlineRecord;
use std::collections::HashSet;

/// Result of merging a batch into the historical dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// The new historical dataset, in write order.
    pub records: Vec<HeadlineRecord>,
    /// Rows taken from the seed dataset.
    pub seeded: usize,
    /// Rows taken from the batch.
    pub added: usize,
}

/// Merge the seed and a daily batch into the historical dataset.
///
/// Rows are considered in precedence order: historical rows first (in their
/// existing order), then seed rows, then batch rows. The first row seen for a
/// given [`HeadlineRecord::dedup_key`] wins, so a headline keeps the
/// collection date of its first observation. Once the historical dataset
/// contains the seed, the seed contributes nothing.
pub fn merge(
    seed: &[HeadlineRecord],
    historical: &[HeadlineRecord],
    batch: &[HeadlineRecord],
) -> Merged {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(historical.len() + batch.len());

    let mut take = |rows: &[HeadlineRecord]| -> usize {
        let before = records.len();
        for row in rows {
            if seen.insert(row.dedup_key()) {
                records.push(row.clone());
            }
        }
        records.len() - before
    };

    take(historical);
    let seeded = take(seed);
    let added = take(batch);

    Merged {
        records,
        seeded,
        added,
    }
}
