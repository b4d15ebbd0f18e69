//! Summary statistics over a dataset, logged after every integration.

use crate::models::{CollectionDate, HeadlineRecord, Source};
use itertools::Itertools;
use tracing::info;

/// How many collection dates to list in the summary.
const TOP_DATES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub total: usize,
    /// Rows per source, in [`Source::ALL`] order.
    pub by_source: Vec<(Source, usize)>,
    /// Most frequent collection dates, most frequent first; ties by date.
    pub top_dates: Vec<(CollectionDate, usize)>,
}

impl DatasetStats {
    pub fn from_records(records: &[HeadlineRecord]) -> Self {
        let source_counts = records.iter().map(|r| r.source).counts();
        let by_source = Source::ALL
            .iter()
            .map(|s| (*s, source_counts.get(s).copied().unwrap_or(0)))
            .collect();

        let top_dates = records
            .iter()
            .map(|r| r.collection_date)
            .counts()
            .into_iter()
            .sorted_by(|(da, na), (db, nb)| nb.cmp(na).then(da.cmp(db)))
            .take(TOP_DATES)
            .collect();

        Self {
            total: records.len(),
            by_source,
            top_dates,
        }
    }

    /// Percentage of all rows coming from `source`.
    pub fn share(&self, source: Source) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self
            .by_source
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        n as f64 * 100.0 / self.total as f64
    }

    pub fn log(&self) {
        info!(total = self.total, "Final dataset statistics");
        for (source, count) in &self.by_source {
            info!(
                %source,
                count,
                share = %format!("{:.1}%", self.share(*source)),
                "Rows by source"
            );
        }
        for (date, count) in &self.top_dates {
            info!(%date, count, "Rows by collection date");
        }
    }
}
