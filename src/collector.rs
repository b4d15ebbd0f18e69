//! Daily collection across all sources.
//!
//! Each source runs its own fetch-then-extract pipeline; the pipelines share
//! nothing and run concurrently. A source that cannot be fetched, or whose
//! page yields nothing, contributes zero headlines without affecting the
//! others.

use crate::config::SourceUrls;
use crate::fetch::{Fetch, RetryPolicy, fetch_page};
use crate::models::{CollectionDate, HeadlineRecord, Source, SourceOutcome};
use crate::scrapers::extractor_for;
use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{info, instrument, warn};

/// Headlines collected in one run, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBatch {
    pub date: NaiveDate,
    /// FoxNews rows first, then NBC rows; no cross-source deduplication.
    pub records: Vec<HeadlineRecord>,
    pub outcomes: Vec<(Source, SourceOutcome)>,
}

/// Stamp extracted headlines with their source and the run date.
pub fn tag_headlines(
    headlines: Vec<String>,
    source: Source,
    date: NaiveDate,
) -> Vec<HeadlineRecord> {
    headlines
        .into_iter()
        .map(|headline| HeadlineRecord::new(headline, source, CollectionDate::Day(date)))
        .collect()
}

/// Fetch and extract a single source.
#[instrument(level = "info", skip(fetcher, source, policy, verbose), fields(source = %source))]
pub async fn collect_source<F: Fetch>(
    fetcher: F,
    source: Source,
    url: &str,
    policy: RetryPolicy,
    verbose: bool,
) -> (Vec<String>, SourceOutcome) {
    info!("Scraping {} homepage", source.display_name());

    let Some(html) = fetch_page(fetcher, url, policy).await else {
        warn!(%url, "Fetch failed; continuing without this source");
        return (Vec::new(), SourceOutcome::FetchFailed);
    };

    let headlines = extractor_for(source).extract(&html, verbose);
    if headlines.is_empty() {
        warn!(%url, "Page fetched but no headlines matched");
        return (headlines, SourceOutcome::ExtractionEmpty);
    }

    info!(count = headlines.len(), "Scraped unique headlines");
    let count = headlines.len();
    (headlines, SourceOutcome::Collected(count))
}

/// Collect today's headlines from every source.
#[instrument(level = "info", skip(fetcher, urls, policy, verbose))]
pub async fn collect_daily_headlines<F: Fetch>(
    fetcher: &F,
    urls: &SourceUrls,
    policy: RetryPolicy,
    date: NaiveDate,
    verbose: bool,
) -> DailyBatch {
    let pipelines = Source::ALL
        .iter()
        .map(|&source| collect_source(fetcher, source, urls.url_for(source), policy, verbose));
    let results = join_all(pipelines).await;

    let mut records = Vec::new();
    let mut outcomes = Vec::with_capacity(Source::ALL.len());
    for (source, (headlines, outcome)) in Source::ALL.into_iter().zip(results) {
        records.extend(tag_headlines(headlines, source, date));
        outcomes.push((source, outcome));
    }

    info!(
        total = records.len(),
        foxnews = outcomes[0].1.count(),
        nbc = outcomes[1].1.count(),
        "Collection summary"
    );

    DailyBatch {
        date,
        records,
        outcomes,
    }
}
