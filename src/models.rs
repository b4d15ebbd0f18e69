//! Data models for collected headlines and run summaries.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Source`]: The news outlet a headline was extracted from
//! - [`CollectionDate`]: When a headline was first observed
//! - [`HeadlineRecord`]: One row of the seed or historical dataset
//! - [`SourceOutcome`] / [`RunReport`]: What a single collection cycle did

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// The news outlet a headline was scraped from.
///
/// The textual labels (`FoxNews`, `NBC`) are the values stored in the
/// `source` column of the CSV datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    FoxNews,
    Nbc,
}

impl Source {
    /// All sources in collection order.
    pub const ALL: [Source; 2] = [Source::FoxNews, Source::Nbc];

    /// Label written to the dataset files.
    pub fn label(&self) -> &'static str {
        match self {
            Source::FoxNews => "FoxNews",
            Source::Nbc => "NBC",
        }
    }

    /// Human readable outlet name used in log output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::FoxNews => "Fox News",
            Source::Nbc => "NBC News",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FoxNews" => Ok(Source::FoxNews),
            "NBC" => Ok(Source::Nbc),
            other => Err(format!("unknown source label {other:?}")),
        }
    }
}

/// When a headline was first collected.
///
/// Seed rows carry the literal token `initial`; rows from an older historical
/// file without a `collection_date` column are read as `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionDate {
    Initial,
    Unknown,
    Day(NaiveDate),
}

impl fmt::Display for CollectionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionDate::Initial => f.write_str("initial"),
            CollectionDate::Unknown => f.write_str("unknown"),
            CollectionDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for CollectionDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "initial" => Ok(CollectionDate::Initial),
            "unknown" => Ok(CollectionDate::Unknown),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(CollectionDate::Day)
                .map_err(|e| format!("invalid collection date {other:?}: {e}")),
        }
    }
}

/// A single headline row, as stored in both the seed and historical datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRecord {
    /// Cleaned display text of the headline.
    pub headline: String,
    /// The outlet that published it.
    pub source: Source,
    /// The run date on which it was first seen (not the publish date).
    pub collection_date: CollectionDate,
}

impl HeadlineRecord {
    pub fn new(
        headline: impl Into<String>,
        source: Source,
        collection_date: CollectionDate,
    ) -> Self {
        Self {
            headline: headline.into(),
            source,
            collection_date,
        }
    }

    /// Identity of a record in the historical dataset.
    ///
    /// Two records collide when they share a source and their headlines are
    /// equal after trimming and lowercasing.
    pub fn dedup_key(&self) -> (Source, String) {
        (self.source, self.headline.trim().to_lowercase())
    }
}

/// What happened to one source during a collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The page was fetched and produced this many headlines.
    Collected(usize),
    /// The page was fetched but no extraction strategy matched anything.
    ExtractionEmpty,
    /// Every fetch attempt failed.
    FetchFailed,
}

impl SourceOutcome {
    pub fn count(&self) -> usize {
        match self {
            SourceOutcome::Collected(n) => *n,
            SourceOutcome::ExtractionEmpty | SourceOutcome::FetchFailed => 0,
        }
    }
}

/// Summary of one collection-and-integration cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub date: NaiveDate,
    pub outcomes: Vec<(Source, SourceOutcome)>,
    pub batch_size: usize,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Rows contributed by the seed dataset (non-zero only on bootstrap).
    pub seeded: usize,
    /// Rows contributed by today's batch.
    pub added: usize,
}

impl RunReport {
    /// Headlines collected for a source, zero if it failed.
    pub fn collected(&self, source: Source) -> usize {
        self.outcomes
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, outcome)| outcome.count())
            .unwrap_or(0)
    }

    /// Net rows the historical dataset grew by.
    pub fn net_new(&self) -> usize {
        self.rows_after.saturating_sub(self.rows_before)
    }
}
