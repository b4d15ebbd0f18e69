//! Site-specific headline extractors.
//!
//! Each supported outlet gets a [`SiteExtractor`] made of an ordered list of
//! named [`Strategy`] values. A strategy targets one region of the homepage
//! layout (the lead story, a sidebar, curated collections, ...) and is a pure
//! function from a parsed document to candidate strings, so every region can
//! be tested on its own.
//!
//! # Supported Sources
//!
//! | Source | Module | Strategies |
//! |--------|--------|------------|
//! | Fox News | [`foxnews`] | main-story, thumbs, sidebar, collections, info-headers |
//! | NBC News | [`nbc`] | articles, components, links |
//!
//! # Extraction Pass
//!
//! 1. Parse the HTML once.
//! 2. Run every strategy in order; filter each result through
//!    [`crate::normalize::normalize`].
//! 3. Concatenate in strategy order and deduplicate case-insensitively.
//!
//! Empty input (a failed fetch) and a page where nothing matches both yield
//! an empty list.

use crate::models::Source;
use crate::normalize::{clean_text, normalize};
use crate::utils::truncate_for_log;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

pub mod foxnews;
pub mod nbc;

/// Number of headlines shown per source in verbose mode.
const SAMPLE_SIZE: usize = 5;
const SAMPLE_WIDTH: usize = 80;

/// One structural extraction rule for a layout region.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&Html) -> Vec<String>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Capability shared by every site extractor.
pub trait SiteExtractor: Sync {
    /// The outlet this extractor understands.
    fn source(&self) -> Source;

    /// Strategies in priority order.
    fn strategies(&self) -> &'static [Strategy];

    /// Extract headlines from a homepage.
    fn extract(&self, html: &str, verbose: bool) -> Vec<String> {
        run_strategies(self.source(), self.strategies(), html, verbose)
    }
}

/// Look up the extractor for a source.
pub fn extractor_for(source: Source) -> &'static dyn SiteExtractor {
    match source {
        Source::FoxNews => &foxnews::FoxNews,
        Source::Nbc => &nbc::NbcNews,
    }
}

#[instrument(level = "info", skip(strategies, html), fields(bytes = html.len()))]
fn run_strategies(
    source: Source,
    strategies: &[Strategy],
    html: &str,
    verbose: bool,
) -> Vec<String> {
    if html.trim().is_empty() {
        debug!("No HTML to extract from");
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();
    for strategy in strategies {
        let found = normalize((strategy.run)(&document));
        if verbose {
            info!(strategy = strategy.name, found = found.len(), "Strategy finished");
        } else {
            debug!(strategy = strategy.name, found = found.len(), "Strategy finished");
        }
        candidates.extend(found);
    }

    let headlines = normalize(candidates);
    info!(count = headlines.len(), "Extracted unique headlines");

    if verbose {
        for (i, headline) in headlines.iter().take(SAMPLE_SIZE).enumerate() {
            info!(
                n = i + 1,
                headline = %truncate_for_log(headline, SAMPLE_WIDTH),
                "Sample headline"
            );
        }
        if headlines.len() > SAMPLE_SIZE {
            info!(more = headlines.len() - SAMPLE_SIZE, "Further headlines not shown");
        }
    }
    headlines
}

/// Visible text of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Parse a selector known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}
