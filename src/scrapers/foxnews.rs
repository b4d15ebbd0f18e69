//! Fox News homepage extractor.
//!
//! Every headline slot on the Fox News homepage shares the same inner shape:
//!
//! ```text
//! <article class="article story-N">
//!   <header class="info-header">
//!     <h3 class="title"><a href="...">Headline</a></h3>
//! ```
//!
//! The strategies differ only in which containers they look inside.

use super::{SiteExtractor, Strategy, element_text, selector};
use crate::models::Source;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static MAIN_STORY: Lazy<Selector> = Lazy::new(|| selector("article.article.story-1"));
static THUMBS: Lazy<Selector> = Lazy::new(|| selector("div.thumbs-2-7"));
static SIDEBAR: Lazy<Selector> = Lazy::new(|| selector("div.region-content-sidebar-secondary"));
static COLLECTION: Lazy<Selector> =
    Lazy::new(|| selector("section.collection.collection-section"));
static INFO_HEADER: Lazy<Selector> = Lazy::new(|| selector("header.info-header"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("h3.title"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));

static STRATEGIES: [Strategy; 5] = [
    Strategy {
        name: "main-story",
        run: main_story,
    },
    Strategy {
        name: "thumbs",
        run: thumbs,
    },
    Strategy {
        name: "sidebar",
        run: sidebar,
    },
    Strategy {
        name: "collections",
        run: collections,
    },
    Strategy {
        name: "info-headers",
        run: info_headers,
    },
];

/// Extractor for <https://www.foxnews.com>.
#[derive(Debug, Clone, Copy)]
pub struct FoxNews;

impl SiteExtractor for FoxNews {
    fn source(&self) -> Source {
        Source::FoxNews
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }
}

/// Text of the first link inside the first `h3.title` of `container`.
fn title_link_text(container: ElementRef<'_>) -> Option<String> {
    let title = container.select(&TITLE).next()?;
    let link = title.select(&LINK).next()?;
    Some(element_text(link))
}

fn article_titles(container: ElementRef<'_>) -> Vec<String> {
    container
        .select(&ARTICLE)
        .filter_map(title_link_text)
        .collect()
}

/// The lead story at the top of the page.
pub fn main_story(document: &Html) -> Vec<String> {
    document
        .select(&MAIN_STORY)
        .filter_map(title_link_text)
        .collect()
}

/// Stories two through seven under the lead.
pub fn thumbs(document: &Html) -> Vec<String> {
    document
        .select(&THUMBS)
        .next()
        .map(article_titles)
        .unwrap_or_default()
}

/// The secondary sidebar column.
pub fn sidebar(document: &Html) -> Vec<String> {
    document
        .select(&SIDEBAR)
        .next()
        .map(article_titles)
        .unwrap_or_default()
}

/// Curated topic blocks (economy, world, ...).
pub fn collections(document: &Html) -> Vec<String> {
    document
        .select(&COLLECTION)
        .flat_map(article_titles)
        .collect()
}

/// Catch-all for any remaining `header.info-header` blocks.
pub fn info_headers(document: &Html) -> Vec<String> {
    document
        .select(&INFO_HEADER)
        .filter_map(title_link_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOMEPAGE: &str = r#"
<html><body>
  <main>
    <article class="article story-1">
      <div class="info">
        <header class="info-header">
          <h3 class="title"><a href="/politics/lead">Senate reaches late-night budget deal</a></h3>
        </header>
      </div>
    </article>
    <div class="thumbs-2-7">
      <article class="article story-2">
        <header class="info-header">
          <h3 class="title"><a href="/us/storm">Storm hits Gulf coast overnight</a></h3>
        </header>
      </article>
      <article class="article story-3">
        <header class="info-header">
          <h3 class="title"><a href="/video">Video</a></h3>
        </header>
      </article>
    </div>
    <div class="region-content-sidebar-secondary">
      <article>
        <h3 class="title"><a href="/world/summit">Leaders gather for climate summit</a></h3>
      </article>
    </div>
    <section class="collection collection-section economy">
      <article>
        <h3 class="title"><a href="/markets">Markets rally after rate cut</a></h3>
      </article>
      <article>
        <h3 class="title"><a href="/us/storm">STORM HITS GULF COAST OVERNIGHT</a></h3>
      </article>
    </section>
    <section class="collection other-thing">
      <article>
        <h3 class="title"><a href="/ignored">Not a collection-section block</a></h3>
      </article>
    </section>
  </main>
</body></html>
"#;

    fn doc() -> Html {
        Html::parse_document(HOMEPAGE)
    }

    #[test]
    fn test_main_story() {
        assert_eq!(main_story(&doc()), vec!["Senate reaches late-night budget deal"]);
    }

    #[test]
    fn test_thumbs_returns_raw_candidates() {
        assert_eq!(
            thumbs(&doc()),
            vec!["Storm hits Gulf coast overnight", "Video"]
        );
    }

    #[test]
    fn test_sidebar() {
        assert_eq!(sidebar(&doc()), vec!["Leaders gather for climate summit"]);
    }

    #[test]
    fn test_collections_requires_both_classes() {
        assert_eq!(
            collections(&doc()),
            vec!["Markets rally after rate cut", "STORM HITS GULF COAST OVERNIGHT"]
        );
    }

    #[test]
    fn test_info_headers() {
        assert_eq!(
            info_headers(&doc()),
            vec![
                "Senate reaches late-night budget deal",
                "Storm hits Gulf coast overnight",
                "Video",
            ]
        );
    }

    #[test]
    fn test_title_without_link_is_skipped() {
        let html = Html::parse_document(
            r#"<article class="article story-1"><h3 class="title">No link in this title</h3></article>"#,
        );
        assert!(main_story(&html).is_empty());
    }

    #[test]
    fn test_full_extraction_filters_and_dedups() {
        let headlines = FoxNews.extract(HOMEPAGE, false);
        assert_eq!(
            headlines,
            vec![
                "Senate reaches late-night budget deal",
                "Storm hits Gulf coast overnight",
                "Leaders gather for climate summit",
                "Markets rally after rate cut",
            ]
        );
    }

    #[test]
    fn test_empty_page() {
        assert!(FoxNews.extract("", true).is_empty());
    }
}
