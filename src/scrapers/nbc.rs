//! NBC News homepage extractor.
//!
//! NBC's markup is far less regular than Fox's: headings move between `h2`,
//! `h3` and `h4`, and class names are generated. The strategies therefore go
//! from structural (articles, teaser/card components) to a broad scan of
//! every on-site link that reads like a sentence.

use super::{SiteExtractor, Strategy, element_text, selector};
use crate::models::Source;
use crate::normalize::{char_len_within, is_headline};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Bounds applied to link text, which is noisier than heading text.
const LINK_MIN_CHARS: usize = 15;
const LINK_MAX_CHARS: usize = 200;

/// Link paths that never lead to a written article.
const SKIPPED_PATHS: &[&str] = &[
    "/video/",
    "/live/",
    "/podcast/",
    "/newsletter",
    "/subscribe",
    "/account",
    "/login",
];

static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://www.nbcnews.com/").unwrap());

static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static HEADINGS: Lazy<[Selector; 3]> =
    Lazy::new(|| [selector("h2"), selector("h3"), selector("h4")]);
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static LINK_WITH_HREF: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static CLASSED_DIV: Lazy<Selector> = Lazy::new(|| selector("div[class]"));
static CLASSED_SECTION: Lazy<Selector> = Lazy::new(|| selector("section[class]"));

static STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "articles",
        run: articles,
    },
    Strategy {
        name: "components",
        run: components,
    },
    Strategy {
        name: "links",
        run: links,
    },
];

/// Extractor for <https://www.nbcnews.com>.
#[derive(Debug, Clone, Copy)]
pub struct NbcNews;

impl SiteExtractor for NbcNews {
    fn source(&self) -> Source {
        Source::Nbc
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }
}

/// Whether `href` points at an nbcnews.com page.
fn is_on_site(href: &str) -> bool {
    let href = href.trim();
    if !(href.starts_with('/') || href.contains("nbcnews.com")) {
        return false;
    }
    BASE_URL
        .join(href)
        .ok()
        .and_then(|url| {
            url.host_str()
                .map(|host| host == "nbcnews.com" || host.ends_with(".nbcnews.com"))
        })
        .unwrap_or(false)
}

fn is_skipped_path(href: &str) -> bool {
    let href = href.to_lowercase();
    SKIPPED_PATHS.iter().any(|skip| href.contains(skip))
}

/// Link text inside a heading if there is a link, otherwise the heading text.
fn heading_text(heading: ElementRef<'_>) -> String {
    heading
        .select(&LINK)
        .next()
        .map(element_text)
        .unwrap_or_else(|| element_text(heading))
}

/// First `h2`, `h3` or `h4` heading (in that order) that reads as a headline.
fn first_valid_heading(container: ElementRef<'_>) -> Option<String> {
    HEADINGS
        .iter()
        .filter_map(|tag| container.select(tag).next())
        .map(heading_text)
        .find(|text| is_headline(text))
}

fn has_heading(container: ElementRef<'_>) -> bool {
    HEADINGS.iter().any(|tag| container.select(tag).next().is_some())
}

fn class_contains(element: &ElementRef<'_>, needles: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            needles.iter().any(|needle| class.contains(needle))
        })
        .unwrap_or(false)
}

/// One headline per `article`: its heading, or failing that its first
/// sentence-length on-site link.
pub fn articles(document: &Html) -> Vec<String> {
    let mut out = Vec::new();
    for article in document.select(&ARTICLE) {
        if has_heading(article) {
            out.extend(first_valid_heading(article));
            continue;
        }
        let link = article
            .select(&LINK_WITH_HREF)
            .filter(|a| a.value().attr("href").is_some_and(is_on_site))
            .map(element_text)
            .find(|text| char_len_within(text, LINK_MIN_CHARS, LINK_MAX_CHARS));
        out.extend(link);
    }
    out
}

/// Teaser, card and story components.
pub fn components(document: &Html) -> Vec<String> {
    let teasers = document
        .select(&CLASSED_DIV)
        .filter(|div| class_contains(div, &["tease", "card"]));
    let story_divs = document
        .select(&CLASSED_DIV)
        .filter(|div| class_contains(div, &["story"]));
    let story_sections = document
        .select(&CLASSED_SECTION)
        .filter(|section| class_contains(section, &["story"]));

    teasers
        .chain(story_divs)
        .chain(story_sections)
        .filter_map(first_valid_heading)
        .collect()
}

/// Every on-site article link whose text reads like a sentence.
pub fn links(document: &Html) -> Vec<String> {
    document
        .select(&LINK_WITH_HREF)
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| is_on_site(href) && !is_skipped_path(href))
        })
        .map(element_text)
        .filter(|text| char_len_within(text, LINK_MIN_CHARS, LINK_MAX_CHARS) && text.contains(' '))
        .collect()
}
