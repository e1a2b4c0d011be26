use std::collections::HashSet;

use scraper::Html;
use tracing::debug;

use crate::extractor::{parse_selector, ExtractError};
use crate::site::Site;

/// Candidate post URLs from a rendered search page, in document order,
/// deduplicated, at most `limit`.
///
/// Anchors whose href contains `/explore/` come first. If that leaves fewer
/// than `limit`, a looser pass tops the list up with any href mentioning
/// "explore" in any case.
pub fn discover_post_urls(
    html: &str,
    site: &Site,
    limit: usize,
) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let mut found = Candidates::new(limit);

    found.collect(&document, site, "a[href]", Site::is_post_link)?;
    if !found.is_full() {
        debug!(found = found.urls.len(), "Topping up with loose explore match");
        found.collect(&document, site, "a", Site::is_loose_post_link)?;
    }
    Ok(found.urls)
}

struct Candidates {
    limit: usize,
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl Candidates {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            urls: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.urls.len() >= self.limit
    }

    fn collect(
        &mut self,
        document: &Html,
        site: &Site,
        css: &str,
        accept: fn(&str) -> bool,
    ) -> Result<(), ExtractError> {
        let selector = parse_selector(css)?;
        for href in document
            .select(&selector)
            .filter_map(|a| a.value().attr("href"))
        {
            if self.is_full() {
                break;
            }
            if !accept(href) {
                continue;
            }
            let url = site.absolutize(href);
            if self.seen.insert(url.clone()) {
                self.urls.push(url);
            }
        }
        Ok(())
    }
}
