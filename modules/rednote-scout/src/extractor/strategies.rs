use std::collections::HashSet;

use scraper::Html;

use super::{parse_selector, stripped_text, ExtractError, Strategy};
use crate::site::Site;

// --- Single-value strategies ---

/// Stripped text of the first element matching `css`. Only the first match
/// is considered; if it is empty the strategy yields nothing.
pub struct SelectorText {
    css: String,
}

impl SelectorText {
    pub fn new(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }
}

impl Strategy for SelectorText {
    type Output = String;

    fn name(&self) -> String {
        format!("selector {}", self.css)
    }

    fn extract(&self, document: &Html) -> Result<Option<String>, ExtractError> {
        let selector = parse_selector(&self.css)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|el| stripped_text(&el))
            .filter(|text| !text.is_empty()))
    }
}

/// `content` of `<meta property="...">`.
pub struct MetaContent {
    property: String,
}

impl MetaContent {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }
}

impl Strategy for MetaContent {
    type Output = String;

    fn name(&self) -> String {
        format!("meta {}", self.property)
    }

    fn extract(&self, document: &Html) -> Result<Option<String>, ExtractError> {
        let selector = parse_selector(&format!(r#"meta[property="{}"]"#, self.property))?;
        Ok(document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .filter(|content| !content.trim().is_empty())
            .map(str::to_string))
    }
}

/// `src` of the first `<img>`, made absolute against the site origin.
pub struct FirstImageSrc {
    site: Site,
}

impl FirstImageSrc {
    pub fn new(site: Site) -> Self {
        Self { site }
    }
}

impl Strategy for FirstImageSrc {
    type Output = String;

    fn name(&self) -> String {
        "first img".to_string()
    }

    fn extract(&self, document: &Html) -> Result<Option<String>, ExtractError> {
        let selector = parse_selector("img")?;
        Ok(document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("src"))
            .filter(|src| !src.trim().is_empty())
            .map(|src| self.site.absolutize(src)))
    }
}

// --- Comment strategies ---

/// Elements whose class or test id mentions "comment".
pub struct CommentSelectors {
    pub selectors: Vec<String>,
    /// Matches inspected per selector.
    pub per_selector: usize,
    /// Texts of this many chars or fewer are ignored.
    pub min_chars: usize,
    pub limit: usize,
}

impl Default for CommentSelectors {
    fn default() -> Self {
        Self {
            selectors: vec![
                r#"[class*="comment"]"#.to_string(),
                r#"[class*="Comment"]"#.to_string(),
                ".comment-item".to_string(),
                r#"[data-testid*="comment"]"#.to_string(),
            ],
            per_selector: 3,
            min_chars: 5,
            limit: 3,
        }
    }
}

impl Strategy for CommentSelectors {
    type Output = Vec<String>;

    fn name(&self) -> String {
        "comment selectors".to_string()
    }

    fn extract(&self, document: &Html) -> Result<Option<Vec<String>>, ExtractError> {
        let mut comments = Vec::new();
        let mut seen = HashSet::new();
        for css in &self.selectors {
            let selector = parse_selector(css)?;
            for el in document.select(&selector).take(self.per_selector) {
                // Selectors overlap; an element counts once.
                if !seen.insert(el.id()) {
                    continue;
                }
                let text = stripped_text(&el);
                if text.chars().count() > self.min_chars {
                    comments.push(text);
                }
            }
            if comments.len() >= self.limit {
                break;
            }
        }
        Ok((!comments.is_empty()).then_some(comments))
    }
}

/// Fallback for pages without recognizable comment markup: short distinct
/// text blocks near the top of the document.
pub struct TextHeuristic {
    pub css: String,
    /// Elements inspected, in document order.
    pub scan: usize,
    /// Exclusive char bounds.
    pub min_chars: usize,
    pub max_chars: usize,
    pub limit: usize,
}

impl Default for TextHeuristic {
    fn default() -> Self {
        Self {
            css: "div, span, p".to_string(),
            scan: 20,
            min_chars: 10,
            max_chars: 200,
            limit: 3,
        }
    }
}

impl Strategy for TextHeuristic {
    type Output = Vec<String>;

    fn name(&self) -> String {
        "text heuristic".to_string()
    }

    fn extract(&self, document: &Html) -> Result<Option<Vec<String>>, ExtractError> {
        let selector = parse_selector(&self.css)?;
        let mut texts: Vec<String> = Vec::new();
        for el in document.select(&selector).take(self.scan) {
            let text = stripped_text(&el);
            let chars = text.chars().count();
            if chars > self.min_chars && chars < self.max_chars && !texts.contains(&text) {
                texts.push(text);
                if texts.len() >= self.limit {
                    break;
                }
            }
        }
        Ok((!texts.is_empty()).then_some(texts))
    }
}
