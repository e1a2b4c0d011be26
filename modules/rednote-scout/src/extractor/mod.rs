//! Field extraction from rendered post pages.
//!
//! Each field is an ordered cascade of strategies; the first strategy that
//! yields a value wins. Fields no strategy can fill get a sentinel.

pub mod strategies;

use rednote_common::{
    PostRecord, COMMENT_DELIMITER, CONTENT_UNAVAILABLE, MAX_COMMENTS, NO_COMMENTS_FOUND,
};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::site::Site;
pub use strategies::{CommentSelectors, FirstImageSrc, MetaContent, SelectorText, TextHeuristic};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

pub fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Every text node under `element`, trimmed and concatenated with no
/// separator.
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

pub trait Strategy: Send + Sync {
    type Output;

    fn name(&self) -> String;

    /// `Ok(None)` means "nothing here, try the next strategy".
    fn extract(&self, document: &Html) -> Result<Option<Self::Output>, ExtractError>;
}

pub type Cascade<T> = Vec<Box<dyn Strategy<Output = T>>>;

pub fn first_match<T>(
    document: &Html,
    cascade: &[Box<dyn Strategy<Output = T>>],
) -> Result<Option<T>, ExtractError> {
    for strategy in cascade {
        if let Some(value) = strategy.extract(document)? {
            debug!(strategy = %strategy.name(), "Strategy matched");
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub struct PostExtractor {
    title: Cascade<String>,
    image: Cascade<String>,
    comments: Cascade<Vec<String>>,
}

impl PostExtractor {
    pub fn new(site: &Site) -> Self {
        Self {
            title: title_cascade(),
            image: image_cascade(site),
            comments: comment_cascade(),
        }
    }

    pub fn with_title_cascade(mut self, cascade: Cascade<String>) -> Self {
        self.title = cascade;
        self
    }

    pub fn with_image_cascade(mut self, cascade: Cascade<String>) -> Self {
        self.image = cascade;
        self
    }

    pub fn with_comment_cascade(mut self, cascade: Cascade<Vec<String>>) -> Self {
        self.comments = cascade;
        self
    }

    pub fn extract(
        &self,
        html: &str,
        post_number: usize,
        url: &str,
    ) -> Result<PostRecord, ExtractError> {
        let document = Html::parse_document(html);

        let title = first_match(&document, &self.title)?
            .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string());
        let image_url = first_match(&document, &self.image)?
            .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string());
        let comments = match first_match(&document, &self.comments)? {
            Some(found) if !found.is_empty() => found
                .into_iter()
                .take(MAX_COMMENTS)
                .collect::<Vec<_>>()
                .join(COMMENT_DELIMITER),
            _ => NO_COMMENTS_FOUND.to_string(),
        };

        Ok(PostRecord {
            post_number,
            url: url.to_string(),
            title,
            image_url,
            comments,
        })
    }
}

fn title_cascade() -> Cascade<String> {
    vec![
        Box::new(SelectorText::new(".title")),
        Box::new(SelectorText::new("#detail-title")),
        Box::new(SelectorText::new("h1")),
        Box::new(SelectorText::new(r#"[class*="title"]"#)),
        Box::new(SelectorText::new("title")),
        Box::new(MetaContent::new("og:title")),
    ]
}

fn image_cascade(site: &Site) -> Cascade<String> {
    vec![
        Box::new(MetaContent::new("og:image")),
        Box::new(FirstImageSrc::new(site.clone())),
    ]
}

fn comment_cascade() -> Cascade<Vec<String>> {
    vec![
        Box::new(CommentSelectors::default()),
        Box::new(TextHeuristic::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.xiaohongshu.com/explore/abc";

    fn extract(html: &str) -> PostRecord {
        PostExtractor::new(&Site::xiaohongshu())
            .extract(html, 1, URL)
            .unwrap()
    }

    #[test]
    fn stripped_text_drops_whitespace_between_nodes() {
        let doc = Html::parse_fragment("<p>  hello <b> world </b>\n again </p>");
        let sel = parse_selector("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(&p), "helloworldagain");
    }

    #[test]
    fn title_prefers_detail_title_over_document_title() {
        let record = extract(
            r#"<html><head><title>Page | 小红书</title></head>
            <body><div id="detail-title">  夏日穿搭  </div></body></html>"#,
        );
        assert_eq!(record.title, "夏日穿搭");
    }

    #[test]
    fn title_falls_back_to_og_title() {
        let record = extract(
            r#"<html><head><meta property="og:title" content="OG Title"></head>
            <body><p>x</p></body></html>"#,
        );
        assert_eq!(record.title, "OG Title");
    }

    #[test]
    fn empty_title_element_is_skipped() {
        let record = extract(
            r#"<html><body><h1>   </h1><span class="note-title">Span Title</span></body></html>"#,
        );
        assert_eq!(record.title, "Span Title");
    }

    #[test]
    fn missing_fields_get_sentinels() {
        let record = extract("<html><body></body></html>");
        assert_eq!(record.title, CONTENT_UNAVAILABLE);
        assert_eq!(record.image_url, CONTENT_UNAVAILABLE);
        assert_eq!(record.comments, NO_COMMENTS_FOUND);
    }

    #[test]
    fn image_prefers_og_image_then_first_img() {
        let record = extract(
            r#"<html><head><meta property="og:image" content="https://ci.example.com/og.jpg"></head>
            <body><img src="/local.png"></body></html>"#,
        );
        assert_eq!(record.image_url, "https://ci.example.com/og.jpg");

        let record = extract(r#"<html><body><img src="/local.png"><img src="/second.png"></body></html>"#);
        assert_eq!(record.image_url, "https://www.xiaohongshu.com/local.png");
    }

    #[test]
    fn comments_are_joined_with_delimiter() {
        let record = extract(
            r#"<html><body><ul>
                <li class="comment-item">太好看了吧！！</li>
                <li class="comment-item">求链接求链接</li>
                <li class="comment-item">已经下单了～</li>
                <li class="comment-item">第四条不会出现</li>
            </ul></body></html>"#,
        );
        assert_eq!(record.comments, "太好看了吧！！ | 求链接求链接 | 已经下单了～");
    }

    #[test]
    fn invalid_selector_is_an_extraction_error() {
        let extractor = PostExtractor::new(&Site::xiaohongshu())
            .with_title_cascade(vec![Box::new(SelectorText::new("[[broken"))]);
        let err = extractor.extract("<html></html>", 1, URL).unwrap_err();
        assert!(err.to_string().contains("[[broken"));
    }
}
