//! Xiaohongshu URL conventions: origin, search page, post-link markers.

use url::Url;

pub const XHS_ORIGIN: &str = "https://www.xiaohongshu.com";

/// Path fragment every post link carries.
pub const POST_MARKER: &str = "/explore/";

/// Looser fragment used when no anchor carries [`POST_MARKER`].
pub const LOOSE_POST_MARKER: &str = "explore";

const SEARCH_PATH: &str = "/search_result";

#[derive(Debug, Clone)]
pub struct Site {
    origin: Url,
}

impl Site {
    pub fn new(origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            origin: Url::parse(origin)?,
        })
    }

    pub fn xiaohongshu() -> Self {
        Self::new(XHS_ORIGIN).expect("valid origin")
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// `<origin>/search_result?keyword=<topic>`, with the topic form-encoded.
    pub fn search_url(&self, topic: &str) -> String {
        let mut url = self.origin.clone();
        url.set_path(SEARCH_PATH);
        url.query_pairs_mut().clear().append_pair("keyword", topic);
        url.to_string()
    }

    /// Hrefs starting with `http` are kept verbatim; anything else is
    /// resolved against the origin.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http") {
            return href.to_string();
        }
        match self.origin.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.origin.as_str().trim_end_matches('/'), href),
        }
    }

    pub fn is_post_link(href: &str) -> bool {
        href.contains(POST_MARKER)
    }

    pub fn is_loose_post_link(href: &str) -> bool {
        href.to_lowercase().contains(LOOSE_POST_MARKER)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::xiaohongshu()
    }
}
