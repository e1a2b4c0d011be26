use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// --- Sentinels ---

/// Placeholder for any field that could not be extracted, and for every
/// field of a post whose page failed to render.
pub const CONTENT_UNAVAILABLE: &str = "Content unavailable";

/// Placeholder for a rendered post with no extractable comments. Downstream
/// text matching depends on this differing from [`CONTENT_UNAVAILABLE`].
pub const NO_COMMENTS_FOUND: &str = "No comments found";

/// Separator between the comment texts of one post.
pub const COMMENT_DELIMITER: &str = " | ";

/// Posts visited per run.
pub const MAX_POSTS: usize = 5;

/// Comments kept per post.
pub const MAX_COMMENTS: usize = 3;

// --- ScrapeRequest ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    topic: String,
}

impl ScrapeRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Topic as used in output file names. Spaces, path separators and `..`
    /// become underscores so the name never leaves the output directory.
    pub fn file_stem(&self) -> String {
        self.topic
            .replace([' ', '/', '\\'], "_")
            .replace("..", "_")
    }
}

// --- SessionCookie ---

/// A pre-captured login cookie. Only `name` and `value` are required; any
/// scoping fields present in the exported file are passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }
}

// --- PostRecord ---

/// One row of the output table. Every field is always populated; sentinels
/// stand in for missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub post_number: usize,
    pub url: String,
    pub title: String,
    pub image_url: String,
    pub comments: String,
}

impl PostRecord {
    pub fn unavailable(post_number: usize, url: impl Into<String>) -> Self {
        Self {
            post_number,
            url: url.into(),
            title: CONTENT_UNAVAILABLE.to_string(),
            image_url: CONTENT_UNAVAILABLE.to_string(),
            comments: CONTENT_UNAVAILABLE.to_string(),
        }
    }
}

// --- PostOutcome ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFailure {
    /// The post page could not be rendered.
    Render(String),
    /// The page rendered but field extraction failed.
    Extraction(String),
}

impl fmt::Display for PostFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostFailure::Render(reason) => write!(f, "render failed: {reason}"),
            PostFailure::Extraction(reason) => write!(f, "extraction failed: {reason}"),
        }
    }
}

/// Result of visiting one candidate post. Failures are kept in order and
/// lowered to sentinel rows by [`PostOutcome::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Scraped(PostRecord),
    Failed {
        post_number: usize,
        url: String,
        failure: PostFailure,
    },
}

impl PostOutcome {
    pub fn url(&self) -> &str {
        match self {
            PostOutcome::Scraped(record) => &record.url,
            PostOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PostOutcome::Failed { .. })
    }

    /// The table row for this outcome.
    pub fn record(&self) -> PostRecord {
        match self {
            PostOutcome::Scraped(record) => record.clone(),
            PostOutcome::Failed {
                post_number,
                url,
                failure: PostFailure::Render(_),
            } => PostRecord::unavailable(*post_number, url.as_str()),
            PostOutcome::Failed {
                post_number,
                url,
                failure: PostFailure::Extraction(reason),
            } => PostRecord {
                title: format!("Error: {reason}"),
                ..PostRecord::unavailable(*post_number, url.as_str())
            },
        }
    }
}

// --- ScrapeResult / Collection ---

#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub topic: String,
    /// In discovery order, numbered from 1.
    pub posts: Vec<PostOutcome>,
    pub csv_path: PathBuf,
    pub summary: String,
}

impl ScrapeResult {
    pub fn failures(&self) -> usize {
        self.posts.iter().filter(|p| p.is_failure()).count()
    }
}

/// A completed collection: either posts were scraped, or no candidate posts
/// were found and nothing was written.
#[derive(Debug, Clone)]
pub enum Collection {
    Scraped(ScrapeResult),
    Empty { topic: String },
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Collection::Empty { .. })
    }

    /// Human-readable text handed to the next pipeline stage.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Scraped(result) => f.write_str(&result.summary),
            Collection::Empty { topic } => write!(
                f,
                "No data scraped for topic '{topic}'. Please check your cookies and network connection."
            ),
        }
    }
}
