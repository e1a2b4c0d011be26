//! The scrape stage: search page, candidate posts, one visit per post, CSV
//! and summary.

use std::path::PathBuf;

use rednote_common::{
    Collection, CollectError, PostFailure, PostOutcome, ScrapeRequest, ScrapeResult,
    SessionCookie, MAX_POSTS,
};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

use crate::cookies::load_cookies;
use crate::discovery::discover_post_urls;
use crate::extractor::PostExtractor;
use crate::persist;
use crate::renderer::{PageRenderer, RenderRequest};
use crate::site::Site;
use crate::summary::build_summary;

#[derive(Debug, Clone, TypedBuilder)]
pub struct CollectorConfig {
    #[builder(setter(into))]
    pub cookies_path: PathBuf,
    #[builder(setter(into))]
    pub output_dir: PathBuf,
    #[builder(default = MAX_POSTS)]
    pub max_posts: usize,
    #[builder(default)]
    pub site: Site,
}

pub struct Collector<R> {
    renderer: R,
    config: CollectorConfig,
    extractor: PostExtractor,
}

impl<R: PageRenderer> Collector<R> {
    pub fn new(renderer: R, config: CollectorConfig) -> Self {
        let extractor = PostExtractor::new(&config.site);
        Self {
            renderer,
            config,
            extractor,
        }
    }

    pub fn with_extractor(mut self, extractor: PostExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one collection. Posts are visited strictly one after another; a
    /// post that fails becomes a sentinel row and the run continues.
    pub async fn collect(&self, request: &ScrapeRequest) -> Result<Collection, CollectError> {
        let topic = request.topic();
        info!(topic, renderer = self.renderer.name(), "Starting collection");

        let cookies = load_cookies(&self.config.cookies_path)?;
        let site = &self.config.site;

        let search_url = site.search_url(topic);
        let search_html = self
            .renderer
            .render(&RenderRequest::search(search_url.as_str(), &cookies))
            .await
            .map_err(|e| CollectError::SearchRender(format!("{e:#}")))?;

        let post_urls = discover_post_urls(&search_html, site, self.config.max_posts)
            .map_err(|e| CollectError::Other(e.to_string()))?;
        info!(topic, candidates = post_urls.len(), "Discovered candidate posts");

        if post_urls.is_empty() {
            warn!(topic, url = search_url.as_str(), "No candidate posts on search page");
            return Ok(Collection::Empty {
                topic: topic.to_string(),
            });
        }

        let mut posts = Vec::with_capacity(post_urls.len());
        for (index, url) in post_urls.into_iter().enumerate() {
            posts.push(self.visit_post(index + 1, url, &cookies).await);
        }

        let records: Vec<_> = posts.iter().map(PostOutcome::record).collect();
        let csv_path = persist::csv_path(&self.config.output_dir, request);
        persist::write_csv(&csv_path, &records)
            .map_err(|e| CollectError::Other(format!("{e:#}")))?;

        let summary = build_summary(topic, &records, &csv_path);
        let result = ScrapeResult {
            topic: topic.to_string(),
            posts,
            csv_path,
            summary,
        };
        info!(
            topic,
            posts = result.posts.len(),
            failures = result.failures(),
            "Collection complete"
        );
        Ok(Collection::Scraped(result))
    }

    async fn visit_post(
        &self,
        post_number: usize,
        url: String,
        cookies: &[SessionCookie],
    ) -> PostOutcome {
        let html = match self
            .renderer
            .render(&RenderRequest::page(url.as_str(), cookies))
            .await
        {
            Ok(html) => html,
            Err(e) => {
                warn!(post_number, url = url.as_str(), error = %e, "Post render failed");
                return PostOutcome::Failed {
                    post_number,
                    url,
                    failure: PostFailure::Render(format!("{e:#}")),
                };
            }
        };

        match self.extractor.extract(&html, post_number, &url) {
            Ok(record) => {
                info!(
                    post_number,
                    url = url.as_str(),
                    title = record.title.as_str(),
                    "Post scraped"
                );
                PostOutcome::Scraped(record)
            }
            Err(e) => {
                warn!(post_number, url = url.as_str(), error = %e, "Post extraction failed");
                PostOutcome::Failed {
                    post_number,
                    url,
                    failure: PostFailure::Extraction(e.to_string()),
                }
            }
        }
    }
}
