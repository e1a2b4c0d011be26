use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use browserless_client::{BrowserlessClient, ContentRequest, Cookie};
use rednote_common::SessionCookie;
use tracing::{info, warn};

/// Delay between scroll passes on the search page.
pub const SCROLL_SETTLE: Duration = Duration::from_secs(2);
pub const SCROLL_PASSES: u32 = 2;

/// Upper bound for one Browserless render, scroll waits included.
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// A page to render in a real browser.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub url: String,
    pub cookies: Vec<SessionCookie>,
    /// Injected after load, before the DOM is captured.
    pub script: Option<String>,
    pub wait_for: Option<String>,
    /// Extra time given to the page (and `script`) before capture.
    pub settle: Option<Duration>,
}

impl RenderRequest {
    /// A post page: session cookies, wait for `body`, no script.
    pub fn page(url: impl Into<String>, cookies: &[SessionCookie]) -> Self {
        Self {
            url: url.into(),
            cookies: cookies.to_vec(),
            script: None,
            wait_for: Some("body".to_string()),
            settle: None,
        }
    }

    /// A search results page: scrolled to the bottom twice so lazy-loaded
    /// results are present.
    pub fn search(url: impl Into<String>, cookies: &[SessionCookie]) -> Self {
        Self {
            script: Some(scroll_script(SCROLL_PASSES, SCROLL_SETTLE)),
            settle: Some(SCROLL_SETTLE * SCROLL_PASSES),
            ..Self::page(url, cookies)
        }
    }
}

/// Scroll to the bottom `passes` times, pausing `settle` after each.
pub fn scroll_script(passes: u32, settle: Duration) -> String {
    let step = format!(
        "  window.scrollTo(0, document.body.scrollHeight);\n  \
         await new Promise(resolve => setTimeout(resolve, {}));\n",
        settle.as_millis()
    );
    format!("(async () => {{\n{}}})();", step.repeat(passes as usize))
}

/// Renders a URL to its final HTML. Kept behind a trait so the collector can
/// run against canned pages in tests.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<String>;
    fn name(&self) -> &str;
}

pub struct BrowserlessRenderer {
    client: BrowserlessClient,
}

impl BrowserlessRenderer {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        info!(base_url, "Using BrowserlessRenderer");
        Self {
            client: BrowserlessClient::with_timeout(base_url, token, RENDER_TIMEOUT),
        }
    }
}

/// Cookies without a domain are scoped to the page being rendered.
pub(crate) fn content_request(request: &RenderRequest) -> ContentRequest {
    let cookies = request.cookies.iter().map(|c| Cookie {
        name: c.name.clone(),
        value: c.value.clone(),
        url: c.domain.is_none().then(|| request.url.clone()),
        domain: c.domain.clone(),
        path: c.path.clone(),
    });

    let mut content = ContentRequest::new(request.url.as_str()).cookies(cookies);
    if let Some(script) = &request.script {
        content = content.script(script.as_str());
    }
    if let Some(selector) = &request.wait_for {
        content = content.wait_for_selector(selector.as_str());
    }
    if let Some(settle) = request.settle {
        content = content.wait_for_timeout(settle.as_millis() as u64);
    }
    content
}

#[async_trait]
impl PageRenderer for BrowserlessRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String> {
        info!(url = request.url.as_str(), renderer = "browserless", "Rendering page");

        let html = self
            .client
            .render(&content_request(request))
            .await
            .context("Browserless content request failed")?;

        if html.trim().is_empty() {
            warn!(url = request.url.as_str(), renderer = "browserless", "Empty HTML response");
        } else {
            info!(
                url = request.url.as_str(),
                renderer = "browserless",
                bytes = html.len(),
                "Rendered"
            );
        }
        Ok(html)
    }

    fn name(&self) -> &str {
        "browserless"
    }
}
