pub mod error;
pub mod types;

pub use error::{BrowserlessError, Result};
pub use types::{ContentRequest, Cookie, ScriptTag, WaitForSelector};

use std::time::Duration;

use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, token: Option<&str>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let mut endpoint = format!("{}/{}", self.base_url, path);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// Render a page with cookies, injected scripts and wait conditions,
    /// returning the DOM serialized after all waits complete.
    pub async fn render(&self, request: &ContentRequest) -> Result<String> {
        if request.url.is_empty() {
            return Err(BrowserlessError::InvalidRequest("empty url".to_string()));
        }

        debug!(
            url = %request.url,
            cookies = request.cookies.len(),
            scripts = request.add_script_tag.len(),
            "Browserless content request"
        );

        let resp = self
            .client
            .post(self.endpoint("content"))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BrowserlessError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_token() {
        let client = BrowserlessClient::new("http://localhost:3000/", Some("secret"));
        assert_eq!(
            client.endpoint("content"),
            "http://localhost:3000/content?token=secret"
        );
    }

    #[test]
    fn endpoint_without_token() {
        let client = BrowserlessClient::new("http://localhost:3000", None);
        assert_eq!(client.endpoint("content"), "http://localhost:3000/content");
    }

    #[tokio::test]
    async fn empty_url_is_rejected_before_network() {
        let client = BrowserlessClient::new("http://127.0.0.1:9", None);
        let err = client.render(&ContentRequest::new("")).await.unwrap_err();
        assert!(matches!(err, BrowserlessError::InvalidRequest(_)));
    }
}
