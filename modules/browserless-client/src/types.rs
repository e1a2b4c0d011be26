//! Request body for the Browserless `/content` API.

use serde::Serialize;

/// A cookie installed in the browser context before navigation.
/// Browserless requires either `url` or `domain` to scope it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptTag {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WaitForSelector {
    pub selector: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<Cookie>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_script_tag: Vec<ScriptTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<WaitForSelector>,
    /// Milliseconds to wait after load, before the DOM is captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_timeout: Option<u64>,
}

impl ContentRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cookies: Vec::new(),
            add_script_tag: Vec::new(),
            wait_for_selector: None,
            wait_for_timeout: None,
        }
    }

    pub fn cookies(mut self, cookies: impl IntoIterator<Item = Cookie>) -> Self {
        self.cookies.extend(cookies);
        self
    }

    pub fn script(mut self, content: impl Into<String>) -> Self {
        self.add_script_tag.push(ScriptTag {
            content: content.into(),
        });
        self
    }

    pub fn wait_for_selector(mut self, selector: impl Into<String>) -> Self {
        self.wait_for_selector = Some(WaitForSelector {
            selector: selector.into(),
        });
        self
    }

    pub fn wait_for_timeout(mut self, millis: u64) -> Self {
        self.wait_for_timeout = Some(millis);
        self
    }
}
