// Test mocks for the scrape → analyze → generate pipeline.
//
// - MockRenderer (PageRenderer): URL → HTML map, records every request
// - ScriptedAgent (ai_client::Agent): queued responses, records every prompt
//
// Plus HTML fixture builders for search and post pages.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use ai_client::{Agent, Message, PromptBuilder};
use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::renderer::{PageRenderer, RenderRequest};

// ---------------------------------------------------------------------------
// MockRenderer
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered URLs and for URLs marked failing.
/// Builder pattern: `.on_page()`, `.failing()`.
pub struct MockRenderer {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    requests: Mutex<Vec<RenderRequest>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failing: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Every request seen, in order.
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let url = request.url.as_str();
        if self.failing.contains(url) {
            bail!("MockRenderer: navigation to {url} timed out");
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockRenderer: no page registered for {url}"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// ScriptedAgent
// ---------------------------------------------------------------------------

/// A prompt as it would have been sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrompt {
    pub preamble: Option<String>,
    pub input: String,
    pub temperature: Option<f32>,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<String, String>>,
    prompts: Vec<RecordedPrompt>,
}

/// Answers prompts from a queue. An exhausted queue is an error.
#[derive(Clone, Default)]
pub struct ScriptedAgent {
    script: Arc<Mutex<Script>>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, text: impl Into<String>) -> Self {
        self.script.lock().unwrap().responses.push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().responses.push_back(Err(message.into()));
        self
    }

    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.script.lock().unwrap().prompts.clone()
    }
}

impl Agent for ScriptedAgent {
    type PromptBuilder = ScriptedPrompt;

    fn prompt(&self, input: impl Into<String>) -> ScriptedPrompt {
        ScriptedPrompt {
            script: self.script.clone(),
            prompt: RecordedPrompt {
                preamble: None,
                input: input.into(),
                temperature: None,
            },
        }
    }

    fn name(&self) -> String {
        "scripted".to_string()
    }
}

pub struct ScriptedPrompt {
    script: Arc<Mutex<Script>>,
    prompt: RecordedPrompt,
}

#[async_trait]
impl PromptBuilder for ScriptedPrompt {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.prompt.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.prompt.temperature = Some(temperature);
        self
    }

    fn messages(self, _messages: Vec<Message>) -> Self {
        self
    }

    async fn send(self) -> Result<String> {
        let mut script = self.script.lock().unwrap();
        script.prompts.push(self.prompt);
        match script.responses.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => bail!("ScriptedAgent: {message}"),
            None => bail!("ScriptedAgent: no response queued"),
        }
    }
}

// ---------------------------------------------------------------------------
// HTML fixtures
// ---------------------------------------------------------------------------

/// A search results page linking each href in order.
pub fn search_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<section class="note-item"><a href="{href}">note</a></section>"#))
        .collect();
    format!("<html><head><title>小红书搜索</title></head><body><div class=\"feeds\">{links}</div></body></html>")
}

/// A post page with a detail title, an og:image and comment items.
pub fn post_page(title: &str, image: &str, comments: &[&str]) -> String {
    let items: String = comments
        .iter()
        .map(|c| format!(r#"<li class="comment-item">{c}</li>"#))
        .collect();
    format!(
        r#"<html><head><meta property="og:image" content="{image}"></head>
<body><div id="detail-title">{title}</div><ul class="list">{items}</ul></body></html>"#
    )
}
