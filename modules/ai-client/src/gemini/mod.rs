mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::GeminiPromptBuilder;

use crate::traits::Agent;

use client::GeminiClient;

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

impl Agent for Gemini {
    type PromptBuilder = GeminiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> GeminiPromptBuilder {
        GeminiPromptBuilder::new(self.clone(), input.into())
    }

    fn name(&self) -> String {
        format!("gemini/{}", self.model)
    }
}
