use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::{Message, MessageRole, PromptBuilder};

use super::types::*;
use super::Gemini;

pub struct GeminiPromptBuilder {
    agent: Gemini,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    messages: Vec<Message>,
}

impl GeminiPromptBuilder {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            messages: Vec::new(),
        }
    }

    /// Gemini has no system role in `contents`: the preamble and any system
    /// history messages are merged into `systemInstruction`.
    pub(crate) fn build_request(&self) -> GenerateRequest {
        let mut system_parts: Vec<&str> = Vec::new();
        if let Some(ref preamble) = self.preamble {
            system_parts.push(preamble);
        }

        let mut contents = Vec::new();
        for msg in &self.messages {
            match msg.role {
                MessageRole::System => system_parts.push(&msg.content),
                MessageRole::User => contents.push(Content::user(&msg.content)),
                MessageRole::Assistant => contents.push(Content::model(&msg.content)),
            }
        }

        if !self.input.is_empty() {
            contents.push(Content::user(&self.input));
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(Content::system(system_parts.join("\n\n")))
        };

        GenerateRequest {
            system_instruction,
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: Some(4096),
            },
        }
    }
}

#[async_trait]
impl PromptBuilder for GeminiPromptBuilder {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        let response = self
            .agent
            .client()
            .generate(&self.agent.model, &request)
            .await?;

        if let Some(text) = response.text() {
            return Ok(text);
        }

        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| response.candidates.first().and_then(|c| c.finish_reason.clone()))
            .unwrap_or_else(|| "no candidates".to_string());
        Err(anyhow!("No response from Gemini: {}", reason))
    }
}
