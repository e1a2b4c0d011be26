use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::{Message, MessageRole, PromptBuilder};

use super::types::*;
use super::OpenAi;

pub struct OpenAiPromptBuilder {
    agent: OpenAi,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    messages: Vec<Message>,
}

impl OpenAiPromptBuilder {
    pub(crate) fn new(agent: OpenAi, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            messages: Vec::new(),
        }
    }

    pub(crate) fn build_request(&self) -> ChatRequest {
        let mut messages = Vec::new();

        if let Some(ref preamble) = self.preamble {
            messages.push(WireMessage::system(preamble));
        }

        for msg in &self.messages {
            match msg.role {
                MessageRole::System => messages.push(WireMessage::system(&msg.content)),
                MessageRole::User => messages.push(WireMessage::user(&msg.content)),
                MessageRole::Assistant => messages.push(WireMessage::assistant(&msg.content)),
            }
        }

        if !self.input.is_empty() {
            messages.push(WireMessage::user(&self.input));
        }

        let mut request = ChatRequest::new(&self.agent.model).messages(messages);

        if uses_max_completion_tokens(&self.agent.model) {
            request = request.max_completion_tokens(4096);
        } else {
            request = request.max_tokens(4096);
            if let Some(temp) = self.temperature {
                request = request.temperature(temp);
            }
        }

        request
    }
}

#[async_trait]
impl PromptBuilder for OpenAiPromptBuilder {
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
        let response = self.agent.client().chat(&request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
