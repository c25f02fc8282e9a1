//! OpenAI chat completion provider.
//!
//! Implements [`ChatProvider`] over `POST {base_url}/chat/completions` and
//! returns `choices[0].message.content`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use product_assistant_core::chat::{ChatProvider, CompletionRequest};

use crate::openai::OpenAIClient;

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub struct OpenAIChatProvider {
    client: Arc<OpenAIClient>,
}

impl OpenAIChatProvider {
    pub fn new(client: Arc<OpenAIClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatProvider for OpenAIChatProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let response: ChatResponse = self
            .client
            .post_json("chat/completions", request)
            .await?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Invalid completion response: no choices"))?
            .message
            .content
            .ok_or_else(|| anyhow!("Invalid completion response: empty message content"))
    }
}
