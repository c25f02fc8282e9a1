//! OpenAI embedding provider.
//!
//! Implements [`EmbeddingProvider`] over `POST {base_url}/embeddings`.
//! Use [`create_embedder`] to pick the provider named in the config.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use product_assistant_core::embedding::EmbeddingProvider;

use crate::config::Config;
use crate::openai::OpenAIClient;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

pub struct OpenAIEmbeddingProvider {
    client: Arc<OpenAIClient>,
    model: String,
}

impl OpenAIEmbeddingProvider {
    pub fn new(client: Arc<OpenAIClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let response: EmbeddingResponse = self.client.post_json("embeddings", &request).await?;

        if response.data.len() != texts.len() {
            bail!(
                "Invalid embeddings response: {} vectors for {} inputs",
                response.data.len(),
                texts.len()
            );
        }

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Create the embedding provider selected by `embedding.provider`.
///
/// # Errors
///
/// Returns an error for unknown provider names.
pub fn create_embedder(
    config: &Config,
    client: Arc<OpenAIClient>,
) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.embedding.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIEmbeddingProvider::new(
            client,
            config.embedding.model.clone(),
        ))),
        other => bail!("Unknown embedding provider: {}", other),
    }
}
