//! Deterministic providers shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::chat::{ChatProvider, CompletionRequest};
use crate::embedding::EmbeddingProvider;

const VOCAB_DIMS: usize = 256;

/// Bag-of-words embedder: every distinct lowercase token gets its own
/// dimension, so texts sharing no tokens are orthogonal.
#[derive(Default)]
pub struct VocabEmbedder {
    vocab: Mutex<HashMap<String, usize>>,
    pub calls: AtomicUsize,
}

impl VocabEmbedder {
    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vocab = self.vocab.lock().unwrap();
        let mut v = vec![0.0f32; VOCAB_DIMS];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let next = vocab.len();
            let slot = *vocab.entry(token.to_lowercase()).or_insert(next);
            v[slot % VOCAB_DIMS] += 1.0;
        }
        v
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for VocabEmbedder {
    fn model_name(&self) -> &str {
        "vocab"
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Embedder that always fails.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn model_name(&self) -> &str {
        "failing"
    }

    async fn embed_texts(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        bail!("embedding service unavailable")
    }
}

/// Chat provider that replies with a fixed string and records every request.
pub struct RecordingChat {
    reply: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => bail!("completion service unavailable"),
        }
    }
}

pub fn pen_and_notebook() -> Catalog {
    Catalog::from_json(
        r#"[
            {"id": 1, "name": "Pen", "description": "blue ink pen", "price": 2},
            {"id": 2, "name": "Notebook", "description": "lined pages", "price": 5}
        ]"#,
    )
    .unwrap()
}

pub fn stationery() -> Catalog {
    Catalog::from_json(
        r#"[
            {"id": 1, "name": "Pen", "description": "blue ink pen", "price": 2},
            {"id": 2, "name": "Notebook", "description": "lined pages", "price": 5},
            {"id": 3, "name": "Pencil", "description": "graphite pencil with eraser", "price": 1},
            {"id": 4, "name": "Stapler", "description": "metal desk stapler", "price": 12},
            {"id": 5, "name": "Marker", "description": "permanent ink marker", "price": 3}
        ]"#,
    )
    .unwrap()
}

/// Collects formatted log output from the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Route this thread's `debug` and above events into the buffer until
    /// the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
