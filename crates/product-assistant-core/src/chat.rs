//! Chat completion abstraction and conversation transcripts.
//!
//! - [`ChatProvider`] — sends a [`CompletionRequest`] and returns the
//!   assistant's reply text.
//! - [`Transcript`] — the append-only list of [`Message`]s for one session.
//! - [`HistoryPolicy`] — decides which part of the transcript is sent on
//!   each turn. The stored transcript itself is never truncated.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Message, Role};

/// Default completion model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
/// Default generation-length ceiling.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

/// A single chat completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

/// Sends chat completion requests.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Return the assistant reply text for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Per-session generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub history: HistoryPolicy,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            history: HistoryPolicy::Unbounded,
        }
    }
}

/// Which transcript entries are sent with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Send the whole transcript.
    Unbounded,
    /// Send system entries plus at most `max_messages` of the most recent
    /// other entries, starting on a user entry.
    SlidingWindow { max_messages: usize },
}

/// Ordered, append-only conversation history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript opened with a single system entry.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![Message::system(prompt)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries to send under `policy`, in transcript order.
    pub fn window(&self, policy: HistoryPolicy) -> Vec<Message> {
        let max_messages = match policy {
            HistoryPolicy::Unbounded => return self.entries.clone(),
            HistoryPolicy::SlidingWindow { max_messages } => max_messages,
        };

        let (system, rest): (Vec<&Message>, Vec<&Message>) =
            self.entries.iter().partition(|m| m.role == Role::System);

        let mut start = rest.len().saturating_sub(max_messages);
        while start < rest.len() && rest[start].role == Role::Assistant {
            start += 1;
        }

        system
            .into_iter()
            .chain(rest[start..].iter().copied())
            .cloned()
            .collect()
    }
}
