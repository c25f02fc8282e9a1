//! Chat, retrieval, and search sessions.
//!
//! Each interactive program owns exactly one session:
//!
//! | Session | Index | Chat provider | Transcript |
//! |---------|-------|---------------|------------|
//! | [`ChatSession`] | no | yes | yes |
//! | [`RetrievalSession`] | yes | yes | yes |
//! | [`SearchSession`] | yes | no | no |
//!
//! Sessions are transport-agnostic; the terminal loop that feeds them lives
//! in the app crate.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::chat::{ChatProvider, CompletionRequest, CompletionSettings, Transcript};
use crate::index::CatalogIndex;
use crate::models::{Message, Product};

/// System prompt of the plain chat program.
pub const CHAT_SYSTEM_PROMPT: &str =
    "You are helpful AI assistant, please follow instructions. Please make you answers fun";

/// System prompt of the retrieval-augmented program.
pub const PRODUCT_SYSTEM_PROMPT: &str = "You are helpful assistant to the product search chatbot!
Please answer the user's questions about products.
But do not answer questions that are not about products.
If needed, you can ask the user for more information.
Do not make up information, only answer questions about products that are in the database.";

/// Printed by the retrieval program when no product matches.
pub const NO_RELEVANT_PRODUCTS: &str = "No relevant products found.";

/// Printed by the search program when no product matches.
pub const NO_PRODUCTS_FOUND: &str = "No products found for your query.";

/// Number of products retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// A conversation with a completion provider.
pub struct ChatSession {
    provider: Arc<dyn ChatProvider>,
    settings: CompletionSettings,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        settings: CompletionSettings,
        system_prompt: &str,
    ) -> Self {
        Self {
            provider,
            settings,
            transcript: Transcript::with_system(system_prompt),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Append `user_text`, ask the provider, append and return the reply.
    ///
    /// On provider failure the user entry stays in the transcript and no
    /// assistant entry is added.
    pub async fn respond(&mut self, user_text: &str) -> Result<String> {
        self.transcript.push(Message::user(user_text));

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            messages: self.transcript.window(self.settings.history),
            max_tokens: self.settings.max_tokens,
        };
        debug!(
            messages = request.messages.len(),
            transcript = self.transcript.len(),
            "sending completion request"
        );

        let reply = self.provider.complete(&request).await?;
        self.transcript.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}

/// Outcome of a [`RetrievalSession::answer`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalReply {
    /// The index returned nothing; the provider was not called.
    NoProducts,
    /// The provider's answer, with the products used as context.
    Answer {
        text: String,
        products: Vec<Product>,
    },
}

impl RetrievalReply {
    /// The line printed for this reply.
    pub fn render(&self) -> String {
        match self {
            RetrievalReply::NoProducts => NO_RELEVANT_PRODUCTS.to_string(),
            RetrievalReply::Answer { text, .. } => format!("Answer: {}", text),
        }
    }
}

/// Newline-joined `"name: description"` lines.
pub fn build_context(products: &[Product]) -> String {
    products
        .iter()
        .map(Product::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The user entry sent by the retrieval program.
pub fn question_with_context(question: &str, products: &[Product]) -> String {
    format!(
        "Question: {}\n\nContext:\n{}",
        question,
        build_context(products)
    )
}

/// Chat grounded in catalog search results.
pub struct RetrievalSession {
    index: Arc<CatalogIndex>,
    chat: ChatSession,
    top_k: usize,
}

impl RetrievalSession {
    pub fn new(
        index: Arc<CatalogIndex>,
        provider: Arc<dyn ChatProvider>,
        settings: CompletionSettings,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            chat: ChatSession::new(provider, settings, PRODUCT_SYSTEM_PROMPT),
            top_k,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.chat.transcript()
    }

    pub async fn answer(&mut self, query: &str) -> Result<RetrievalReply> {
        let products = self.index.search(query, self.top_k).await?;
        if products.is_empty() {
            return Ok(RetrievalReply::NoProducts);
        }

        let prompt = question_with_context(query, &products);
        let text = self.chat.respond(&prompt).await?;
        Ok(RetrievalReply::Answer { text, products })
    }
}

/// Render search results: a header plus `"{n}. name: description"` lines,
/// or the no-results message.
pub fn format_search_results(products: &[Product]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_FOUND.to_string();
    }
    let mut out = String::from("Products found:");
    for (i, product) in products.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. {}", i + 1, product.summary_line()));
    }
    out
}

/// Semantic search over the catalog, no completion calls.
pub struct SearchSession {
    index: Arc<CatalogIndex>,
    top_k: usize,
}

impl SearchSession {
    pub fn new(index: Arc<CatalogIndex>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        self.index.search(query, self.top_k).await
    }
}
