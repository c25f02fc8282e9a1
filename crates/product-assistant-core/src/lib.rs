//! # Product Assistant Core
//!
//! Provider-agnostic logic for the Product Assistant tools: catalog models,
//! the in-memory vector index, conversation transcripts, and the chat,
//! retrieval, and search sessions.
//!
//! This crate contains no tokio, HTTP client, or filesystem I/O. Concrete
//! providers (OpenAI over HTTP) and the terminal loop live in the
//! `product-assistant` app crate and plug in through the
//! [`embedding::EmbeddingProvider`] and [`chat::ChatProvider`] traits.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Products, indexed documents, transcript entries |
//! | [`catalog`] | Catalog parsing and id validation |
//! | [`embedding`] | Embedding provider trait and cosine similarity |
//! | [`store`] | Vector store trait and in-memory implementation |
//! | [`index`] | Catalog index: build once, search by text |
//! | [`chat`] | Chat provider trait, transcript, history policy |
//! | [`session`] | Chat, retrieval, and search sessions |

pub mod catalog;
pub mod chat;
pub mod embedding;
pub mod index;
pub mod models;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;
