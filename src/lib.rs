//! # Product Assistant
//!
//! Three terminal programs over an OpenAI-compatible API:
//!
//! | Binary | What it does |
//! |--------|--------------|
//! | `pa-chat` | Plain chat with a growing transcript |
//! | `pa-rag` | Chat grounded in the top products for each question |
//! | `pa-search` | Semantic search over the product catalog |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │products.json │──▶│ CatalogIndex │◀──│  Embeddings  │
//! └──────────────┘   └──────┬───────┘   │   (OpenAI)   │
//!                           │           └──────────────┘
//!          ┌────────────────┼────────────────┐
//!          ▼                ▼                ▼
//!   ┌────────────┐  ┌──────────────┐  ┌─────────────┐
//!   │ChatSession │  │RetrievalSess.│  │SearchSession│
//!   └─────┬──────┘  └──────┬───────┘  └─────────────┘
//!         └────────┬───────┘
//!                  ▼
//!        ┌──────────────────┐
//!        │ Chat completions │
//!        │     (OpenAI)     │
//!        └──────────────────┘
//! ```
//!
//! Models, the index, and the sessions live in `product-assistant-core`;
//! this crate supplies configuration, the HTTP providers, and the terminal
//! loops.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`cli`] | Shared command-line flags |
//! | [`catalog`] | Products file loading |
//! | [`openai`] | HTTP client for OpenAI-compatible APIs |
//! | [`embedding`] | OpenAI embedding provider |
//! | [`completion`] | OpenAI chat completion provider |
//! | [`repl`] | Prompted line loops |
//! | [`logging`] | Tracing subscriber setup |
//! | [`app`] | Program startup |

pub mod app;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod logging;
pub mod openai;
pub mod repl;
