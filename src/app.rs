//! Program startup: config, providers, index, and the terminal loop.
//!
//! Each binary calls one `run_*` function here. Startup failures (bad
//! config, missing API key, unreadable catalog, embedding errors) return
//! before the first prompt is printed.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

use product_assistant_core::chat::ChatProvider;
use product_assistant_core::index::CatalogIndex;
use product_assistant_core::session::{
    ChatSession, RetrievalSession, SearchSession, CHAT_SYSTEM_PROMPT,
};

use crate::catalog::load_catalog;
use crate::cli::Args;
use crate::completion::OpenAIChatProvider;
use crate::config::{resolve_config, Config};
use crate::embedding::create_embedder;
use crate::logging;
use crate::openai::OpenAIClient;
use crate::repl::{self, Repl};

/// Set up logging and resolve the effective config for `args`.
pub fn prepare(args: &Args) -> Result<Config> {
    logging::init(args.verbose);

    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(catalog) = &args.catalog {
        config.catalog.path = catalog.clone();
    }
    Ok(config)
}

pub fn openai_client(config: &Config) -> Result<Arc<OpenAIClient>> {
    let client = OpenAIClient::from_env(&config.provider)?;
    info!(base_url = client.base_url(), "provider client ready");
    Ok(Arc::new(client))
}

/// Load the catalog and embed it into a fresh index.
pub async fn build_index(config: &Config, client: Arc<OpenAIClient>) -> Result<Arc<CatalogIndex>> {
    let catalog = load_catalog(&config.catalog.path)?;
    let embedder = create_embedder(config, client)?;
    let index = CatalogIndex::build(catalog, embedder, config.embedding.batch_size)
        .await
        .context("Failed to build catalog index")?;
    Ok(Arc::new(index))
}

fn chat_provider(client: Arc<OpenAIClient>) -> Arc<dyn ChatProvider> {
    Arc::new(OpenAIChatProvider::new(client))
}

fn terminal() -> Repl<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    Repl::new(BufReader::new(stdin()), stdout())
}

pub async fn run_chat_program(args: Args) -> Result<()> {
    let config = prepare(&args)?;
    let client = openai_client(&config)?;
    let mut session = ChatSession::new(
        chat_provider(client),
        config.chat.completion_settings()?,
        CHAT_SYSTEM_PROMPT,
    );
    repl::run_chat(&mut session, &mut terminal()).await
}

pub async fn run_rag_program(args: Args) -> Result<()> {
    let config = prepare(&args)?;
    let client = openai_client(&config)?;
    let index = build_index(&config, client.clone()).await?;
    let mut session = RetrievalSession::new(
        index,
        chat_provider(client),
        config.chat.completion_settings()?,
        config.retrieval.top_k,
    );
    repl::run_retrieval(&mut session, &mut terminal()).await
}

pub async fn run_search_program(args: Args) -> Result<()> {
    let config = prepare(&args)?;
    let client = openai_client(&config)?;
    let index = build_index(&config, client).await?;
    let session = SearchSession::new(index, config.retrieval.top_k);
    repl::run_search(&session, &mut terminal()).await
}
