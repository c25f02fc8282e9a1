//! `pa-search` — semantic search over the product catalog.
//!
//! Prints the nearest products for each query without calling the
//! completion model. Type `exit` to quit.

use clap::Parser;
use product_assistant::app;
use product_assistant::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run_search_program(Args::parse()).await
}
