//! `pa-rag` — answer product questions using the catalog as context.
//!
//! Each question retrieves the nearest products, adds them to the prompt as
//! `name: description` lines, and prints the model's answer. Type `exit` to
//! quit.

use clap::Parser;
use product_assistant::app;
use product_assistant::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run_rag_program(Args::parse()).await
}
