//! `pa-chat` — chat with the completion model from the terminal.
//!
//! Every turn sends the whole conversation (or the configured sliding
//! window) and prints the reply. Type `exit` to quit.

use clap::Parser;
use product_assistant::app;
use product_assistant::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run_chat_program(Args::parse()).await
}
