//! Command-line arguments shared by the three programs.

use clap::Parser;
use std::path::PathBuf;

/// Options accepted by `pa-chat`, `pa-rag`, and `pa-search`.
///
/// All are optional; with none given the programs read
/// `./product-assistant.toml` if it exists and `./products.json`.
#[derive(Parser, Debug, Clone, Default)]
#[command(version)]
pub struct Args {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./product-assistant.toml` when that file exists;
    /// otherwise built-in defaults are used.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the products JSON file. Overrides `catalog.path`.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
