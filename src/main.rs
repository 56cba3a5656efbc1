//! # Commerce Catalog CLI (`catalog`)
//!
//! Commands for database initialization, CSV import, search, and starting
//! the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! catalog --config ./config/catalog.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog init` | Create the SQLite database and schema |
//! | `catalog import` | Replace all catalog tables from CSV files |
//! | `catalog search "<query>"` | Search menu items (or merchants with `--merchants`) |
//! | `catalog serve` | Start the JSON HTTP server |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commerce_catalog::{config, import, migrate, query, server};

/// Commerce Catalog — a sample CSV-backed commerce catalog server.
#[derive(Parser)]
#[command(
    name = "catalog",
    about = "Sample commerce catalog server: CSV-backed merchants and menus over a JSON HTTP API",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all catalog tables. Idempotent.
    Init,

    /// Replace all catalog tables from CSV files.
    ///
    /// Reads merchants, menu categories, items, modifier data, and link
    /// tables from the data directory. Missing optional files leave their
    /// table empty. Each table is replaced atomically.
    Import {
        /// Override the data directory from config.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Search the catalog by name substring (case-insensitive).
    Search {
        /// The search query. An empty string matches everything.
        query: String,

        /// Search merchants instead of menu items.
        #[arg(long)]
        merchants: bool,
    },

    /// Start the JSON HTTP server on the configured bind address.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { data_dir } => {
            import::run_import(&cfg, data_dir).await?;
        }
        Commands::Search { query, merchants } => {
            query::run_search(&cfg, &query, merchants).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
