//! Bookverse CLI - Catalog queries and a local cart.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog (field prefixes pass through)
//! bv-cli search "inauthor:knuth" --max 5
//!
//! # Books in a subject
//! bv-cli genre fiction
//!
//! # Add a volume to the local cart and show it
//! bv-cli cart add zyTCAlFPjgYC --quantity 2
//! bv-cli cart list
//! ```
//!
//! # Environment Variables
//!
//! - `GOOGLE_BOOKS_API_URL` / `GOOGLE_BOOKS_API_KEY` - catalog endpoint
//! - `BOOKVERSE_STORE` - cart file (default `.bookverse/storage.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use bookverse_storefront::catalog::{DEFAULT_FEATURED_RESULTS, DEFAULT_SEARCH_RESULTS};
use clap::{Parser, Subcommand};

mod commands;
mod store;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bv-cli")]
#[command(author, version, about = "Bookverse CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Query text; `intitle:`, `inauthor:` and `subject:` prefixes work
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_RESULTS)]
        max: u32,
    },
    /// List books in a subject
    Genre {
        genre: String,

        #[arg(short, long, default_value_t = DEFAULT_SEARCH_RESULTS)]
        max: u32,
    },
    /// List the featured books
    Featured {
        #[arg(short, long, default_value_t = DEFAULT_FEATURED_RESULTS)]
        max: u32,
    },
    /// Show one volume
    Book {
        /// Catalog volume id
        id: String,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its totals
    List,
    /// Fetch a volume and add it to the cart
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (zero or less removes it)
    Update {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bv_cli=info,bookverse_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Search { query, max } => commands::catalog::search(&query, max).await,
        Commands::Genre { genre, max } => commands::catalog::genre(&genre, max).await,
        Commands::Featured { max } => commands::catalog::featured(max).await,
        Commands::Book { id } => commands::catalog::book(&id).await,
        Commands::Cart { action } => {
            let store = store::FileStore::from_env();
            tracing::debug!(path = %store.path().display(), "Using cart store");
            match action {
                CartAction::List => commands::cart::list(store).await,
                CartAction::Add { id, quantity } => commands::cart::add(store, &id, quantity).await,
                CartAction::Update { id, quantity } => {
                    commands::cart::update(store, &id, quantity).await
                }
                CartAction::Remove { id } => commands::cart::remove(store, &id).await,
                CartAction::Clear => commands::cart::clear(store).await,
            }
        }
    }
}
