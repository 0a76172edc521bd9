mod offers;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use upsell_catalog::{load_catalog_or_empty, CatalogLimits};
use upsell_editor::{EditorSession, JsonFileGateway};

#[derive(Debug, Parser)]
#[command(name = "upsell")]
#[command(about = "Edit the post-purchase upsell offer list")]
struct Cli {
    /// Catalog snapshot to pick products from (overrides `UPSELL_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Offer list file (overrides `UPSELL_OFFERS_PATH`)
    #[arg(long, global = true)]
    offers: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Print every offer (the default)
    Show,
    /// Append a blank offer
    Add,
    /// Delete the offer at INDEX
    Remove { index: usize },
    /// Set one field of an offer, e.g. `set 0 targetProductId 1`
    Set {
        index: usize,
        field: String,
        value: String,
    },
    /// Search the catalog from an offer's product picker
    Search {
        index: usize,
        query: String,
        /// Use the display-rule product picker
        #[arg(long)]
        rule: bool,
    },
    /// List variant choices for an offer's selected product
    Variants {
        index: usize,
        /// Use the display-rule product
        #[arg(long)]
        rule: bool,
    },
    /// List catalog categories usable in a category rule
    Categories,
    /// List catalog products, optionally filtered by title
    Products { query: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = upsell_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.offers {
        config.offers_path = path;
    }
    tracing::debug!(
        env = %config.env,
        catalog = %config.catalog_path.display(),
        offers = %config.offers_path.display(),
        "configuration loaded"
    );

    let limits = CatalogLimits::from_app_config(&config);
    let catalog = load_catalog_or_empty(&config.catalog_path, &limits).await;
    let gateway = Arc::new(JsonFileGateway::new(&config.offers_path));
    let mut session = EditorSession::open(catalog, gateway).await;

    let command = cli.command.unwrap_or(Commands::Show);
    let output = offers::run(session.store_mut(), &command)?;
    print!("{output}");

    if session.is_dirty() {
        session.save().await?;
        println!("saved {} offer(s) to {}", session.store().len(), config.offers_path.display());
    }

    Ok(())
}
