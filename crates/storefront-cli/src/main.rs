mod commands;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the discounted-products listing
    Discounted(PageArgs),
    /// Fetch the newly added products listing
    New(PageArgs),
    /// Fetch the best-selling products listing
    Top(PageArgs),
    /// Fetch all three home-page listings concurrently
    Home,
    /// Fetch the category directory
    Categories,
    /// Search products by category and free text
    Search {
        /// Category id to filter on
        #[arg(long)]
        category: Option<String>,
        /// Free-text search term
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Print the brand and theme configuration
    Brand {
        /// Start from a built-in template (fashion, electronics, home)
        #[arg(long)]
        template: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli.command, &config).await
}

#[cfg(test)]
mod tests;
