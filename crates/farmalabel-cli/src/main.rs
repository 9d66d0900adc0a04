//! Command-line shell for the farmalabel workspace.
//!
//! Wires the pure import/label crates and the API client together: the core
//! never performs I/O, so every file read, network call, and file write
//! lives here.

mod import;
mod query;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "farmalabel")]
#[command(about = "Pharmacy label printing toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse the legacy exports, reconcile offers and mesón data, and write
    /// the merged product list as JSON
    Import(import::ImportArgs),
    /// Query the remote service by exact code or free text
    Search(query::SearchArgs),
    /// Enrich an Excel search hit with POS pricing
    Enrich {
        /// Merchant SKU to enrich
        #[arg(long)]
        sku: String,
    },
    /// Upload a mesón spreadsheet to the service
    UploadExcel {
        /// Spreadsheet file to upload
        #[arg(long)]
        file: std::path::PathBuf,
        /// User name recorded in the server-side audit log
        #[arg(long)]
        user: String,
    },
    /// Render a label from a merged product file (SVG preview, print PDF,
    /// or PNG export)
    Render(render::RenderArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = farmalabel_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => import::run(&args),
        Commands::Search(args) => query::search(&config, &args).await,
        Commands::Enrich { sku } => query::enrich(&config, &sku).await,
        Commands::UploadExcel { file, user } => query::upload_excel(&config, &file, &user).await,
        Commands::Render(args) => render::run(&config, &args),
    }
}
