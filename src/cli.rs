use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricetrail")]
#[command(about = "Batch price scraper with CSV/JSON history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape the catalog and persist the merged history
    Run(RunArgs),

    /// Scrape the catalog and print the snapshots without persisting
    Scrape(ScrapeArgs),

    /// Validate the CLI runs
    Healthcheck,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Base URL of the catalog site
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output CSV path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output JSON path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Directory for cached product images
    #[arg(long)]
    pub images_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ScrapeArgs {
    /// Base URL of the catalog site
    #[arg(long)]
    pub base_url: Option<String>,
}
