use anyhow::Result;
use clap::Parser;
use tracing::info;

use pricetrail::cli::{Cli, Command, RunArgs, ScrapeArgs};
use pricetrail::config::AppConfig;
use pricetrail::http::HttpClient;
use pricetrail::pipeline;
use pricetrail::sources::{CatalogSource, Source};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pricetrail=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Healthcheck => healthcheck(),
        Command::Scrape(args) => scrape(args).await?,
        Command::Run(args) => run(args).await?,
    }

    Ok(())
}

fn healthcheck() {
    println!(
        "[ok] pricetrail CLI is working | utc={}",
        chrono::Utc::now().to_rfc3339()
    );
}

async fn scrape(args: ScrapeArgs) -> Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.catalog.base_url = base_url;
    }
    config.validate()?;

    let http = HttpClient::new(config.http.clone())?;
    let source = CatalogSource::new(&config.catalog, http)?;
    let snapshots = source.fetch().await?;

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.catalog.base_url = base_url;
    }
    if let Some(csv) = args.csv {
        config.output.csv_path = csv;
    }
    if let Some(json) = args.json {
        config.output.json_path = json;
    }
    if let Some(images_dir) = args.images_dir {
        config.output.images_dir = images_dir;
    }
    config.validate()?;

    info!("starting scrape run against {}", config.catalog.base_url);
    let merged = pipeline::run(&config).await?;

    println!("stored: {} snapshots", merged.len());
    println!("csv: {}", config.output.csv_path.display());
    println!("json: {}", config.output.json_path.display());
    println!("images: {}", config.output.images_dir.display());

    Ok(())
}
