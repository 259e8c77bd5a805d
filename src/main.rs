use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

mod database;
mod error;
mod extractor;
mod input;
mod models;
mod normalize;
mod page;
mod traits;
mod uploader;

use database::Database;
use extractor::ProfileExtractor;
use page::PageFetcher;
use traits::ProfileSelectors;
use uploader::ContactUploader;

const DEFAULT_DATABASE_URL: &str = "sqlite:contacts.db";

/// Upload profiles listed in a CSV export to a contact search.
///
/// The CSV needs a "LinkedIn URL" column and no filled rows before its header.
/// Potential duplicates are not added but reported for manual review.
#[derive(Parser)]
#[command(name = "contact-uploader")]
struct Cli {
    /// Search to add the contacts to
    search_name: String,

    /// Path to the CSV export
    csv_path: PathBuf,

    /// JSON file overriding the profile page selectors
    #[arg(long)]
    selectors: Option<PathBuf>,

    /// Contact database (defaults to $DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Extract and print profiles as JSON without saving them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting contact upload for search \"{}\"", cli.search_name);

    let selectors = match &cli.selectors {
        Some(path) => ProfileSelectors::from_json_file(path)
            .with_context(|| format!("failed to load selectors from {}", path.display()))?,
        None => ProfileSelectors::default(),
    };

    let session_cookie = std::env::var("LI_SESSION_COOKIE").ok();
    if session_cookie.is_none() {
        warn!("LI_SESSION_COOKIE not set, profile pages will be fetched anonymously");
    }
    let fetcher = PageFetcher::new(session_cookie.as_deref())?;
    let extractor = ProfileExtractor::new(selectors);

    let profile_urls = input::read_profile_urls(&cli.csv_path)?;

    if cli.dry_run {
        for url in &profile_urls {
            match uploader::fetch_profile(&fetcher, &extractor, url).await {
                Ok(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
                Err(e) => error!("Skipping {}: {:#}", url, e),
            }
        }
        return Ok(());
    }

    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    let database = Database::new(&database_url).await?;
    let uploader = ContactUploader::new(fetcher, extractor, database, cli.search_name);

    let report = uploader.upload_all(&profile_urls).await;

    println!("Added {} contacts", report.accepted.len());
    if !report.duplicates.is_empty() {
        println!("Potential duplicates not uploaded: {:?}", report.duplicates);
    }
    for (url, reason) in &report.failures {
        println!("Failed: {url}: {reason}");
    }

    Ok(())
}
