use clap::Parser;
use std::time::Duration;
use warn_layoffs::adapters::http::DEFAULT_USER_AGENT;
use warn_layoffs::core::scrape::{scrape_table, write_csv};
use warn_layoffs::core::Storage;
use warn_layoffs::utils::{logger, validation::Validate};
use warn_layoffs::{AppConfig, HttpPageSource, LocalStorage, Result};

#[derive(Parser, Debug)]
#[command(name = "warn-scrape")]
#[command(about = "Extract the WARN notice table from a state labor-department page")]
struct Args {
    /// Path to TOML configuration file; built-in defaults are used when absent
    #[arg(short, long)]
    config: Option<String>,

    /// Page to scrape (overrides scraper.url)
    #[arg(long)]
    url: Option<String>,

    /// Seconds to wait for the table to appear (overrides scraper.timeout_seconds)
    #[arg(long)]
    timeout: Option<u64>,

    /// Write the extracted table to this CSV file
    #[arg(short, long)]
    output: Option<String>,

    /// Show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting warn-scrape");

    if let Err(e) = run(&args).await {
        tracing::error!(
            "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(url) = &args.url {
        config.scraper.url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.scraper.timeout_seconds = timeout;
    }
    config.validate()?;

    let scraper = &config.scraper;
    let timeout = Duration::from_secs(scraper.timeout_seconds);
    let poll_interval = Duration::from_millis(scraper.poll_interval_ms);

    if args.dry_run {
        println!("🔍 Dry run:");
        println!("  URL: {}", scraper.url);
        println!("  Wait for table: up to {:?}, polling every {:?}", timeout, poll_interval);
        if let Some(output) = &args.output {
            println!("  Output: {}", output);
        }
        return Ok(());
    }

    let source = HttpPageSource::new(
        scraper.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        Duration::from_secs(scraper.request_timeout_seconds),
    )?;
    let table = scrape_table(&source, &scraper.url, timeout, poll_interval).await?;

    println!("{:?}", table.headers);
    for row in &table.rows {
        println!("{:?}", row);
    }

    if let Some(output) = &args.output {
        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer)?;
        LocalStorage::new(".").write_file(output, &buffer).await?;
        tracing::info!("📁 Saved {} rows to {}", table.rows.len(), output);
    }

    Ok(())
}
