use clap::Parser;
use std::sync::Arc;
use warn_layoffs::core::dashboard::{ChartPayload, ChartView, Dashboard, Slider};
use warn_layoffs::domain::model::SourceOutcome;
use warn_layoffs::utils::{logger, validation::Validate};
use warn_layoffs::{CliConfig, LayoffLoader, LocalStorage, Result};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting warn-layoffs");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ warn-layoffs failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let tab = cli.active_tab(&config)?;
    let top_n = cli.top_n(&config);

    tracing::info!("📁 Reading layoff data from {}", config.data.base_dir);
    let loader = LayoffLoader::new(LocalStorage::new(config.data.base_dir.clone()));
    let report = loader.load(&config.sources()).await;

    for outcome in &report.outcomes {
        match outcome {
            SourceOutcome::Loaded { region, path, rows } => {
                tracing::info!("✅ {}: {} rows from {}", region, rows, path);
            }
            SourceOutcome::Skipped { region, path, reason } => {
                tracing::warn!("⚠️ {}: skipped {} ({})", region, path, reason);
            }
        }
    }

    let dashboard = Dashboard::new(Arc::new(report.table));
    let kpis = dashboard.kpis();

    if cli.json {
        println!("{}", dashboard.render(tab, top_n).to_json()?);
        if cli.monthly {
            println!("{}", dashboard.monthly().to_json()?);
        }
        return Ok(());
    }

    println!("Tech Layoffs in 2025");
    println!("Total layoffs:      {}", kpis.total_layoffs);
    println!("Companies affected: {}", kpis.companies_affected);
    println!();
    println!("{} (top {})", tab.label(), top_n);
    if cli.snap {
        println!("Slider: {}", slider_marks(&config.dashboard.slider()));
    }
    print_payload(&dashboard.render(tab, top_n));

    if cli.monthly {
        println!();
        println!("By Month");
        if !dashboard.table().has_notice_date() {
            println!("  (no notice dates in the loaded data)");
        }
        print_payload(&dashboard.monthly());
    }

    Ok(())
}

const MAX_SLIDER_MARKS: usize = 20;

fn slider_marks(slider: &Slider) -> String {
    let mut marks: Vec<String> = slider
        .marks()
        .take(MAX_SLIDER_MARKS + 1)
        .map(|mark| mark.to_string())
        .collect();
    if marks.len() > MAX_SLIDER_MARKS {
        marks.truncate(MAX_SLIDER_MARKS);
        marks.push("…".to_string());
    }
    marks.join(", ")
}

fn print_payload(payload: &ChartPayload) {
    let heading = match payload.view {
        ChartView::Region => "State",
        ChartView::Company => "Company",
        ChartView::Month => "Month",
    };
    let width = payload
        .rows
        .iter()
        .map(|row| row.key.chars().count())
        .max()
        .unwrap_or(0)
        .max(heading.len());

    println!("  {:<width$}  {:>10}", heading, "Layoffs", width = width);
    for row in &payload.rows {
        println!("  {:<width$}  {:>10}", row.key, row.total, width = width);
    }
}

