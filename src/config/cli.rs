use crate::config::toml_config::AppConfig;
use crate::core::dashboard::DashboardTab;
use crate::utils::error::{LayoffsError, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "warn-layoffs")]
#[command(about = "Summarize WARN layoff notices by state, company and month")]
pub struct CliConfig {
    /// Path to a TOML configuration file; built-in defaults are used when absent
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the per-state CSV files are read from
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Active tab: tab-state or tab-company
    #[arg(long)]
    pub tab: Option<String>,

    /// Number of states/companies to show
    #[arg(long, allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Snap --top onto the dashboard slider's range and step
    #[arg(long)]
    pub snap: bool,

    /// Also show totals by notice month
    #[arg(long)]
    pub monthly: bool,

    /// Print chart payloads as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the configuration file (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data.base_dir = dir.clone();
        }
        if let Some(tab) = &self.tab {
            config.dashboard.default_tab = tab.clone();
        }
        Ok(config)
    }

    pub fn active_tab(&self, config: &AppConfig) -> Result<DashboardTab> {
        let raw = self.tab.as_deref().unwrap_or(&config.dashboard.default_tab);
        raw.parse::<DashboardTab>()
            .map_err(|reason| LayoffsError::InvalidConfigValueError {
                field: "tab".to_string(),
                value: raw.to_string(),
                reason,
            })
    }

    /// `--top` is passed through as given unless `--snap` is set, so a
    /// non-positive value yields an empty chart.
    pub fn top_n(&self, config: &AppConfig) -> i64 {
        let slider = config.dashboard.slider();
        match self.top {
            Some(n) if self.snap => slider.clamp(n),
            Some(n) => n,
            None => slider.value,
        }
    }
}
