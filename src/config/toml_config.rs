use crate::core::dashboard::{DashboardTab, Slider};
use crate::domain::model::Region;
use crate::utils::error::{LayoffsError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WARN_URL: &str = "https://esd.wa.gov/employer-requirements/layoffs-and-employee-notifications/worker-adjustment-and-retraining-notification-warn-layoff-and-closure-database";

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_dir: String,
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub region: Region,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_tab: String,
    pub top_n: i64,
    pub slider_min: i64,
    pub slider_max: i64,
    pub slider_step: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub poll_interval_ms: u64,
    pub request_timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: "../data".to_string(),
            sources: Region::ALL
                .into_iter()
                .map(|region| SourceEntry {
                    region,
                    path: format!("tech_layoffs_{}_cleaned.csv", region.code()),
                })
                .collect(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_tab: "tab-state".to_string(),
            top_n: 20,
            slider_min: 5,
            slider_max: 50,
            slider_step: 5,
        }
    }
}

impl DashboardConfig {
    pub fn slider(&self) -> Slider {
        Slider {
            min: self.slider_min,
            max: self.slider_max,
            step: self.slider_step,
            value: self.top_n,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WARN_URL.to_string(),
            timeout_seconds: 5,
            poll_interval_ms: 500,
            request_timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, substituting `${VAR}` references.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LayoffsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Region → path pairs in configured order.
    pub fn sources(&self) -> Vec<(Region, String)> {
        self.data
            .sources
            .iter()
            .map(|entry| (entry.region, entry.path.clone()))
            .collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.base_dir", &self.data.base_dir)?;
        if self.data.sources.is_empty() {
            return Err(LayoffsError::MissingConfigError {
                field: "data.sources".to_string(),
            });
        }
        for entry in &self.data.sources {
            validation::validate_path("data.sources.path", &entry.path)?;
        }
        validation::validate_file_extensions(
            "data.sources.path",
            self.data.sources.iter().map(|e| e.path.as_str()),
            &["csv"],
        )?;

        let mut seen = Vec::new();
        for entry in &self.data.sources {
            if seen.contains(&entry.region) {
                return Err(LayoffsError::InvalidConfigValueError {
                    field: "data.sources.region".to_string(),
                    value: entry.region.to_string(),
                    reason: "Each region may appear only once".to_string(),
                });
            }
            seen.push(entry.region);
        }

        let d = &self.dashboard;
        validation::validate_range("dashboard.slider_min", d.slider_min, 1, i64::MAX)?;
        validation::validate_range("dashboard.slider_max", d.slider_max, d.slider_min, i64::MAX)?;
        validation::validate_range("dashboard.slider_step", d.slider_step, 1, i64::MAX)?;
        validation::validate_range("dashboard.top_n", d.top_n, d.slider_min, d.slider_max)?;
        d.default_tab
            .parse::<DashboardTab>()
            .map_err(|reason| LayoffsError::InvalidConfigValueError {
                field: "dashboard.default_tab".to_string(),
                value: d.default_tab.clone(),
                reason,
            })?;

        validation::validate_url("scraper.url", &self.scraper.url)?;
        validation::validate_positive_number("scraper.timeout_seconds", self.scraper.timeout_seconds, 1)?;
        validation::validate_positive_number("scraper.poll_interval_ms", self.scraper.poll_interval_ms, 1)?;
        validation::validate_positive_number(
            "scraper.request_timeout_seconds",
            self.scraper.request_timeout_seconds,
            1,
        )?;

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_original_layout() {
        let config = AppConfig::default();

        assert_eq!(
            config.sources(),
            vec![
                (Region::California, "tech_layoffs_ca_cleaned.csv".to_string()),
                (Region::NewYork, "tech_layoffs_ny_cleaned.csv".to_string()),
                (Region::Texas, "tech_layoffs_tx_cleaned.csv".to_string()),
                (Region::Washington, "tech_layoffs_wa_cleaned.csv".to_string()),
            ]
        );
        assert_eq!(config.dashboard.top_n, 20);
        assert_eq!(config.dashboard.slider(), Slider::default());
        assert_eq!(config.scraper.url, DEFAULT_WARN_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[data]
base_dir = "./data"

[[data.sources]]
region = "washington"
path = "wa.csv"

[[data.sources]]
region = "CA"
path = "ca.csv"

[dashboard]
top_n = 10
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.sources(),
            vec![
                (Region::Washington, "wa.csv".to_string()),
                (Region::California, "ca.csv".to_string()),
            ]
        );
        assert_eq!(config.dashboard.top_n, 10);
        assert_eq!(config.dashboard.slider().value, 10);
        assert_eq!(config.dashboard.slider_max, 50);
        assert_eq!(config.scraper.timeout_seconds, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let toml_content = r#"
[[data.sources]]
region = "Oregon"
path = "or.csv"
"#;
        let err = AppConfig::from_toml_str(toml_content).unwrap_err();
        assert!(err.to_string().contains("unknown region"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WARN_LAYOFFS_TEST_URL", "https://warn.example.gov/list");

        let toml_content = r#"
[scraper]
url = "${WARN_LAYOFFS_TEST_URL}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.scraper.url, "https://warn.example.gov/list");

        std::env::remove_var("WARN_LAYOFFS_TEST_URL");
    }

    #[test]
    fn test_empty_source_list_is_missing_config() {
        let config = AppConfig::from_toml_str("[data]\nsources = []\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            LayoffsError::MissingConfigError { ref field } if field == "data.sources"
        ));
    }

    #[test]
    fn test_config_validation() {
        let out_of_range = AppConfig::from_toml_str("[dashboard]\ntop_n = 75\n").unwrap();
        assert!(out_of_range.validate().is_err());

        let bad_url = AppConfig::from_toml_str("[scraper]\nurl = \"not a url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_tab = AppConfig::from_toml_str("[dashboard]\ndefault_tab = \"tab-city\"\n").unwrap();
        assert!(bad_tab.validate().is_err());

        let duplicate = AppConfig::from_toml_str(
            r#"
[[data.sources]]
region = "Texas"
path = "a.csv"

[[data.sources]]
region = "Texas"
path = "b.csv"
"#,
        )
        .unwrap();
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scraper]\ntimeout_seconds = 12").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scraper.timeout_seconds, 12);
    }
}
