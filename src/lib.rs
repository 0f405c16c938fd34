pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpPageSource, LocalStorage};
pub use config::AppConfig;
pub use crate::core::aggregate::{monthly_layoff_totals, top_companies_by_layoffs, top_regions_by_layoffs};
pub use crate::core::dashboard::{ChartPayload, Dashboard, DashboardTab};
pub use crate::core::loader::LayoffLoader;
pub use crate::core::scrape::{extract_table, scrape_table};
pub use utils::error::{LayoffsError, Result};
