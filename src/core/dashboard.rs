//! View model behind the treemap dashboard: the tab selector, the top-N
//! slider and the payload handed to the chart component.

use crate::core::aggregate::{monthly_layoff_totals, top_companies_by_layoffs, top_regions_by_layoffs};
use crate::domain::model::{AggregationResult, LayoffTable};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    ByRegion,
    ByCompany,
}

impl DashboardTab {
    pub fn tab_id(&self) -> &'static str {
        match self {
            DashboardTab::ByRegion => "tab-state",
            DashboardTab::ByCompany => "tab-company",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::ByRegion => "By State",
            DashboardTab::ByCompany => "By Company",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_id())
    }
}

impl FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tab-state" | "state" | "region" | "by-region" => Ok(DashboardTab::ByRegion),
            "tab-company" | "company" | "by-company" => Ok(DashboardTab::ByCompany),
            other => Err(format!(
                "unknown tab '{}', expected 'tab-state' or 'tab-company'",
                other
            )),
        }
    }
}

/// The top-N control: its bounds, step and initial position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub value: i64,
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            min: 5,
            max: 50,
            step: 5,
            value: 20,
        }
    }
}

impl Slider {
    /// Snaps a requested value into range and onto the nearest step.
    pub fn clamp(&self, value: i64) -> i64 {
        if self.max < self.min {
            return self.min;
        }
        let step = self.step.max(1);
        let bounded = value.clamp(self.min, self.max);
        let range = self.max.saturating_sub(self.min);
        let offset = bounded.saturating_sub(self.min);
        let mut steps = offset.saturating_add(step / 2) / step;
        if steps.saturating_mul(step) > range {
            steps -= 1;
        }
        self.min.saturating_add(steps * step)
    }

    /// Tick marks shown under the slider, lowest first.
    pub fn marks(&self) -> impl Iterator<Item = i64> {
        let step = usize::try_from(self.step.max(1)).unwrap_or(usize::MAX);
        (self.min..=self.max).step_by(step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    Region,
    Company,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total_layoffs: u64,
    pub companies_affected: usize,
}

/// Label/value rows for one treemap, plus the controls that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPayload {
    pub view: ChartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<i64>,
    pub rows: AggregationResult,
}

impl ChartPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Shares one loaded table across any number of renders.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Arc<LayoffTable>,
    kpis: Kpis,
}

impl Dashboard {
    pub fn new(table: Arc<LayoffTable>) -> Self {
        let companies: HashSet<&str> = table
            .records()
            .iter()
            .filter_map(|r| r.company_name())
            .collect();
        let kpis = Kpis {
            total_layoffs: table.total_layoffs(),
            companies_affected: companies.len(),
        };
        Self { table, kpis }
    }

    pub fn table(&self) -> &LayoffTable {
        &self.table
    }

    pub fn kpis(&self) -> Kpis {
        self.kpis
    }

    /// Aggregates only the view behind the active tab.
    pub fn render(&self, tab: DashboardTab, top_n: i64) -> ChartPayload {
        let (view, rows) = match tab {
            DashboardTab::ByRegion => (ChartView::Region, top_regions_by_layoffs(&self.table, top_n)),
            DashboardTab::ByCompany => (
                ChartView::Company,
                top_companies_by_layoffs(&self.table, top_n),
            ),
        };
        tracing::debug!("Rendered {} with top_n={} ({} rows)", tab, top_n, rows.len());
        ChartPayload {
            view,
            top_n: Some(top_n),
            rows,
        }
    }

    pub fn monthly(&self) -> ChartPayload {
        ChartPayload {
            view: ChartView::Month,
            top_n: None,
            rows: monthly_layoff_totals(&self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GroupTotal, LayoffRecord, Region};

    fn dashboard() -> Dashboard {
        let records = vec![
            LayoffRecord {
                company: "Acme Corp".to_string(),
                layoffs: 50,
                region: Region::California,
                notice_date: None,
            },
            LayoffRecord {
                company: "Acme Corp".to_string(),
                layoffs: 30,
                region: Region::Texas,
                notice_date: None,
            },
            LayoffRecord {
                company: "Globex".to_string(),
                layoffs: 60,
                region: Region::Texas,
                notice_date: None,
            },
        ];
        Dashboard::new(Arc::new(LayoffTable::new(records, false)))
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("tab-state".parse::<DashboardTab>().unwrap(), DashboardTab::ByRegion);
        assert_eq!("Company".parse::<DashboardTab>().unwrap(), DashboardTab::ByCompany);
        assert!("tab-city".parse::<DashboardTab>().is_err());
    }

    #[test]
    fn test_slider_clamp_and_marks() {
        let slider = Slider::default();
        assert_eq!(slider.clamp(20), 20);
        assert_eq!(slider.clamp(22), 20);
        assert_eq!(slider.clamp(23), 25);
        assert_eq!(slider.clamp(0), 5);
        assert_eq!(slider.clamp(-10), 5);
        assert_eq!(slider.clamp(99), 50);
        assert_eq!(
            slider.marks().collect::<Vec<_>>(),
            vec![5, 10, 15, 20, 25, 30, 35, 40, 45, 50]
        );
        assert_eq!(slider.value, 20);
    }

    #[test]
    fn test_slider_clamp_near_i64_max() {
        let slider = Slider {
            min: 5,
            max: i64::MAX,
            step: 5,
            value: 20,
        };
        assert_eq!(slider.clamp(i64::MAX), i64::MAX - 2);
        assert_eq!(slider.clamp(i64::MAX - 3), i64::MAX - 2);
        assert_eq!(slider.clamp(12), 10);

        let wide_step = Slider {
            min: 1,
            max: i64::MAX,
            step: i64::MAX,
            value: 1,
        };
        assert_eq!(wide_step.clamp(i64::MAX), 1);
        assert_eq!(wide_step.marks().take(3).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_kpis() {
        let kpis = dashboard().kpis();
        assert_eq!(kpis.total_layoffs, 140);
        assert_eq!(kpis.companies_affected, 2);
    }

    #[test]
    fn test_blank_company_excluded_from_company_views() {
        let records = vec![
            LayoffRecord {
                company: "Acme".to_string(),
                layoffs: 10,
                region: Region::Texas,
                notice_date: None,
            },
            LayoffRecord {
                company: String::new(),
                layoffs: 99,
                region: Region::Texas,
                notice_date: None,
            },
        ];
        let dash = Dashboard::new(Arc::new(LayoffTable::new(records, false)));

        assert_eq!(dash.kpis().total_layoffs, 109);
        assert_eq!(dash.kpis().companies_affected, 1);
        assert_eq!(
            dash.render(DashboardTab::ByCompany, 5).rows,
            vec![GroupTotal::new("Acme", 10)]
        );
        assert_eq!(
            dash.render(DashboardTab::ByRegion, 5).rows,
            vec![GroupTotal::new("Texas", 109)]
        );
    }

    #[test]
    fn test_kpis_saturate_on_huge_counts() {
        let records = vec![
            LayoffRecord {
                company: "A".to_string(),
                layoffs: u64::MAX,
                region: Region::Texas,
                notice_date: None,
            },
            LayoffRecord {
                company: "A".to_string(),
                layoffs: u64::MAX,
                region: Region::California,
                notice_date: None,
            },
        ];
        let dash = Dashboard::new(Arc::new(LayoffTable::new(records, false)));
        assert_eq!(dash.kpis().total_layoffs, u64::MAX);
    }

    #[test]
    fn test_render_active_tab_only() {
        let dash = dashboard();

        let regions = dash.render(DashboardTab::ByRegion, 20);
        assert_eq!(regions.view, ChartView::Region);
        assert_eq!(
            regions.rows,
            vec![GroupTotal::new("Texas", 90), GroupTotal::new("California", 50)]
        );

        let companies = dash.render(DashboardTab::ByCompany, 1);
        assert_eq!(companies.view, ChartView::Company);
        assert_eq!(companies.rows, vec![GroupTotal::new("Acme Corp", 80)]);
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = dashboard().render(DashboardTab::ByCompany, 5);
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(value["view"], "company");
        assert_eq!(value["top_n"], 5);
        assert_eq!(value["rows"][0]["key"], "Acme Corp");
        assert_eq!(value["rows"][0]["total"], 80);

        let monthly: serde_json::Value =
            serde_json::from_str(&dashboard().monthly().to_json().unwrap()).unwrap();
        assert!(monthly.get("top_n").is_none());
        assert_eq!(monthly["rows"], serde_json::json!([]));
    }
}
