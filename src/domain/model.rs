use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const COMPANY_COLUMN: &str = "Company";
pub const LAYOFFS_COLUMN: &str = "Layoffs";
pub const REGION_COLUMN: &str = "Region";
pub const NOTICE_DATE_COLUMN: &str = "Notice Date";

/// Source bucket a record is attributed to by the file it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    California,
    #[serde(rename = "New York")]
    NewYork,
    Texas,
    Washington,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::California,
        Region::NewYork,
        Region::Texas,
        Region::Washington,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::California => "California",
            Region::NewYork => "New York",
            Region::Texas => "Texas",
            Region::Washington => "Washington",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Region::California => "ca",
            Region::NewYork => "ny",
            Region::Texas => "tx",
            Region::Washington => "wa",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(wanted) || r.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown region '{}', expected one of: California, New York, Texas, Washington",
                    wanted
                )
            })
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoffRecord {
    pub company: String,
    pub layoffs: u64,
    pub region: Region,
    pub notice_date: Option<NaiveDate>,
}

impl LayoffRecord {
    /// The company name, or `None` when the source cell was blank.
    pub fn company_name(&self) -> Option<&str> {
        Some(self.company.as_str()).filter(|c| !c.is_empty())
    }
}

/// Every successfully loaded row, in source order then row order.
///
/// Built once by the loader and only read afterwards; there is no API that
/// mutates a table after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoffTable {
    records: Vec<LayoffRecord>,
    has_notice_date: bool,
}

impl LayoffTable {
    pub fn new(records: Vec<LayoffRecord>, has_notice_date: bool) -> Self {
        Self {
            records,
            has_notice_date,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LayoffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any loaded source carried a notice-date column.
    pub fn has_notice_date(&self) -> bool {
        self.has_notice_date
    }

    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec![COMPANY_COLUMN, LAYOFFS_COLUMN, REGION_COLUMN];
        if self.has_notice_date {
            columns.push(NOTICE_DATE_COLUMN);
        }
        columns
    }

    pub fn total_layoffs(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.layoffs))
    }
}

/// One `(group, total)` pair of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: u64,
}

impl GroupTotal {
    pub fn new(key: impl Into<String>, total: u64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

pub type AggregationResult = Vec<GroupTotal>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Loaded {
        region: Region,
        path: String,
        rows: usize,
    },
    Skipped {
        region: Region,
        path: String,
        reason: String,
    },
}

impl SourceOutcome {
    pub fn region(&self) -> Region {
        match self {
            SourceOutcome::Loaded { region, .. } | SourceOutcome::Skipped { region, .. } => *region,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SourceOutcome::Loaded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: LayoffTable,
    pub outcomes: Vec<SourceOutcome>,
}

impl LoadReport {
    pub fn loaded_sources(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_loaded())
    }
}
