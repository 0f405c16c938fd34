use crate::core::normalize::{
    canonical_header, coerce_layoffs, parse_notice_date, title_case, NOTICE_DATE_ALIASES,
};
use crate::core::Storage;
use crate::domain::model::{
    LayoffRecord, LayoffTable, LoadReport, Region, SourceOutcome, COMPANY_COLUMN, LAYOFFS_COLUMN,
};
use crate::utils::error::{LayoffsError, Result};

/// Rows of one source file after column selection and cleaning.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub records: Vec<LayoffRecord>,
    pub has_notice_date: bool,
}

/// Reads the per-region CSV files through a [`Storage`] and builds the unified table.
pub struct LayoffLoader<S: Storage> {
    storage: S,
}

impl<S: Storage> LayoffLoader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads every source in order. A source that cannot be read or lacks the
    /// required columns is skipped and reported; the load itself never fails.
    pub async fn load(&self, sources: &[(Region, String)]) -> LoadReport {
        let mut records = Vec::new();
        let mut has_notice_date = false;
        let mut outcomes = Vec::with_capacity(sources.len());

        for (region, path) in sources {
            let region = *region;
            let parsed = self
                .storage
                .read_file(path)
                .await
                .and_then(|bytes| parse_source(region, &bytes));

            match parsed {
                Ok(source) => {
                    tracing::debug!(
                        "Loaded {} rows for {} from {}",
                        source.records.len(),
                        region,
                        path
                    );
                    outcomes.push(SourceOutcome::Loaded {
                        region,
                        path: path.clone(),
                        rows: source.records.len(),
                    });
                    has_notice_date |= source.has_notice_date;
                    records.extend(source.records);
                }
                Err(e) => {
                    tracing::warn!("Could not load or process {}: {}", path, e);
                    outcomes.push(SourceOutcome::Skipped {
                        region,
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let report = LoadReport {
            table: LayoffTable::new(records, has_notice_date),
            outcomes,
        };

        tracing::info!(
            "Loaded {} records from {}/{} sources",
            report.table.len(),
            report.loaded_sources(),
            sources.len()
        );
        if report.loaded_sources() == 0 {
            tracing::warn!("No layoff sources could be loaded; continuing with an empty table");
        }

        report
    }
}

/// Parses one CSV source and tags its rows with `region`.
pub fn parse_source(region: Region, bytes: &[u8]) -> Result<ParsedSource> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(canonical_header).collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let layoffs_idx = position(LAYOFFS_COLUMN).ok_or_else(|| LayoffsError::ProcessingError {
        message: format!("missing {} column", LAYOFFS_COLUMN),
    })?;
    let company_idx = position(COMPANY_COLUMN).ok_or_else(|| LayoffsError::ProcessingError {
        message: format!("missing {} column", COMPANY_COLUMN),
    })?;
    let date_idx = NOTICE_DATE_ALIASES.iter().find_map(|alias| position(*alias));

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(LayoffRecord {
            company: title_case(cell(company_idx)),
            layoffs: coerce_layoffs(cell(layoffs_idx)),
            region,
            notice_date: date_idx.and_then(|idx| parse_notice_date(cell(idx))),
        });
    }

    Ok(ParsedSource {
        records,
        has_notice_date: date_idx.is_some(),
    })
}
