//! Summary views over a [`LayoffTable`]. All functions are pure and only
//! borrow the table, so one table can serve any number of callers.

use crate::domain::model::{AggregationResult, GroupTotal, LayoffRecord, LayoffTable};
use chrono::{Datelike, Month};
use std::collections::HashMap;

/// Totals per region, largest first, at most `n` entries.
pub fn top_regions_by_layoffs(table: &LayoffTable, n: i64) -> AggregationResult {
    top_by(table, n, |r| Some(r.region.name()))
}

/// Totals per normalized company name, largest first, at most `n` entries.
/// Records without a company name are left out.
pub fn top_companies_by_layoffs(table: &LayoffTable, n: i64) -> AggregationResult {
    top_by(table, n, |r| r.company_name())
}

/// Totals per calendar month of the notice date, January first.
///
/// Empty when no source had a notice-date column. Records whose date is
/// missing or unparseable contribute nothing; months without dated records
/// are omitted.
pub fn monthly_layoff_totals(table: &LayoffTable) -> AggregationResult {
    if !table.has_notice_date() {
        return Vec::new();
    }

    let mut months = [0u64; 12];
    let mut seen = [false; 12];
    for record in table.records() {
        if let Some(date) = record.notice_date {
            let idx = date.month0() as usize;
            months[idx] = months[idx].saturating_add(record.layoffs);
            seen[idx] = true;
        }
    }

    (0..12)
        .filter(|&idx| seen[idx])
        .filter_map(|idx| {
            let month = Month::try_from(idx as u8 + 1).ok()?;
            Some(GroupTotal::new(month.name(), months[idx]))
        })
        .collect()
}

/// Groups, sums and sorts descending. Ties keep first-appearance order.
fn top_by<'a, F>(table: &'a LayoffTable, n: i64, key: F) -> AggregationResult
where
    F: Fn(&'a LayoffRecord) -> Option<&'a str>,
{
    let Some(limit) = usize::try_from(n).ok().filter(|&l| l > 0) else {
        return Vec::new();
    };

    let mut totals = group_totals(table.records(), key);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

fn group_totals<'a, F>(records: &'a [LayoffRecord], key: F) -> Vec<GroupTotal>
where
    F: Fn(&'a LayoffRecord) -> Option<&'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<GroupTotal> = Vec::new();

    for record in records {
        let Some(k) = key(record) else {
            continue;
        };
        match index.get(k) {
            Some(&i) => totals[i].total = totals[i].total.saturating_add(record.layoffs),
            None => {
                index.insert(k, totals.len());
                totals.push(GroupTotal::new(k, record.layoffs));
            }
        }
    }
    totals
}
