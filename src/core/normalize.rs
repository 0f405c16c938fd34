//! Cell-level cleaning applied by the loader.

use chrono::NaiveDate;

/// Header used by some sources in place of `Layoffs`.
pub const ALTERNATE_LAYOFFS_COLUMN: &str = "Number of Workers";

/// Date headers recognised as the notice date, in priority order.
pub const NOTICE_DATE_ALIASES: [&str; 5] = [
    "Notice Date",
    "Received Date",
    "WARN Received Date",
    "Date Received",
    "Notice_Date",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Maps a raw header to its canonical name.
pub fn canonical_header(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == ALTERNATE_LAYOFFS_COLUMN {
        crate::domain::model::LAYOFFS_COLUMN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
///
/// "acme corp " becomes "Acme Corp", "3m co" becomes "3M Co".
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;

    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Parses a layoff count. Anything unusable, including negatives, is 0.
pub fn coerce_layoffs(raw: &str) -> u64 {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return u64::try_from(n).unwrap_or(0);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

/// Accepts the date layouts seen in state WARN exports, optionally followed by a time.
pub fn parse_notice_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        })
}

/// Collapses internal whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
