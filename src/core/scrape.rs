use crate::core::normalize::collapse_whitespace;
use crate::domain::model::ScrapedTable;
use crate::domain::ports::PageSource;
use crate::utils::error::{LayoffsError, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;

// Selector::parse only fails on malformed selector syntax; these are constants.
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());

pub fn contains_table(html: &str) -> bool {
    Html::parse_document(html)
        .select(&TABLE_SELECTOR)
        .next()
        .is_some()
}

/// Extracts the first `<table>` of a page.
///
/// Headers come from the `<th>` cells of the first row. Each later row
/// contributes the text of its `<td>` cells; rows without any are skipped.
/// Row lengths are not checked against the header.
pub fn extract_table(html: &str, page: &str) -> Result<ScrapedTable> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| LayoffsError::TableNotFound {
            page: page.to_string(),
        })?;

    let mut rows = table.select(&ROW_SELECTOR);
    let headers = rows
        .next()
        .map(|first| cell_texts(first, "th"))
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = rows
        .map(|row| cell_texts(row, "td"))
        .filter(|cells| !cells.is_empty())
        .collect();

    tracing::debug!(
        "Extracted {} headers and {} rows from {}",
        headers.len(),
        rows.len(),
        page
    );

    Ok(ScrapedTable { headers, rows })
}

fn cell_texts(row: ElementRef<'_>, tag: &str) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == tag)
        .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
        .collect()
}

/// Re-fetches `url` until its HTML contains a table, giving up after `timeout`.
///
/// A failed fetch ends the wait immediately.
pub async fn wait_for_table<P: PageSource + ?Sized>(
    source: &P,
    url: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String> {
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let html = source.page_html(url).await?;
        if contains_table(&html) {
            tracing::debug!("Table present on {} after {} attempt(s)", url, attempts);
            return Ok(html);
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Err(LayoffsError::PageWaitTimeout {
                page: url.to_string(),
                waited_ms: elapsed.as_millis() as u64,
            });
        }

        tracing::debug!("No table on {} yet (attempt {}), waiting", url, attempts);
        tokio::time::sleep(poll_interval.min(timeout - elapsed)).await;
    }
}

/// Waits for the page's table and extracts it.
pub async fn scrape_table<P: PageSource + ?Sized>(
    source: &P,
    url: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<ScrapedTable> {
    tracing::info!("Scraping table from {}", url);
    let html = wait_for_table(source, url, timeout, poll_interval).await?;
    let table = extract_table(&html, url)?;
    tracing::info!(
        "Scraped {} columns, {} rows from {}",
        table.headers.len(),
        table.rows.len(),
        url
    );
    Ok(table)
}

/// Writes the header and rows as CSV. Ragged rows are written as they are.
pub fn write_csv<W: Write>(table: &ScrapedTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    if !table.headers.is_empty() {
        csv_writer.write_record(&table.headers)?;
    }
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
