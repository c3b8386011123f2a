use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::error::ExtractError;
use crate::fetcher::{self, MAX_PAGE, MIN_PAGE};
use crate::parser;
use crate::records::RawProduct;

/// Pause between successive page fetches, to bound request rate.
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Outcome of one scrape run: everything captured plus what was skipped.
#[derive(Debug)]
pub struct ScrapeReport {
    pub records: Vec<RawProduct>,
    pub pages_ok: usize,
    pub skipped: Vec<PageSkip>,
}

#[derive(Debug)]
pub struct PageSkip {
    pub page: u32,
    pub reason: String,
}

/// Walk the page range in order, one request at a time. A failing page is
/// recorded and skipped; the run keeps going. Every record is stamped with
/// the same run-start timestamp.
pub async fn scrape_pages(
    client: &Client,
    start_page: u32,
    end_page: u32,
) -> Result<ScrapeReport, ExtractError> {
    if start_page < MIN_PAGE || end_page > MAX_PAGE || start_page > end_page {
        return Err(ExtractError::InvalidRange {
            start: start_page,
            end: end_page,
        });
    }

    // One timestamp per batch, not per record.
    let collected_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let total = end_page - start_page + 1;
    let pb = ProgressBar::new(u64::from(total));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut report = ScrapeReport {
        records: Vec::new(),
        pages_ok: 0,
        skipped: Vec::new(),
    };

    for page in start_page..=end_page {
        match fetch_and_parse(client, page).await {
            Ok(mut products) => {
                for product in &mut products {
                    product.collected_at = collected_at.clone();
                }
                report.pages_ok += 1;
                report.records.extend(products);
            }
            Err(e) => {
                warn!("page {} skipped: {}", page, e);
                report.skipped.push(PageSkip {
                    page,
                    reason: e.to_string(),
                });
            }
        }
        pb.inc(1);

        if page < end_page {
            tokio::time::sleep(PAGE_DELAY).await;
        }
    }

    pb.finish_and_clear();
    info!(
        "scraped {} records from {} pages ({} skipped)",
        report.records.len(),
        report.pages_ok,
        report.skipped.len()
    );
    Ok(report)
}

async fn fetch_and_parse(client: &Client, page: u32) -> Result<Vec<RawProduct>, ExtractError> {
    let html = fetcher::fetch_page(client, page).await?;
    parser::parse_page(&html)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_zero_start_page() {
        let client = fetcher::build_client().unwrap();
        let err = scrape_pages(&client, 0, 5).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRange { start: 0, end: 5 }));
    }

    #[tokio::test]
    async fn rejects_end_page_beyond_last() {
        let client = fetcher::build_client().unwrap();
        let err = scrape_pages(&client, 1, 51).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRange { start: 1, end: 51 }));
    }

    #[tokio::test]
    async fn rejects_inverted_range() {
        let client = fetcher::build_client().unwrap();
        let err = scrape_pages(&client, 10, 2).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRange { start: 10, end: 2 }));
    }
}
