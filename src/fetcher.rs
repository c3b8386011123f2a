use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::ExtractError;

pub const BASE_URL: &str = "https://fashion-studio.dicoding.dev/";
pub const MIN_PAGE: u32 = 1;
pub const MAX_PAGE: u32 = 50;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared across a run. reqwest pools the underlying
/// connection, so successive page fetches reuse it.
pub fn build_client() -> anyhow::Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("fashion_etl/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Catalog address for a page: the root for page 1, `page{N}` beyond.
pub fn page_url(page: u32) -> String {
    if page == 1 {
        BASE_URL.to_string()
    } else {
        format!("{BASE_URL}page{page}")
    }
}

/// Fetch the raw markup of one catalog page. Bounds are checked before any
/// network access; transport and HTTP-status failures name the page.
pub async fn fetch_page(client: &Client, page: u32) -> Result<String, ExtractError> {
    if !(MIN_PAGE..=MAX_PAGE).contains(&page) {
        return Err(ExtractError::InvalidPage(page));
    }

    let url = page_url(page);
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| ExtractError::Fetch { page, source })?;

    response
        .text()
        .await
        .map_err(|source| ExtractError::Fetch { page, source })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_page_uses_base_address() {
        assert_eq!(page_url(1), BASE_URL);
    }

    #[test]
    fn later_pages_use_numbered_address() {
        assert_eq!(page_url(2), format!("{BASE_URL}page2"));
        assert_eq!(page_url(50), format!("{BASE_URL}page50"));
        assert_ne!(page_url(1), page_url(2));
    }

    #[tokio::test]
    async fn rejects_page_zero_before_any_request() {
        let client = build_client().unwrap();
        let err = fetch_page(&client, 0).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPage(0)));
    }

    #[tokio::test]
    async fn rejects_page_beyond_last() {
        let client = build_client().unwrap();
        let err = fetch_page(&client, 51).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPage(51)));
    }
}
