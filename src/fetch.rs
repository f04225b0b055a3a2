//! Retrieval of raw CSV text for a sheet source.

use reqwest::Client;
use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::{Catalog, SheetSource};
use crate::error::{Error, Result};

/// Anything that can produce the CSV text of a sheet.
pub trait SheetFetcher {
    fn fetch(&self, source: &SheetSource) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches the published CSV export over HTTP.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    catalog: Catalog,
}

impl HttpFetcher {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_client(Client::new(), catalog)
    }

    pub fn with_client(client: Client, catalog: Catalog) -> Self {
        Self { client, catalog }
    }
}

impl SheetFetcher for HttpFetcher {
    async fn fetch(&self, source: &SheetSource) -> Result<String> {
        let url = self.catalog.export_url(source);
        tracing::debug!(sheet = %source.label, %url, "fetching sheet");

        let response = self
            .client
            .get(&url)
            .query(&[("_", cache_buster())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        Ok(response.text().await?)
    }
}

/// Milliseconds since the epoch, so every request URL is unique.
fn cache_buster() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| u64::try_from(elapsed.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_advances() {
        let first = cache_buster();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(cache_buster() > first);
    }

    #[test]
    fn test_request_url_carries_cache_buster() -> Result<()> {
        let catalog = Catalog {
            spreadsheet_id: "abc".into(),
            sources: vec![SheetSource::new("May 25", "42")],
        };
        let fetcher = HttpFetcher::new(catalog.clone());
        let request = fetcher
            .client
            .get(catalog.export_url(&catalog.sources[0]))
            .query(&[("_", 123u64)])
            .build()?;

        assert_eq!(
            request.url().as_str(),
            "https://docs.google.com/spreadsheets/d/e/abc/pub?gid=42&single=true&output=csv&_=123"
        );
        Ok(())
    }
}
