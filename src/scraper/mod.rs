pub mod cleaner;
pub mod error;
pub mod http_client;
pub mod parsers;
#[cfg(test)]
pub(crate) mod test_server;

use crate::config::ScraperConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use url::Url;

pub use self::error::FetchError;
pub use self::parsers::MovieExtractor;

use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable listing-page source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Where page `page` lives; used for logging.
    fn page_url(&self, page: u32) -> String;

    /// Raw HTML of listing page `page` (1-based).
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError>;
}

// ── scrape.center source ──────────────────────────────────────────────────────

pub struct ScrapeCenterSource {
    client: HttpClient,
    base_url: String,
}

impl ScrapeCenterSource {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url {:?}", config.base_url))?;

        Ok(Self {
            client: HttpClient::new(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PageSource for ScrapeCenterSource {
    /// e.g. 3 → https://ssr1.scrape.center/page/3
    fn page_url(&self, page: u32) -> String {
        format!("{}/page/{}", self.base_url, page)
    }

    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        self.client.get_text(&self.page_url(page)).await
    }
}
