//! Pipeline orchestrator: ties page source → extractor → accumulator together.
//!
//! Pages `1..=total_pages` are fetched strictly in order; page `n + 1` is not
//! requested until page `n` has been extracted and appended. A page that fails
//! to fetch is logged and contributes no records. The run itself never fails:
//! the caller always gets back whatever was collected, ready for one sink.

pub mod progress;

use crate::config::ScraperConfig;
use crate::models::MovieRecord;
use crate::scraper::{MovieExtractor, PageSource};
use anyhow::Result;
use tracing::{info, warn};

pub use self::progress::{BarProgress, NullProgress, Progress};

pub struct Pipeline {
    extractor: MovieExtractor,
    total_pages: u32,
}

impl Pipeline {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            extractor: MovieExtractor::new()?,
            total_pages: config.total_pages,
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub async fn run(&self, source: &dyn PageSource, progress: &mut dyn Progress) -> ScrapeOutcome {
        let mut movies = Vec::new();
        let mut stats = PipelineStats::default();

        progress.begin(self.total_pages);

        for page in 1..=self.total_pages {
            info!("Scraping {}...", source.page_url(page));

            let found = match source.fetch_page(page).await {
                Ok(html) => self.extractor.extract(&html),
                Err(e) => {
                    if e.is_timeout() {
                        warn!("Error fetching {}: timed out", e.url());
                    } else {
                        warn!("Error fetching {}: {}", e.url(), e);
                    }
                    stats.pages_failed += 1;
                    progress.page_failed(page, &e);
                    continue;
                }
            };

            info!("Found {} movies on page {}.", found.len(), page);
            stats.pages_fetched += 1;
            progress.page_done(page, found.len());
            movies.extend(found);
        }

        stats.movies = movies.len();
        progress.finish(stats.movies);

        info!(
            "=== Done: {} pages fetched | {} failed | {} movies ===",
            stats.pages_fetched, stats.pages_failed, stats.movies
        );

        ScrapeOutcome { movies, stats }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub pages_fetched: u32,
    pub pages_failed: u32,
    pub movies: usize,
}

/// Everything a run produced, in page order then document order.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub movies: Vec<MovieRecord>,
    pub stats: PipelineStats,
}
