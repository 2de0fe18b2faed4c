//! Per-page progress reporting for a scrape run.
//!
//! The pipeline logs through `tracing` on its own; these hooks exist for
//! frontends that want a live indicator on top of that.

use indicatif::{ProgressBar, ProgressStyle};

use crate::scraper::FetchError;

pub trait Progress {
    /// Called once before the first page with the fixed page count.
    fn begin(&mut self, _total_pages: u32) {}

    /// Page fetched and extracted.
    fn page_done(&mut self, _page: u32, _found: usize) {}

    /// Page could not be fetched; it contributes nothing.
    fn page_failed(&mut self, _page: u32, _err: &FetchError) {}

    /// Called once after the last page.
    fn finish(&mut self, _total_movies: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Terminal progress bar, one tick per completed page.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
    movies: usize,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) {
        if let Some(pb) = &self.bar {
            pb.set_message(format!("{} movies", self.movies));
            pb.inc(1);
        }
    }
}

impl Progress for BarProgress {
    fn begin(&mut self, total_pages: u32) {
        let pb = ProgressBar::new(u64::from(total_pages));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} page {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        self.bar = Some(pb);
        self.movies = 0;
    }

    fn page_done(&mut self, _page: u32, found: usize) {
        self.movies += found;
        self.tick();
    }

    fn page_failed(&mut self, page: u32, err: &FetchError) {
        if let Some(pb) = &self.bar {
            pb.println(format!("page {}: {}", page, err));
        }
        self.tick();
    }

    fn finish(&mut self, _total_movies: usize) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}
