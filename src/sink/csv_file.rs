//! CSV export and re-import of movie records.

use crate::models::MovieRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{MovieSink, SinkOutcome};

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MovieSink for CsvSink {
    /// Writes `title,image_url,rating,genres` plus one row per movie,
    /// overwriting any previous file. An empty run leaves the disk untouched.
    fn consume(&mut self, movies: Vec<MovieRecord>) -> Result<SinkOutcome> {
        if movies.is_empty() {
            debug!("No movies, not creating {:?}", self.path);
            return Ok(SinkOutcome::Empty);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create dir {:?}", parent))?;
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create {:?}", self.path))?;

        for movie in &movies {
            writer
                .serialize(movie)
                .with_context(|| format!("write row {:?}", movie.title))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush {:?}", self.path))?;

        info!("Saved {} movies to {:?}", movies.len(), self.path);
        Ok(SinkOutcome::Written {
            path: self.path.clone(),
            rows: movies.len(),
        })
    }
}

/// Load a previously exported file. Rows that don't fit the four-column
/// layout are logged and skipped.
pub fn read_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    let mut movies = Vec::new();
    for (i, result) in reader.deserialize::<MovieRecord>().enumerate() {
        match result {
            Ok(m) => movies.push(m),
            Err(e) => warn!("Row {} in {:?}: {}", i + 1, path, e),
        }
    }

    debug!("{}: {} movies loaded", path.display(), movies.len());
    Ok(movies)
}
