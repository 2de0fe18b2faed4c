//! Terminal consumers of a finished run. Exactly one sink sees the records.

pub mod csv_file;
pub mod terminal;

use crate::models::MovieRecord;
use anyhow::Result;
use std::path::PathBuf;

pub use self::csv_file::{read_movies, CsvSink};
pub use self::terminal::TerminalSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Nothing to consume; no file was created and nothing was drawn.
    Empty,
    Written { path: PathBuf, rows: usize },
    Rendered { rows: usize },
}

pub trait MovieSink {
    fn consume(&mut self, movies: Vec<MovieRecord>) -> Result<SinkOutcome>;
}
