mod config;
mod models;
mod pipeline;
mod scraper;
mod sink;
mod utils;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;
use crate::models::MovieRecord;
use crate::pipeline::{BarProgress, NullProgress, Pipeline, Progress};
use crate::scraper::ScrapeCenterSource;
use crate::sink::{read_movies, CsvSink, MovieSink, SinkOutcome, TerminalSink};
use crate::utils::Timer;

#[derive(Parser)]
#[command(name = "movie-scraper", about = "Scrape movie listings into CSV or a terminal poster wall", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape every listing page and save the movies as CSV
    Scrape {
        /// Output file (default: output.csv_path from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of listing pages to fetch (default: scraper.total_pages)
        #[arg(short, long)]
        pages: Option<u32>,
    },

    /// Scrape with a progress bar, then show a table and poster wall
    Browse {
        /// Number of listing pages to fetch (default: scraper.total_pages)
        #[arg(short, long)]
        pages: Option<u32>,

        /// Poster wall columns (default: output.grid_columns)
        #[arg(short, long)]
        columns: Option<usize>,
    },

    /// Show a previously exported CSV as table and poster wall
    Show {
        /// CSV file to read (default: output.csv_path from config)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "movie_scraper=info,warn",
        1 => "movie_scraper=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load()?;

    match cli.command {
        Command::Scrape { output, pages } => {
            if let Some(pages) = pages {
                config.scraper.total_pages = pages;
            }
            let path = output.unwrap_or_else(|| config.output.csv_path.clone());

            let movies = scrape(&config, &mut NullProgress).await?;
            let outcome = CsvSink::new(path).consume(movies)?;
            println!("{}", csv_summary(outcome)?);
        }

        Command::Browse { pages, columns } => {
            if let Some(pages) = pages {
                config.scraper.total_pages = pages;
            }
            let columns = columns.unwrap_or_else(|| config.output.columns());

            let movies = scrape(&config, &mut BarProgress::new()).await?;
            println!("Scraping complete! Found {} movies.", movies.len());
            show(movies, columns)?;
        }

        Command::Show { input } => {
            let path = input.unwrap_or_else(|| config.output.csv_path.clone());
            let movies = read_movies(&path)?;
            println!("{}: {} movies", path.display(), movies.len());
            show(movies, config.output.columns())?;
        }

        Command::Config => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Run every page through the pipeline and hand back the ordered records.
async fn scrape(config: &AppConfig, progress: &mut dyn Progress) -> Result<Vec<MovieRecord>> {
    let source = ScrapeCenterSource::new(&config.scraper)
        .context("Failed to build page source")?;
    let pipeline = Pipeline::new(&config.scraper)?;

    let timer = Timer::start(format!(
        "scrape of {} pages from {}",
        pipeline.total_pages(),
        config.scraper.base_url
    ));
    let outcome = pipeline.run(&source, progress).await;

    info!(
        "{}: {} movies from {}/{} pages ({} failed) in {:.1}s",
        timer.label(),
        outcome.stats.movies,
        outcome.stats.pages_fetched,
        pipeline.total_pages(),
        outcome.stats.pages_failed,
        timer.elapsed().as_secs_f64()
    );
    Ok(outcome.movies)
}

fn show(movies: Vec<MovieRecord>, columns: usize) -> Result<()> {
    let outcome = TerminalSink::stdout(columns).consume(movies)?;
    if let Some(line) = render_summary(outcome)? {
        println!("{}", line);
    }
    Ok(())
}

/// Closing line of a CSV run.
fn csv_summary(outcome: SinkOutcome) -> Result<String> {
    match outcome {
        SinkOutcome::Written { path, rows } => {
            Ok(format!("Successfully saved {} movies to {}", rows, path.display()))
        }
        SinkOutcome::Empty => Ok("No movies were scraped. CSV file not created.".to_string()),
        other => bail!("CSV sink returned {:?}", other),
    }
}

/// Line to print after the terminal sink ran; a rendered table speaks for itself.
fn render_summary(outcome: SinkOutcome) -> Result<Option<String>> {
    match outcome {
        SinkOutcome::Rendered { rows } => {
            info!("Rendered {} movies", rows);
            Ok(None)
        }
        SinkOutcome::Empty => Ok(Some("No movies to show.".to_string())),
        other => bail!("terminal sink returned {:?}", other),
    }
}
