use crate::models::MovieRecord;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::cleaner::{attr_or_sentinel, element_text, join_genres, text_or_sentinel};

// ── Listing page layout ───────────────────────────────────────────────────────

/// A card is matched on its full class attribute, not on any one class.
const CARD: &str = r#"div[class="el-card item m-t is-hover-shadow"]"#;
const TITLE: &str = "h2.m-b-sm";
const COVER: &str = "img.cover";
const SCORE: &str = "p.score";
const CATEGORIES: &str = "div.categories";
const GENRE: &str = "span";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("{} selector: {:?}", css, e))
}

/// Turns one listing page into movie records.
///
/// Selectors are compiled once here so that `extract` itself has no failure
/// path: markup that doesn't match degrades to sentinel fields or to an
/// empty page, never to an error.
pub struct MovieExtractor {
    card: Selector,
    title: Selector,
    cover: Selector,
    score: Selector,
    categories: Selector,
    genre: Selector,
}

impl MovieExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            card: selector(CARD)?,
            title: selector(TITLE)?,
            cover: selector(COVER)?,
            score: selector(SCORE)?,
            categories: selector(CATEGORIES)?,
            genre: selector(GENRE)?,
        })
    }

    /// One record per card, in document order.
    pub fn extract(&self, html: &str) -> Vec<MovieRecord> {
        let doc = Html::parse_document(html);

        let movies: Vec<MovieRecord> = doc
            .select(&self.card)
            .map(|card| self.extract_card(card))
            .collect();

        debug!("{} cards on page", movies.len());
        movies
    }

    fn extract_card(&self, card: ElementRef<'_>) -> MovieRecord {
        let first = |sel: &Selector| card.select(sel).next();

        // Absent categories block → "", unlike the other three fields.
        let genres = first(&self.categories)
            .map(|cats| join_genres(cats.select(&self.genre).map(element_text)))
            .unwrap_or_default();

        MovieRecord {
            title: text_or_sentinel(first(&self.title)),
            image_url: attr_or_sentinel(first(&self.cover), "src"),
            rating: text_or_sentinel(first(&self.score)),
            genres,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
