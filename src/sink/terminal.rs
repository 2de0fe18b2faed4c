//! Interactive rendering: a data table followed by a poster wall.
//!
//! The wall is laid out in a fixed number of columns, movie `i` landing in
//! column `i % columns`. Each cell shows the poster reference with a
//! "{title} ({rating})" caption underneath. Movies without a poster keep their
//! cell but show a placeholder instead of the image.

use crate::models::{MovieRecord, CSV_HEADER};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{MovieSink, SinkOutcome};

/// Widest a table cell gets, in terminal cells, before it is cut with an ellipsis.
const MAX_CELL: usize = 48;
/// Width of one poster cell, in terminal cells.
const POSTER_CELL: usize = 32;
const NO_POSTER: &str = "[no poster]";

pub struct TerminalSink<W: Write> {
    out: W,
    columns: usize,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(columns: usize) -> Self {
        Self::new(io::stdout(), columns)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, columns: usize) -> Self {
        Self {
            out,
            columns: columns.max(1),
        }
    }

    fn render_table(&mut self, movies: &[MovieRecord]) -> io::Result<()> {
        let rows: Vec<[String; 5]> = movies
            .iter()
            .enumerate()
            .map(|(i, m)| {
                [
                    (i + 1).to_string(),
                    fit(&m.title, MAX_CELL),
                    fit(&m.image_url, MAX_CELL),
                    fit(&m.rating, MAX_CELL),
                    fit(&m.genres, MAX_CELL),
                ]
            })
            .collect();

        let header = ["#", CSV_HEADER[0], CSV_HEADER[1], CSV_HEADER[2], CSV_HEADER[3]];
        let mut widths = header.map(width);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }

        let rule = "─".repeat(widths.iter().sum::<usize>() + 2 * widths.len());
        writeln!(self.out, "{}", rule)?;
        self.write_row(&header[..], &widths)?;
        writeln!(self.out, "{}", rule)?;
        for row in &rows {
            self.write_row(&row[..], &widths)?;
        }
        writeln!(self.out, "{}", rule)
    }

    fn write_row<S: AsRef<str>>(&mut self, cells: &[S], widths: &[usize]) -> io::Result<()> {
        let line: String = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| pad(c.as_ref(), *w))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.out, "{}", line.trim_end())
    }

    fn render_wall(&mut self, movies: &[MovieRecord]) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Poster wall ({} columns)", self.columns)?;
        writeln!(self.out)?;

        let mut posters = Vec::with_capacity(self.columns);
        let mut captions = Vec::with_capacity(self.columns);

        for (i, movie) in movies.iter().enumerate() {
            let poster = if movie.has_image() {
                fit(&movie.image_url, POSTER_CELL)
            } else {
                warn!("No poster for {:?}, leaving its cell blank", movie.title);
                NO_POSTER.to_string()
            };
            posters.push(pad(&poster, POSTER_CELL));
            captions.push(pad(&fit(&movie.caption(), POSTER_CELL), POSTER_CELL));

            let column = i % self.columns;
            if column == self.columns - 1 || i == movies.len() - 1 {
                writeln!(self.out, "{}", posters.join("  ").trim_end())?;
                writeln!(self.out, "{}", captions.join("  ").trim_end())?;
                writeln!(self.out)?;
                posters.clear();
                captions.clear();
            }
        }
        Ok(())
    }
}

impl<W: Write> MovieSink for TerminalSink<W> {
    fn consume(&mut self, movies: Vec<MovieRecord>) -> Result<SinkOutcome> {
        if movies.is_empty() {
            return Ok(SinkOutcome::Empty);
        }

        self.render_table(&movies).context("Failed to render table")?;
        self.render_wall(&movies).context("Failed to render poster wall")?;
        self.out.flush().context("Failed to flush output")?;

        Ok(SinkOutcome::Rendered { rows: movies.len() })
    }
}

// ── Layout helpers ────────────────────────────────────────────────────────────

/// Display width in terminal cells; CJK characters take two.
fn width(s: impl AsRef<str>) -> usize {
    UnicodeWidthStr::width(s.as_ref())
}

/// Cut to `max` cells, ending in an ellipsis when anything was dropped.
fn fit(s: &str, max: usize) -> String {
    let s = s.replace('\n', " ");
    if width(&s) <= max {
        return s;
    }

    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn pad(s: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(s));
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    impl<W: Write> TerminalSink<W> {
        fn into_inner(self) -> W {
            self.out
        }
    }

    fn movie(n: usize, image: bool) -> MovieRecord {
        MovieRecord {
            title: format!("Movie {n}"),
            image_url: if image { format!("https://img.example/{n}.jpg") } else { NOT_AVAILABLE.into() },
            rating: format!("{}.0", n % 10),
            genres: "Drama, Crime".into(),
        }
    }

    fn render(movies: Vec<MovieRecord>, columns: usize) -> (SinkOutcome, String) {
        let mut sink = TerminalSink::new(Vec::new(), columns);
        let outcome = sink.consume(movies).unwrap();
        (outcome, String::from_utf8(sink.into_inner()).unwrap())
    }

    #[test]
    fn test_empty_renders_nothing() {
        let (outcome, text) = render(Vec::new(), 4);
        assert_eq!(outcome, SinkOutcome::Empty);
        assert!(text.is_empty());
    }

    #[test]
    fn test_table_lists_every_movie() {
        let (outcome, text) = render((1..=3).map(|n| movie(n, true)).collect(), 4);
        assert_eq!(outcome, SinkOutcome::Rendered { rows: 3 });

        let header = text.lines().nth(1).unwrap();
        for col in ["#", "title", "image_url", "rating", "genres"] {
            assert!(header.contains(col));
        }
        assert!(text.contains("Movie 2"));
        assert!(text.contains("https://img.example/3.jpg"));
    }

    #[test]
    fn test_wall_wraps_by_column_count() {
        let (_, text) = render((1..=5).map(|n| movie(n, true)).collect(), 2);
        let wall = text.split("Poster wall (2 columns)").nth(1).unwrap();
        let caption_rows: Vec<&str> = wall.lines().filter(|l| l.contains('(')).collect();

        assert_eq!(caption_rows.len(), 3);
        assert!(caption_rows[0].contains("Movie 1 (1.0)") && caption_rows[0].contains("Movie 2 (2.0)"));
        assert!(caption_rows[1].contains("Movie 3 (3.0)") && caption_rows[1].contains("Movie 4 (4.0)"));
        assert!(caption_rows[2].contains("Movie 5 (5.0)"));
    }

    #[test]
    fn test_missing_poster_gets_placeholder() {
        let (outcome, text) = render(vec![movie(1, true), movie(2, false)], 3);
        assert_eq!(outcome, SinkOutcome::Rendered { rows: 2 });

        let wall = text.split("Poster wall").nth(1).unwrap();
        let poster_row = wall.lines().find(|l| l.contains("img.example")).unwrap();
        assert!(poster_row.contains(NO_POSTER));
        assert!(wall.contains("Movie 2 (2.0)"));
    }

    #[test]
    fn test_zero_columns_is_one() {
        let (_, text) = render(vec![movie(1, true), movie(2, true)], 0);
        assert!(text.contains("Poster wall (1 columns)"));
    }

    #[test]
    fn test_fit_and_pad() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abcdefghij", 5), "abcd…");
        assert_eq!(fit("霸王别姬霸王别姬", 4), "霸…");
        assert_eq!(fit("霸王别姬霸王别姬", 5), "霸王…");
        assert_eq!(width("霸王别姬"), 8);
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_cjk_titles_keep_columns_aligned() {
        let movies = vec![
            MovieRecord {
                title: "霸王别姬".into(),
                image_url: "https://a/1.jpg".into(),
                rating: "9.5".into(),
                genres: "剧情".into(),
            },
            MovieRecord {
                title: "Abcd".into(),
                image_url: "https://a/2.jpg".into(),
                rating: "9.4".into(),
                genres: "Drama".into(),
            },
        ];
        let (_, text) = render(movies, 2);

        let url_columns: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('1') || l.starts_with('2'))
            .filter_map(|l| l.find("https://").map(|i| width(&l[..i])))
            .collect();
        assert_eq!(url_columns.len(), 2);
        assert_eq!(url_columns[0], url_columns[1]);

        let rating_columns: Vec<usize> = text
            .lines()
            .filter_map(|l| l.find("9.").map(|i| width(&l[..i])))
            .take(2)
            .collect();
        assert_eq!(rating_columns[0], rating_columns[1]);
    }

    #[test]
    fn test_cjk_captions_pad_to_poster_cell() {
        let movies = vec![
            MovieRecord {
                title: "霸王别姬".into(),
                image_url: "https://a/1.jpg".into(),
                rating: "9.5".into(),
                genres: "".into(),
            },
            MovieRecord {
                title: "Abcd".into(),
                image_url: "https://a/2.jpg".into(),
                rating: "9.4".into(),
                genres: "".into(),
            },
        ];
        let (_, text) = render(movies, 2);
        let wall = text.split("Poster wall (2 columns)").nth(1).unwrap();
        let caption = wall.lines().find(|l| l.contains("霸王别姬 (9.5)")).unwrap();

        let second = caption.find("Abcd (9.4)").unwrap();
        assert_eq!(width(&caption[..second]), POSTER_CELL + 2);
    }
}
