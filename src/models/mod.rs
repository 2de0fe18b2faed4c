use serde::{Deserialize, Serialize};

/// Placeholder for a title, cover or score the card did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator between genre names in `MovieRecord::genres`.
pub const GENRE_SEPARATOR: &str = ", ";

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 4] = ["title", "image_url", "rating", "genres"];

// ── Movie ─────────────────────────────────────────────────────────────────────

/// One listing card. Every field is kept as the text the page served,
/// rating included ("9.5", never parsed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub image_url: String,
    pub rating: String,
    /// Genre names joined with `GENRE_SEPARATOR`; empty when the card has no
    /// categories block (not `NOT_AVAILABLE`).
    pub genres: String,
}

impl MovieRecord {
    pub fn has_image(&self) -> bool {
        self.image_url != NOT_AVAILABLE
    }

    /// Poster caption: "{title} ({rating})".
    pub fn caption(&self) -> String {
        format!("{} ({})", self.title, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(image_url: &str) -> MovieRecord {
        MovieRecord {
            title: "霸王别姬 - Farewell My Concubine".into(),
            image_url: image_url.into(),
            rating: "9.5".into(),
            genres: "剧情, 爱情".into(),
        }
    }

    #[test]
    fn test_caption() {
        assert_eq!(record("x").caption(), "霸王别姬 - Farewell My Concubine (9.5)");
    }

    #[test]
    fn test_has_image() {
        assert!(record("https://p0.meituan.net/movie/a.jpg").has_image());
        assert!(!record(NOT_AVAILABLE).has_image());
    }
}
