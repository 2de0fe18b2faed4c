use crate::models::{GENRE_SEPARATOR, NOT_AVAILABLE};
use scraper::ElementRef;

// ── Text ──────────────────────────────────────────────────────────────────────

/// All descendant text of an element, trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text, or `NOT_AVAILABLE` when the element is missing.
/// An element present with empty text stays empty.
pub fn text_or_sentinel(el: Option<ElementRef<'_>>) -> String {
    el.map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Attribute value verbatim, or `NOT_AVAILABLE` when element or attribute is missing.
pub fn attr_or_sentinel(el: Option<ElementRef<'_>>, attr: &str) -> String {
    el.and_then(|e| e.value().attr(attr))
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// ── Genres ────────────────────────────────────────────────────────────────────

/// "剧情", " 爱情 " → "剧情, 爱情". Empty input gives an empty string.
pub fn join_genres<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(GENRE_SEPARATOR)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_join_genres() {
        assert_eq!(join_genres(["剧情", " 爱情 ", "\n同性"]), "剧情, 爱情, 同性");
        assert_eq!(join_genres(["Drama"]), "Drama");
        assert_eq!(join_genres(Vec::<String>::new()), "");
    }

    #[test]
    fn test_text_and_attr_sentinels() {
        let doc = Html::parse_fragment(r#"<p class="score"> 9.5 </p><img class="cover">"#);
        let p = doc.select(&Selector::parse("p").unwrap()).next();
        let img = doc.select(&Selector::parse("img").unwrap()).next();
        let h2 = doc.select(&Selector::parse("h2").unwrap()).next();

        assert_eq!(text_or_sentinel(p), "9.5");
        assert_eq!(text_or_sentinel(h2), NOT_AVAILABLE);
        assert_eq!(attr_or_sentinel(img, "src"), NOT_AVAILABLE);
        assert_eq!(attr_or_sentinel(h2, "src"), NOT_AVAILABLE);
    }
}
