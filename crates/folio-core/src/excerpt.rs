//! Plain-text summaries extracted from markdown bodies.

use std::sync::LazyLock;

use regex::Regex;

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("valid image regex"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\(.*?\)").expect("valid link regex"));

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Extract a short summary from a markdown body.
///
/// The first blockquote line wins and is returned whole. Otherwise the first
/// line that is neither a heading nor a code fence is used, with images and
/// links removed and the result cut to `max_chars` characters. Returns an
/// empty string if the body has no such line.
///
/// ```
/// use folio_core::excerpt::extract_summary;
///
/// let body = "# Title\n\n> A quoted summary.\n\nLater paragraph.";
/// assert_eq!(extract_summary(body, 150), "A quoted summary.");
/// ```
pub fn extract_summary(body: &str, max_chars: usize) -> String {
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            return line.trim_start_matches(['>', ' ']).trim().to_string();
        }

        if !line.starts_with('#') && !line.starts_with("```") {
            let without_images = IMAGE.replace_all(line, "");
            let plain = LINK.replace_all(&without_images, "");
            return truncate_chars(&plain, max_chars);
        }
    }

    String::new()
}

/// Cut `text` to at most `max_chars` characters, appending [`ELLIPSIS`] when
/// anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blockquote_wins_and_stops_the_scan() {
        let body = "\n\n> A quoted summary.\n\nA later paragraph that is ignored.";
        assert_eq!(extract_summary(body, 200), "A quoted summary.");
    }

    #[test]
    fn test_nested_blockquote_markers_are_stripped() {
        assert_eq!(extract_summary(">> >  deep quote  ", 200), "deep quote");
    }

    #[test]
    fn test_blockquote_is_not_truncated() {
        let quote = format!("> {}", "q".repeat(300));
        assert_eq!(extract_summary(&quote, 10).len(), 300);
    }

    #[test]
    fn test_headings_and_fences_are_skipped() {
        let body = "# Heading\n## Sub\n```rust\nFirst real line.\n";
        // The fence opener is skipped, the next line is not recognised as code.
        assert_eq!(extract_summary(body, 200), "First real line.");
    }

    #[test]
    fn test_images_and_links_are_removed() {
        let body = "![shot](img/a.png)See [the repo](https://x.y) for details.";
        assert_eq!(extract_summary(body, 200), "See  for details.");
    }

    #[test]
    fn test_line_reduced_to_nothing_still_ends_the_scan() {
        let body = "![only](a.png)\n\nSecond paragraph.";
        assert_eq!(extract_summary(body, 200), "");
    }

    #[test]
    fn test_no_candidate_line_yields_empty() {
        assert_eq!(extract_summary("", 200), "");
        assert_eq!(extract_summary("\n  \n# Only headings\n", 200), "");
    }

    #[test]
    fn test_long_paragraph_is_truncated_with_ellipsis() {
        let paragraph = "word ".repeat(100);
        let summary = extract_summary(&paragraph, 200);
        assert_eq!(summary.chars().count(), 200 + ELLIPSIS.len());
        assert!(summary.ends_with(ELLIPSIS));

        let summary = extract_summary(&paragraph, 150);
        assert_eq!(summary.chars().count(), 153);
    }

    #[test]
    fn test_exact_length_is_not_truncated() {
        let line = "x".repeat(150);
        assert_eq!(extract_summary(&line, 150), line);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("你好世界", 2), "你好...");
        assert_eq!(truncate_chars("Hello 🌟 World", 7), "Hello 🌟...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
