//! Left-to-right extraction of tracker issue links from message text.
//!
//! Extraction is a two-pass scan: a deterministic regex finds candidate
//! spans (`host/issues/<digits>` with optional scheme, query, and
//! `#note-<n>` fragment), then direct window checks over the surrounding
//! text drop candidates already sitting inside markdown link syntax. The
//! checks run during the scan, so a rejected candidate never suppresses an
//! overlapping later one.

use regex::Regex;

/// Scans `text` for enrichable occurrences of tracker issue links and
/// returns the raw matched substrings in order of appearance, duplicates
/// preserved. Host matching is case-sensitive; issue IDs must be numeric.
pub fn extract_tracker_links(text: &str, tracker_host: &str) -> Vec<String> {
    let pattern = format!(
        r"(?:https?://)?{host}/issues/\d+(?:\?[\w-]+(?:=[\w-]*)?(?:&[\w-]+(?:=[\w-]*)?)*)?(?:#note-\d+)?",
        host = regex::escape(tracker_host)
    );
    let Ok(candidate) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut search_from = 0usize;
    while let Some(found) = candidate.find_at(text, search_from) {
        if is_enrichable(text, found.start(), found.end(), found.as_str()) {
            matches.push(found.as_str().to_string());
            search_from = found.end();
        } else {
            search_from = next_char_boundary(text, found.start());
        }
    }
    matches
}

fn is_enrichable(text: &str, start: usize, end: usize, matched: &str) -> bool {
    // Already in the URL slot of a markdown link: `[label](link)`.
    if text[..start].ends_with("](") {
        return false;
    }
    // Already in the text slot of a markdown link: a `]` follows the match
    // before any `[` opens a new one.
    let rest = &text[end..];
    let closed = match (rest.find(']'), rest.find('[')) {
        (Some(close), Some(open)) => close < open,
        (Some(_), None) => true,
        _ => false,
    };
    if closed {
        return false;
    }
    if matched.starts_with("http://") || matched.starts_with("https://") {
        return true;
    }
    // Scheme-less candidates need a host boundary: start of text,
    // whitespace, or a word character. Punctuation such as `/` or `.` does
    // not qualify, which keeps sub-candidates of an excluded markdown link
    // from re-matching at the host position.
    match text[..start].chars().next_back() {
        None => true,
        Some(ch) => ch.is_whitespace() || ch.is_alphanumeric() || ch == '_',
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    let mut next = index + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next.min(text.len())
}
