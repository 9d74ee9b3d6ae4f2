//! Order-preserving reconstruction of message text around replaced links.

/// Splices `replacements` into `text` at the successive occurrences of the
/// parallel `matches` sequence. A forward-only cursor locates each match at
/// or after the previous one, so a link that repeats consumes successive
/// occurrences instead of re-matching the first. A match that cannot be
/// located ahead of the cursor is skipped without disturbing the cursor;
/// all unmatched spans are carried over byte-identical.
pub fn rewrite_text(text: &str, matches: &[String], replacements: &[String]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for (raw, replacement) in matches.iter().zip(replacements) {
        let Some(offset) = text[cursor..].find(raw.as_str()) else {
            continue;
        };
        let start = cursor + offset;
        output.push_str(&text[cursor..start]);
        output.push_str(replacement);
        cursor = start + raw.len();
    }

    output.push_str(&text[cursor..]);
    output
}
