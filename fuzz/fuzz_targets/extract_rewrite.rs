#![no_main]

use libfuzzer_sys::fuzz_target;
use redlink_core::{extract_tracker_links, rewrite_text};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let matches = extract_tracker_links(&text, "t.example");

    for raw in &matches {
        assert!(raw.contains("t.example/issues/"));
        assert!(!raw.ends_with('?'));
        assert!(!raw.ends_with('&'));
    }

    // Identity replacements must reconstruct the input byte-for-byte.
    assert_eq!(rewrite_text(&text, &matches, &matches), text.as_ref());

    // Fixed-size replacements must preserve the length relationship.
    let replacements: Vec<String> = matches.iter().map(|_| "<link>".to_string()).collect();
    let rewritten = rewrite_text(&text, &matches, &replacements);
    let matched_len: usize = matches.iter().map(String::len).sum();
    assert_eq!(
        rewritten.len(),
        text.len() - matched_len + "<link>".len() * matches.len()
    );
});
