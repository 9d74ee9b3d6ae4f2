//! Pure text pipeline for tracker link enrichment.
//!
//! Provides link parsing/extraction, enriched-link formatting, and the
//! cursor-based text rewriter consumed by the runtime hook. No I/O happens
//! in this crate; the tracker client and hook orchestration live in
//! `redlink-tracker` and `redlink-runtime`.

pub mod link_extract;
pub mod link_format;
pub mod link_parse;
pub mod rewrite;

pub use link_extract::extract_tracker_links;
pub use link_format::{format_replacement, IssueMetadata};
pub use link_parse::{parse_link, LinkParseError, ParsedLink};
pub use rewrite::rewrite_text;
