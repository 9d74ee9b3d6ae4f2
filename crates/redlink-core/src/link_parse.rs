//! Decomposition of one raw tracker link into URL components.

use thiserror::Error;

const ISSUE_PATH_PREFIX: &str = "/issues/";

#[derive(Debug, Error)]
/// Enumerates supported `LinkParseError` values.
pub enum LinkParseError {
    #[error("link cannot be decomposed as a url: {0}")]
    Unparseable(String),
    #[error("link has no host: {0}")]
    MissingHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `ParsedLink` used across Redlink crates.
pub struct ParsedLink {
    pub scheme: String,
    pub host: String,
    /// Explicit port, when the link carries a non-default one.
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl ParsedLink {
    /// Issue ID derived from the path segment after `/issues/`, when the
    /// path has that shape and the segment is purely numeric.
    pub fn issue_id(&self) -> Option<String> {
        let id = self.path.strip_prefix(ISSUE_PATH_PREFIX)?;
        if id.is_empty() || !id.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        Some(id.to_string())
    }

    /// Note-anchor suffix (`#note-<n>`) derived from the fragment; empty
    /// when the link carries no fragment.
    pub fn note_anchor(&self) -> String {
        match self.fragment.as_deref() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }
}

/// Parses one raw link into its components. Scheme-less input (bare
/// `host/issues/42`) is retried with an assumed `https://` prefix so both
/// forms decompose through the same path.
pub fn parse_link(raw: &str) -> Result<ParsedLink, LinkParseError> {
    let url = match reqwest::Url::parse(raw) {
        Ok(url) => url,
        Err(_) => reqwest::Url::parse(&format!("https://{raw}"))
            .map_err(|_| LinkParseError::Unparseable(raw.to_string()))?,
    };

    let host = url
        .host_str()
        .ok_or_else(|| LinkParseError::MissingHost(raw.to_string()))?
        .to_string();

    Ok(ParsedLink {
        scheme: url.scheme().to_string(),
        host,
        port: url.port(),
        path: url.path().to_string(),
        query: url.query().map(str::to_string),
        fragment: url.fragment().map(str::to_string),
    })
}
