//! Blocking client for the tracker's batch issue query endpoint.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use redlink_core::IssueMetadata;
use thiserror::Error;

use crate::issue_response::{issue_metadata_by_id, IssuesResponse};

/// Header carrying the tracker API key when one is configured.
pub const TRACKER_API_KEY_HEADER: &str = "X-Redmine-API-Key";

#[derive(Debug, Error)]
/// Enumerates supported `TrackerFetchError` values. Any variant means the
/// whole batch failed; callers must leave the message unmodified rather
/// than partially enriching it.
pub enum TrackerFetchError {
    #[error("tracker request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("tracker returned non-success status {status}")]
    HttpStatus { status: u16 },
    #[error("failed to decode tracker response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
/// Public struct `TrackerClient` used across Redlink crates. Holds only
/// the connection pool; the tracker base URL and API key are supplied per
/// call from the configuration snapshot of the current invocation.
pub struct TrackerClient {
    http: reqwest::blocking::Client,
}

impl TrackerClient {
    pub fn new(request_timeout_ms: u64) -> Result<Self, TrackerFetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("redlink"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()?;
        Ok(Self { http })
    }

    /// Issues the single batched metadata query for one pipeline
    /// invocation: `<base>/issues.json?issue_id=<comma-joined>&status_id=*`.
    /// IDs are deduplicated in first-seen order before joining. An empty ID
    /// list short-circuits to an empty map without touching the network.
    pub fn fetch_issues(
        &self,
        tracker_base: &str,
        api_key: Option<&str>,
        issue_ids: &[String],
    ) -> Result<HashMap<String, IssueMetadata>, TrackerFetchError> {
        let ids = dedup_preserving_order(issue_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!(
            "{}/issues.json?issue_id={}&status_id=*",
            tracker_base.trim_end_matches('/'),
            ids.join(","),
        );
        tracing::debug!(issue_count = ids.len(), "fetching tracker issue metadata");

        let mut request = self.http.get(&url);
        if let Some(api_key) = api_key.filter(|key| !key.is_empty()) {
            request = request.header(TRACKER_API_KEY_HEADER, api_key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerFetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let decoded: IssuesResponse = serde_json::from_str(&body)?;
        Ok(issue_metadata_by_id(decoded))
    }
}

fn dedup_preserving_order(issue_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    issue_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
