//! Message hook orchestration for tracker link enrichment.

use std::collections::HashMap;
use std::sync::Arc;

use redlink_core::{
    extract_tracker_links, format_replacement, parse_link, rewrite_text, IssueMetadata,
};
use redlink_tracker::{TrackerClient, TrackerFetchError};

use crate::plugin_config::{tracker_base_and_host, ConfigHandle};

/// Seam between the pipeline and the tracker transport. The production
/// implementation is `TrackerClient`; tests substitute an in-memory source.
pub trait IssueMetadataSource: Send + Sync {
    fn fetch_issues(
        &self,
        tracker_base: &str,
        api_key: Option<&str>,
        issue_ids: &[String],
    ) -> Result<HashMap<String, IssueMetadata>, TrackerFetchError>;
}

impl IssueMetadataSource for TrackerClient {
    fn fetch_issues(
        &self,
        tracker_base: &str,
        api_key: Option<&str>,
        issue_ids: &[String],
    ) -> Result<HashMap<String, IssueMetadata>, TrackerFetchError> {
        TrackerClient::fetch_issues(self, tracker_base, api_key, issue_ids)
    }
}

/// Runs the enrichment pipeline over one message: extract candidate links,
/// derive issue IDs, fetch the batch metadata, and rewrite the text. Fails
/// open at every layer: a malformed link keeps its raw text, an ID absent
/// from the response keeps its raw link, and a batch fetch failure returns
/// the whole message unchanged.
pub fn enrich_message(
    text: &str,
    tracker_base: &str,
    tracker_host: &str,
    api_key: Option<&str>,
    source: &dyn IssueMetadataSource,
) -> String {
    let links = extract_tracker_links(text, tracker_host);
    if links.is_empty() {
        return text.to_string();
    }

    let mut issue_ids = Vec::with_capacity(links.len());
    let mut note_anchors = Vec::with_capacity(links.len());
    for link in &links {
        match parse_link(link) {
            Ok(parsed) => {
                issue_ids.push(parsed.issue_id());
                note_anchors.push(parsed.note_anchor());
            }
            Err(error) => {
                tracing::debug!(link = %link, error = %error, "skipping malformed tracker link");
                issue_ids.push(None);
                note_anchors.push(String::new());
            }
        }
    }

    let batch: Vec<String> = issue_ids.iter().flatten().cloned().collect();
    if batch.is_empty() {
        return text.to_string();
    }

    let metadata = match source.fetch_issues(tracker_base, api_key, &batch) {
        Ok(metadata) => metadata,
        Err(error) => {
            tracing::warn!(
                error = %error,
                "tracker metadata fetch failed; message left unchanged"
            );
            return text.to_string();
        }
    };

    let replacements: Vec<String> = links
        .iter()
        .zip(issue_ids.iter().zip(&note_anchors))
        .map(|(link, (issue_id, note_anchor))| {
            let record = issue_id.as_deref().and_then(|id| metadata.get(id));
            format_replacement(link, note_anchor, record)
        })
        .collect();

    rewrite_text(text, &links, &replacements)
}

/// Host-facing hook. Reads one configuration snapshot per invocation;
/// enrichment failures are silent and never surface to the message author.
pub struct MessageHook<S: IssueMetadataSource> {
    config: Arc<ConfigHandle>,
    source: S,
}

impl<S: IssueMetadataSource> MessageHook<S> {
    pub fn new(config: Arc<ConfigHandle>, source: S) -> Self {
        Self { config, source }
    }

    /// Returns the message text to store: either fully rewritten or the
    /// original unchanged. An unset or unparseable tracker URL disables
    /// the pipeline.
    pub fn message_will_be_posted(&self, message: &str) -> String {
        let config = self.config.snapshot();
        let Some((tracker_base, tracker_host)) = tracker_base_and_host(&config.tracker_url)
        else {
            return message.to_string();
        };
        enrich_message(
            message,
            &tracker_base,
            &tracker_host,
            config.api_key(),
            &self.source,
        )
    }

    /// Edited messages run through the same pipeline as new ones.
    pub fn message_will_be_updated(&self, new_message: &str) -> String {
        self.message_will_be_posted(new_message)
    }
}
