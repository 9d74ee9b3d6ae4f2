//! Typed decoding of the tracker's `issues.json` batch response.
//!
//! The tracker returns a much richer issue record (project, dates, done
//! ratio, spent hours); only the fields the formatter needs are modeled and
//! everything else is ignored by serde's default tolerance.

use std::collections::HashMap;

use redlink_core::IssueMetadata;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Top-level shape of the batch query response.
pub struct IssuesResponse {
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NamedField {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
/// One issue record as returned by the tracker. `assigned_to` is absent
/// when the issue is unassigned.
pub struct IssueRecord {
    pub id: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    status: NamedField,
    #[serde(default)]
    tracker: NamedField,
    #[serde(default)]
    priority: NamedField,
    #[serde(default)]
    author: NamedField,
    #[serde(default)]
    assigned_to: Option<NamedField>,
    #[serde(default)]
    pub updated_on: String,
}

/// Normalizes a decoded batch response into metadata records keyed by the
/// numeric issue ID rendered as a string. IDs requested but absent from
/// the response are simply missing from the map.
pub fn issue_metadata_by_id(response: IssuesResponse) -> HashMap<String, IssueMetadata> {
    response
        .issues
        .into_iter()
        .map(|issue| {
            let id = issue.id.to_string();
            let metadata = IssueMetadata {
                id: id.clone(),
                subject: issue.subject,
                status: issue.status.name,
                tracker: issue.tracker.name,
                priority: issue.priority.name,
                assignee: issue.assigned_to.unwrap_or_default().name,
                author: issue.author.name,
                updated_on: issue.updated_on,
            };
            (id, metadata)
        })
        .collect()
}
