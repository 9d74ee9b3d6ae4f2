//! Blocking HTTP client for the tracker's batch issue metadata query.
//!
//! One pipeline invocation issues exactly one `issues.json` request covering
//! every distinct issue ID found in the message; the response is decoded
//! into the normalized `IssueMetadata` records consumed by the formatter in
//! `redlink-core`.

pub mod issue_response;
pub mod tracker_client;

pub use issue_response::{issue_metadata_by_id, IssueRecord, IssuesResponse};
pub use tracker_client::{TrackerClient, TrackerFetchError, TRACKER_API_KEY_HEADER};
