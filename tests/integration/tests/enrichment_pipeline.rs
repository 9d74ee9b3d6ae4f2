//! End-to-end hook scenarios: a real `TrackerClient` against a mock
//! tracker server, driven through the host-facing `MessageHook`.

use std::sync::Arc;

use anyhow::Result;
use httpmock::{Method::GET, MockServer};
use redlink_runtime::{ConfigHandle, MessageHook, PluginConfig};
use redlink_tracker::TrackerClient;
use serde_json::json;

const REQUEST_TIMEOUT_MS: u64 = 5_000;

fn issue_body(id: u64, subject: &str, tracker: &str, updated_on: &str) -> serde_json::Value {
    json!({
        "id": id,
        "subject": subject,
        "status": {"id": 5, "name": "Closed", "is_closed": true},
        "tracker": {"id": 2, "name": tracker},
        "priority": {"id": 4, "name": "Normal"},
        "author": {"id": 1, "name": "Yasu Saku"},
        "assigned_to": {"id": 2, "name": "Marius BĂLTEANU"},
        "updated_on": updated_on,
        "done_ratio": 100,
        "created_on": "2024-01-01T00:00:00Z"
    })
}

fn hook_for(server: &MockServer, api_key: &str) -> Result<MessageHook<TrackerClient>> {
    let config = Arc::new(ConfigHandle::new(PluginConfig {
        tracker_url: server.base_url(),
        api_key: api_key.to_string(),
    }));
    Ok(MessageHook::new(config, TrackerClient::new(REQUEST_TIMEOUT_MS)?))
}

#[test]
fn pipeline_enriches_mixed_scheme_links_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/issues.json")
            .query_param("issue_id", "40556,40557")
            .query_param("status_id", "*")
            .header("X-Redmine-API-Key", "team-api-key");
        then.status(200).json_body(json!({
            "issues": [
                issue_body(40556, "Fix bug", "Feature", "2024-04-29T19:23:49Z"),
                issue_body(40557, "Fix icons", "Patch", "2024-04-16T19:26:17Z"),
            ],
            "total_count": 2
        }));
    });

    let hook = hook_for(&server, "team-api-key")?;
    let message = format!(
        "deploy blocked by http://{host}/issues/40556 and {host}/issues/40557 today"
    );
    let result = hook.message_will_be_posted(&message);

    let tooltip_40556 = "Assignee: Marius BĂLTEANU&#013;Priority: Normal&#013;Status: Closed\
                         &#013;Author: Yasu Saku&#013;Last update: Mon, 29 Apr 2024 22:23:49 EEST";
    let tooltip_40557 = "Assignee: Marius BĂLTEANU&#013;Priority: Normal&#013;Status: Closed\
                         &#013;Author: Yasu Saku&#013;Last update: Tue, 16 Apr 2024 22:26:17 EEST";
    let expected = format!(
        "deploy blocked by [Feature#40556: Fix bug](http://{host}/issues/40556 \"{tooltip_40556}\") \
         and [Patch#40557: Fix icons]({host}/issues/40557 \"{tooltip_40557}\") today"
    );
    assert_eq!(result, expected);
    mock.assert_hits(1);
    Ok(())
}

#[test]
fn pipeline_is_idempotent_over_its_own_output() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/issues.json")
            .query_param("issue_id", "40557");
        then.status(200).json_body(json!({
            "issues": [issue_body(40557, "Fix icons", "Patch", "2024-04-16T19:26:17Z")]
        }));
    });

    let hook = hook_for(&server, "")?;
    let message = format!(
        "[already enriched](http://{host}/issues/40556) plus bare http://{host}/issues/40557"
    );
    let first = hook.message_will_be_posted(&message);
    assert!(first.starts_with(&format!(
        "[already enriched](http://{host}/issues/40556) plus bare [Patch#40557: Fix icons]"
    )));

    // A second pass finds nothing left to enrich and never hits the tracker.
    let second = hook.message_will_be_posted(&first);
    assert_eq!(second, first);
    mock.assert_hits(1);
    Ok(())
}

#[test]
fn pipeline_preserves_query_and_note_anchor() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    server.mock(|when, then| {
        when.method(GET)
            .path("/issues.json")
            .query_param("issue_id", "40538");
        then.status(200).json_body(json!({
            "issues": [issue_body(40538, "Version Extended", "Patch", "2024-04-09T10:42:41Z")]
        }));
    });

    let hook = hook_for(&server, "")?;
    let raw = format!("http://{host}/issues/40538?issue_count=453&issue_position=2#note-4");
    let result = hook.message_will_be_posted(&format!("see {raw}"));

    assert!(result.starts_with("see [Patch#40538: Version Extended#note-4]("));
    assert!(result.contains(&format!("({raw} \"")));
    Ok(())
}

#[test]
fn pipeline_falls_back_per_link_for_unknown_ids() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    server.mock(|when, then| {
        when.method(GET)
            .path("/issues.json")
            .query_param("issue_id", "40556,999999");
        then.status(200).json_body(json!({
            "issues": [issue_body(40556, "Fix bug", "Feature", "2024-04-29T19:23:49Z")]
        }));
    });

    let hook = hook_for(&server, "")?;
    let message = format!("http://{host}/issues/40556 and http://{host}/issues/999999");
    let result = hook.message_will_be_posted(&message);

    assert!(result.starts_with("[Feature#40556: Fix bug]("));
    assert!(result.ends_with(&format!(" and http://{host}/issues/999999")));
    Ok(())
}

#[test]
fn pipeline_returns_original_message_when_tracker_fails() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    let mock = server.mock(|when, then| {
        when.method(GET).path("/issues.json");
        then.status(503);
    });

    let hook = hook_for(&server, "")?;
    let message = format!("http://{host}/issues/1 and http://{host}/issues/2");
    assert_eq!(hook.message_will_be_posted(&message), message);
    mock.assert_hits(1);
    Ok(())
}

#[test]
fn pipeline_is_disabled_without_tracker_url() -> Result<()> {
    let config = Arc::new(ConfigHandle::new(PluginConfig::default()));
    let hook = MessageHook::new(config, TrackerClient::new(REQUEST_TIMEOUT_MS)?);
    let message = "http://t.example/issues/1 stays as typed";
    assert_eq!(hook.message_will_be_posted(message), message);
    Ok(())
}

#[test]
fn updated_messages_run_through_the_same_pipeline() -> Result<()> {
    let server = MockServer::start();
    let host = format!("127.0.0.1:{}", server.port());
    server.mock(|when, then| {
        when.method(GET).path("/issues.json");
        then.status(200).json_body(json!({
            "issues": [issue_body(40556, "Fix bug", "Feature", "2024-04-29T19:23:49Z")]
        }));
    });

    let hook = hook_for(&server, "")?;
    let result = hook.message_will_be_updated(&format!("edited: http://{host}/issues/40556"));
    assert!(result.starts_with("edited: [Feature#40556: Fix bug]("));
    Ok(())
}
