//! Plugin configuration snapshots shared with in-flight hook invocations.

use std::sync::Arc;

use arc_swap::ArcSwap;
use redlink_core::parse_link;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
/// Plugin configuration as supplied by the host. An empty `tracker_url`
/// disables the pipeline for all messages; an empty `api_key` means the
/// tracker is queried anonymously.
pub struct PluginConfig {
    pub tracker_url: String,
    pub api_key: String,
}

impl PluginConfig {
    /// API key when configured; empty strings count as unset.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

/// Atomically swappable configuration handle. Hook invocations read one
/// immutable snapshot at the start of a run; reconfiguration stores a new
/// snapshot without coordinating with in-flight runs.
#[derive(Debug, Default)]
pub struct ConfigHandle {
    inner: ArcSwap<PluginConfig>,
}

impl ConfigHandle {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    pub fn snapshot(&self) -> Arc<PluginConfig> {
        self.inner.load_full()
    }

    pub fn store(&self, config: PluginConfig) {
        self.inner.store(Arc::new(config));
    }
}

/// Normalizes the configured tracker URL into `(scheme://host/, host)`.
/// Returns `None` when the URL is empty or cannot be parsed, which
/// disables enrichment entirely.
pub fn tracker_base_and_host(tracker_url: &str) -> Option<(String, String)> {
    let tracker_url = tracker_url.trim();
    if tracker_url.is_empty() {
        return None;
    }
    let parsed = parse_link(tracker_url).ok()?;
    let authority = match parsed.port {
        Some(port) => format!("{}:{port}", parsed.host),
        None => parsed.host,
    };
    let base = format!("{}://{authority}/", parsed.scheme);
    Some((base, authority))
}
