//! Hook surface for the tracker link enrichment pipeline.
//!
//! Connects the pure text pipeline in `redlink-core` with the tracker
//! client in `redlink-tracker`: configuration snapshots, per-invocation
//! orchestration, and the degradation policy (per-link fallback for
//! malformed links and missing metadata, all-or-nothing pass-through when
//! the batch fetch fails).

pub mod message_hook;
pub mod plugin_config;

pub use message_hook::{enrich_message, IssueMetadataSource, MessageHook};
pub use plugin_config::{tracker_base_and_host, ConfigHandle, PluginConfig};
