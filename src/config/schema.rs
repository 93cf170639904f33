//! Configuration schema definitions.
//!
//! Two layers live here:
//! - [`EngineConfig`]: the recognized view-engine options, merged from defaults
//!   and caller overrides by [`crate::config::resolve`].
//! - [`AppConfig`]: the server binary's config file, which carries the
//!   `[engine]` table through untouched as the caller override value.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Effective view-engine configuration.
///
/// Immutable once resolved; every component reads from the same instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Directory (relative to the project root) searched for controller units.
    pub controllers_location: String,

    /// Directory (relative to the project root) holding served assets.
    pub public_location: String,

    /// Script directory under `public_location` and under the served URL space.
    pub javascripts_location: String,

    /// Stylesheet directory under `public_location` and under the served URL space.
    pub stylesheets_location: String,

    /// View id (`dashboard`, `secure/secrets`) to URL override(s).
    pub url_mappings: BTreeMap<String, UrlMapping>,

    /// View context field receiving the script asset URL.
    pub javascripts_location_property: String,

    /// View context field receiving the stylesheet asset URL.
    pub stylesheets_location_property: String,

    /// View context field receiving the view id.
    pub view_location_property: String,

    /// View context field receiving the controller result.
    pub controller_result_property: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            controllers_location: "controllers".to_string(),
            public_location: "public".to_string(),
            javascripts_location: "javascripts".to_string(),
            stylesheets_location: "stylesheets".to_string(),
            url_mappings: BTreeMap::new(),
            javascripts_location_property: "javascript".to_string(),
            stylesheets_location_property: "stylesheet".to_string(),
            view_location_property: "view".to_string(),
            controller_result_property: "controller_result".to_string(),
        }
    }
}

/// A single `url_mappings` entry.
///
/// Only strings and lists of strings are meaningful; anything else is kept as
/// [`UrlMapping::Unsupported`] and resolves like a missing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UrlMapping {
    Single(String),
    Many(Vec<String>),
    Unsupported(Value),
}

impl From<Value> for UrlMapping {
    fn from(value: Value) -> Self {
        match value {
            Value::String(url) => UrlMapping::Single(url),
            Value::Array(items) if items.iter().all(Value::is_string) => UrlMapping::Many(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(url) => Some(url),
                        _ => None,
                    })
                    .collect(),
            ),
            other => UrlMapping::Unsupported(other),
        }
    }
}

impl From<&str> for UrlMapping {
    fn from(url: &str) -> Self {
        UrlMapping::Single(url.to_string())
    }
}

impl From<Vec<&str>> for UrlMapping {
    fn from(urls: Vec<&str>) -> Self {
        UrlMapping::Many(urls.into_iter().map(str::to_string).collect())
    }
}

/// Root configuration for the `view-router` binary.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server settings.
    pub server: ServerConfig,

    /// Raw engine overrides, merged over [`EngineConfig::default`] at setup.
    pub engine: Value,
}

/// Server settings for the binary host.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Project root that relative locations are resolved against.
    pub root: PathBuf,

    /// View root directory, relative to `root` unless absolute.
    pub views: PathBuf,

    /// Whole-request timeout applied by the host. `None` disables it.
    pub request_timeout_secs: Option<u64>,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            root: PathBuf::from("."),
            views: PathBuf::from("views"),
            request_timeout_secs: Some(30),
            log_filter: "view_router=debug,tower_http=debug".to_string(),
        }
    }
}
