//! Effective engine configuration.
//!
//! # Responsibilities
//! - Start from the recognized defaults
//! - Overwrite key by key with whatever the caller supplied (shallow merge)
//! - Ignore caller values that are not tables, and keys that are not recognized
//!
//! # Design Decisions
//! - No validation: a bad value surfaces later as a missing asset, controller
//!   or URL, never as a setup error
//! - Numbers and booleans given for a string option are used in their text
//!   form; other shapes leave the default in place
//! - `url_mappings` that is not a table behaves like an empty table; entries
//!   are taken as-is and unusable shapes fall back at lookup

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::schema::{EngineConfig, UrlMapping};

/// Merge `overrides` over `defaults`.
pub fn resolve(defaults: &EngineConfig, overrides: &Value) -> EngineConfig {
    let mut config = defaults.clone();

    let Some(overrides) = overrides.as_object() else {
        if !overrides.is_null() {
            tracing::debug!("Engine overrides are not a table, using defaults");
        }
        return config;
    };

    for (key, value) in overrides {
        let target = match key.as_str() {
            "controllers_location" => &mut config.controllers_location,
            "public_location" => &mut config.public_location,
            "javascripts_location" => &mut config.javascripts_location,
            "stylesheets_location" => &mut config.stylesheets_location,
            "javascripts_location_property" => &mut config.javascripts_location_property,
            "stylesheets_location_property" => &mut config.stylesheets_location_property,
            "view_location_property" => &mut config.view_location_property,
            "controller_result_property" => &mut config.controller_result_property,
            "url_mappings" => {
                config.url_mappings = url_mappings(value);
                continue;
            }
            _ => {
                tracing::debug!(key = %key, "Ignoring unrecognized engine option");
                continue;
            }
        };

        if let Some(text) = string_option(key, value) {
            *target = text;
        }
    }

    config
}

fn string_option(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(_) | Value::Bool(_) => {
            tracing::warn!(key = %key, value = %value, "Engine option is not a string, using its text form");
            Some(value.to_string())
        }
        _ => {
            tracing::warn!(key = %key, "Engine option is not a string, keeping the default");
            None
        }
    }
}

fn url_mappings(value: &Value) -> BTreeMap<String, UrlMapping> {
    let Some(table) = value.as_object() else {
        tracing::warn!("url_mappings is not a table, no view is remapped");
        return BTreeMap::new();
    };

    table
        .iter()
        .map(|(view, mapping)| (view.clone(), UrlMapping::from(mapping.clone())))
        .collect()
}
