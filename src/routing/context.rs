//! Per-request view context.
//!
//! The fields a view template reads (view id, asset URLs, controller result)
//! travel in the request's extensions until the renderer picks them up.

use axum::http::Extensions;
use serde::Serialize;
use serde_json::{Map, Value};

/// String-keyed view data for one request.
///
/// A field that is absent is missing from the map, never null or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ViewContext {
    fields: Map<String, Value>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Shorthand for string fields such as the view id and asset URLs.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Write `field`, or remove it when `value` is `None`.
    pub fn set(&mut self, field: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.fields.insert(field.to_string(), value);
            }
            None => {
                self.fields.remove(field);
            }
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Context attached to a request, if any middleware wrote one.
    pub fn from_extensions(extensions: &Extensions) -> Option<&ViewContext> {
        extensions.get::<ViewContext>()
    }

    /// Apply `f` to the request's context, creating an empty one first if needed.
    pub fn update(extensions: &mut Extensions, f: impl FnOnce(&mut ViewContext)) {
        let mut context = extensions.remove::<ViewContext>().unwrap_or_default();
        f(&mut context);
        extensions.insert(context);
    }
}
