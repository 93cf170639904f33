//! View descriptors.

use crate::controller::BoundController;

/// Everything setup learned about one view file.
///
/// Built once during discovery and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ViewDescriptor {
    canonical_path: String,
    urls: Vec<String>,
    controller: Option<BoundController>,
    script_asset: Option<String>,
    style_asset: Option<String>,
}

impl ViewDescriptor {
    /// Descriptor reachable at its canonical path, with no controller or assets.
    pub fn new(canonical_path: impl Into<String>) -> Self {
        let canonical_path = canonical_path.into();
        Self {
            urls: vec![canonical_path.clone()],
            canonical_path,
            controller: None,
            script_asset: None,
            style_asset: None,
        }
    }

    /// Replace the URL list. An empty list keeps the current one.
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        if !urls.is_empty() {
            self.urls = urls;
        }
        self
    }

    pub fn with_controller(mut self, controller: Option<BoundController>) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_assets(mut self, script: Option<String>, style: Option<String>) -> Self {
        self.script_asset = script;
        self.style_asset = style;
        self
    }

    /// `/secure/secrets`
    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// `secure/secrets`: the value written to the view context.
    pub fn view_id(&self) -> &str {
        self.canonical_path.trim_start_matches('/')
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn controller(&self) -> Option<&BoundController> {
        self.controller.as_ref()
    }

    pub fn script_asset(&self) -> Option<&str> {
        self.script_asset.as_deref()
    }

    pub fn style_asset(&self) -> Option<&str> {
        self.style_asset.as_deref()
    }
}
