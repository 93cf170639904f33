//! Sibling asset discovery.
//!
//! For the view `/secure/secrets` the locator probes
//! `<public>/<javascripts>/secure/secrets.js` and
//! `<public>/<stylesheets>/secure/secrets.css`, and reports the URLs they are
//! served at (`/<javascripts>/secure/secrets.js`).

use std::path::PathBuf;

use crate::config::EngineConfig;

const SCRIPT_EXTENSION: &str = "js";
const STYLE_EXTENSION: &str = "css";

/// Probes the public directory for view assets.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    public_root: PathBuf,
    scripts_location: String,
    styles_location: String,
}

impl AssetLocator {
    pub fn new(public_root: impl Into<PathBuf>, config: &EngineConfig) -> Self {
        Self {
            public_root: public_root.into(),
            scripts_location: trim_location(&config.javascripts_location),
            styles_location: trim_location(&config.stylesheets_location),
        }
    }

    /// Served URL of the view's script, if the file exists.
    pub fn script_for(&self, canonical_path: &str) -> Option<String> {
        self.probe(&self.scripts_location, canonical_path, SCRIPT_EXTENSION)
    }

    /// Served URL of the view's stylesheet, if the file exists.
    pub fn style_for(&self, canonical_path: &str) -> Option<String> {
        self.probe(&self.styles_location, canonical_path, STYLE_EXTENSION)
    }

    fn probe(&self, location: &str, canonical_path: &str, extension: &str) -> Option<String> {
        let relative = format!("{}.{}", canonical_path.trim_start_matches('/'), extension);
        let file = self.public_root.join(location).join(relative);

        if !file.exists() {
            return None;
        }
        Some(served_url(location, canonical_path, extension))
    }
}

fn trim_location(location: &str) -> String {
    location.trim_matches('/').to_string()
}

fn served_url(location: &str, canonical_path: &str, extension: &str) -> String {
    if location.is_empty() {
        format!("{}.{}", canonical_path, extension)
    } else {
        format!("/{}{}.{}", location, canonical_path, extension)
    }
}
