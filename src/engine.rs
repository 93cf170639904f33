//! View engine setup.
//!
//! # Responsibilities
//! - Resolve the effective engine configuration
//! - Discover views and build their descriptors
//! - Register every descriptor's routes on the host
//!
//! # Design Decisions
//! - Fail fast: any discovery error aborts setup before a single route is
//!   registered, so a partial route set is never served
//! - Relative locations resolve against an explicit project root, never the
//!   process working directory
//! - Runs once; the resulting descriptors are immutable

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::{self, EngineConfig};
use crate::controller::{BindError, ControllerBinder, ControllerRegistry};
use crate::routing::{register_routes, Host};
use crate::views::{resolve_urls, walk, AssetLocator, ViewDescriptor, WalkError};

/// Host setting naming the view root directory.
pub const VIEWS_SETTING: &str = "views";

/// Setup failure. Every variant aborts startup.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("host setting `{0}` is not set")]
    MissingSetting(&'static str),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Turns a view tree into host routes.
#[derive(Debug, Clone)]
pub struct ViewEngine {
    project_root: PathBuf,
    defaults: EngineConfig,
    controllers: ControllerRegistry,
}

impl ViewEngine {
    /// Engine resolving relative locations against `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            defaults: EngineConfig::default(),
            controllers: ControllerRegistry::new(),
        }
    }

    /// Controllers registered in code. They take precedence over unit files.
    pub fn with_controllers(mut self, controllers: ControllerRegistry) -> Self {
        self.controllers = controllers;
        self
    }

    /// Replace the defaults that caller overrides are merged over.
    pub fn with_defaults(mut self, defaults: EngineConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Effective configuration for `overrides`.
    pub fn resolve_config(&self, overrides: &Value) -> EngineConfig {
        config::resolve(&self.defaults, overrides)
    }

    /// Discover the host's view tree and register its routes.
    ///
    /// Returns the descriptors, in registration order.
    pub fn register<H: Host + ?Sized>(
        &self,
        host: &mut H,
        overrides: &Value,
    ) -> Result<Vec<ViewDescriptor>, EngineError> {
        let config = self.resolve_config(overrides);
        let views = host
            .setting(VIEWS_SETTING)
            .ok_or(EngineError::MissingSetting(VIEWS_SETTING))?;
        let views_root = self.locate(Path::new(&views));

        let descriptors = self.discover(&views_root, &config)?;
        let routes = register_routes(host, &descriptors, &config);

        tracing::info!(
            views_root = %views_root.display(),
            views = descriptors.len(),
            routes,
            controllers = descriptors.iter().filter(|d| d.controller().is_some()).count(),
            "View routes registered"
        );

        Ok(descriptors)
    }

    /// Build descriptors for every view under `views_root`.
    pub fn discover(&self, views_root: &Path, config: &EngineConfig) -> Result<Vec<ViewDescriptor>, EngineError> {
        let assets = AssetLocator::new(self.locate(Path::new(&config.public_location)), config);
        let binder = ControllerBinder::new(
            &self.controllers,
            self.locate(Path::new(&config.controllers_location)),
        );

        walk(views_root)?
            .into_iter()
            .map(|file| -> Result<ViewDescriptor, EngineError> {
                let canonical = file.canonical_path.as_str();
                let controller = binder.bind(canonical)?;

                Ok(ViewDescriptor::new(canonical)
                    .with_urls(resolve_urls(canonical, &config.url_mappings))
                    .with_assets(assets.script_for(canonical), assets.style_for(canonical))
                    .with_controller(controller))
            })
            .collect()
    }

    fn locate(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerOrigin, StaticController};
    use crate::routing::Middleware;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct TestHost {
        views: Option<String>,
        paths: Vec<String>,
    }

    impl Host for TestHost {
        fn setting(&self, name: &str) -> Option<String> {
            (name == VIEWS_SETTING).then(|| self.views.clone()).flatten()
        }

        fn register_get(&mut self, path: &str, _chain: Vec<Middleware>) {
            self.paths.push(path.to_string());
        }
    }

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_register_builds_descriptors() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "views/index.html", "");
        touch(dir.path(), "views/settings.html", "");
        touch(dir.path(), "views/secure/secrets.html", "");
        touch(dir.path(), "public/javascripts/secure/secrets.js", "");
        touch(dir.path(), "public/css/settings.css", "");
        touch(dir.path(), "controllers/secure/secrets.json", r#"{"fizz":"buzz"}"#);

        let engine = ViewEngine::new(dir.path())
            .with_controllers(ControllerRegistry::new().with("index", StaticController::new(json!(1))));
        let mut host = TestHost {
            views: Some("views".into()),
            ..TestHost::default()
        };

        let descriptors = engine
            .register(
                &mut host,
                &json!({
                    "stylesheets_location": "css",
                    "url_mappings": { "settings": "options" }
                }),
            )
            .unwrap();

        assert_eq!(host.paths, vec!["/index", "/secure/secrets", "/options"]);

        let index = &descriptors[0];
        assert_eq!(index.controller().unwrap().origin(), &ControllerOrigin::Registry);
        assert!(index.script_asset().is_none());

        let secrets = &descriptors[1];
        assert_eq!(secrets.script_asset(), Some("/javascripts/secure/secrets.js"));
        assert!(secrets.style_asset().is_none());
        assert!(matches!(
            secrets.controller().unwrap().origin(),
            ControllerOrigin::File(_)
        ));

        let settings = &descriptors[2];
        assert_eq!(settings.view_id(), "settings");
        assert_eq!(settings.style_asset(), Some("/css/settings.css"));
        assert!(settings.controller().is_none());
    }

    #[test]
    fn test_missing_views_setting() {
        let dir = TempDir::new().unwrap();
        let mut host = TestHost::default();
        let err = ViewEngine::new(dir.path()).register(&mut host, &Value::Null).unwrap_err();
        assert!(matches!(err, EngineError::MissingSetting("views")));
    }

    #[test]
    fn test_no_routes_on_setup_failure() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "views/a.html", "");
        touch(dir.path(), "views/b.html", "");
        touch(dir.path(), "controllers/b.json", "not json");

        let mut host = TestHost {
            views: Some(dir.path().join("views").display().to_string()),
            ..TestHost::default()
        };
        let err = ViewEngine::new(dir.path()).register(&mut host, &Value::Null).unwrap_err();

        assert!(matches!(err, EngineError::Bind(BindError::Parse { .. })));
        assert!(host.paths.is_empty());
    }

    #[test]
    fn test_missing_view_root() {
        let dir = TempDir::new().unwrap();
        let mut host = TestHost {
            views: Some("views".into()),
            ..TestHost::default()
        };
        let err = ViewEngine::new(dir.path()).register(&mut host, &Value::Null).unwrap_err();
        assert!(matches!(err, EngineError::Walk(WalkError::RootUnavailable { .. })));
    }

    #[test]
    fn test_odd_option_values_do_not_fail_setup() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "views/index.html", "");
        touch(dir.path(), "false/index.json", r#"{"from":"false"}"#);

        let mut host = TestHost {
            views: Some("views".into()),
            ..TestHost::default()
        };
        let descriptors = ViewEngine::new(dir.path())
            .register(
                &mut host,
                &json!({ "controllers_location": false, "url_mappings": "x" }),
            )
            .unwrap();

        assert_eq!(host.paths, vec!["/index"]);
        assert!(matches!(
            descriptors[0].controller().unwrap().origin(),
            ControllerOrigin::File(path) if path.ends_with("false/index.json")
        ));
    }
}
