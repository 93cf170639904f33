//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use view_router::controller::{ControllerRegistry, ControllerRequest, Outcome};
use view_router::engine::VIEWS_SETTING;
use view_router::{AxumHost, ControllerError, ViewDescriptor, ViewEngine};

/// Write an empty (or given) file, creating parent directories.
pub fn touch(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project tree used by the site tests.
///
/// ```text
/// views/       index, dashboard, settings, profile, secure/secrets, user1/items
/// public/      javascripts/<view>.js and css/<view>.css for all but index
/// controllers/ secure/secrets.json, user1/items.json (unit files)
/// ```
/// `dashboard`, `settings` and `profile` get code controllers from [`site_controllers`].
pub fn site_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for view in ["index", "dashboard", "settings", "profile", "secure/secrets", "user1/items"] {
        touch(root, &format!("views/{}.html", view), "<html></html>");
    }
    for view in ["dashboard", "settings", "profile", "secure/secrets", "user1/items"] {
        touch(root, &format!("public/javascripts/{}.js", view), "");
        touch(root, &format!("public/css/{}.css", view), "");
    }
    touch(root, "controllers/secure/secrets.json", r#"{"fizz":"buzz"}"#);
    touch(root, "controllers/user1/items.json", r#"{"1":"2"}"#);

    dir
}

pub fn site_controllers() -> ControllerRegistry {
    ControllerRegistry::new()
        .with("dashboard", |_req: ControllerRequest| async {
            Ok::<_, ControllerError>(Outcome::Continue(json!({ "foo": "bar" })))
        })
        .with("settings", |_req: ControllerRequest| async {
            Ok::<_, ControllerError>(Outcome::Continue(json!({ "bat": "baz" })))
        })
        .with("profile", |_req: ControllerRequest| async {
            Ok::<_, ControllerError>(Outcome::Continue(json!({ "a": "b" })))
        })
}

/// Engine options used by the site tests.
pub fn site_overrides() -> Value {
    json!({
        "stylesheets_location": "css",
        "url_mappings": {
            "profile": ["/profile", "/userProfile"],
            "settings": "/options",
            "user1/items": "/things"
        }
    })
}

/// Run setup on `host` for the project at `root`.
pub fn setup(
    root: &Path,
    host: AxumHost,
    controllers: ControllerRegistry,
    overrides: &Value,
) -> (Router, Vec<ViewDescriptor>) {
    let mut host = host.set(VIEWS_SETTING, "views");
    let descriptors = ViewEngine::new(root)
        .with_controllers(controllers)
        .register(&mut host, overrides)
        .unwrap();
    (host.into_router(), descriptors)
}

/// GET `uri` and decode the body as JSON (`Null` when it is not JSON).
pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}
