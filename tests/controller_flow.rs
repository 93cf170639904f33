//! Controller completion paths as seen through the host.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};
use view_router::controller::{ControllerRegistry, ControllerRequest, Outcome};
use view_router::{AxumHost, ControllerError, ViewContext};

mod common;

fn project(views: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    for view in views {
        common::touch(dir.path(), &format!("views/{}.html", view), "");
    }
    dir
}

#[tokio::test]
async fn test_controller_error_reaches_error_handler_once() {
    let dir = project(&["dashboard"]);
    let handled = Arc::new(AtomicU32::new(0));
    let rendered = Arc::new(AtomicU32::new(0));

    let h = handled.clone();
    let r = rendered.clone();
    let host = AxumHost::new()
        .with_error_handler(move |error: ControllerError| {
            h.fetch_add(1, Ordering::SeqCst);
            (StatusCode::SERVICE_UNAVAILABLE, error.to_string()).into_response()
        })
        .with_renderer(move |_ctx: &ViewContext| {
            r.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK.into_response()
        });

    let controllers = ControllerRegistry::new().with("dashboard", |_req: ControllerRequest| async {
        Err::<Outcome, _>(ControllerError::msg("stats backend down"))
    });
    let (router, _) = common::setup(dir.path(), host, controllers, &Value::Null);

    let (status, _) = common::get(&router, "/dashboard").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(handled.load(Ordering::SeqCst), 1);
    assert_eq!(rendered.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_default_error_handler_answers_500() {
    let dir = project(&["dashboard"]);
    let controllers = ControllerRegistry::new().with("dashboard", |_req: ControllerRequest| async {
        Err::<Outcome, _>(ControllerError::msg("boom"))
    });
    let (router, _) = common::setup(dir.path(), AxumHost::new(), controllers, &Value::Null);

    let (status, _) = common::get(&router, "/dashboard").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_controller_that_responds_skips_rendering() {
    let dir = project(&["account"]);
    let rendered = Arc::new(AtomicU32::new(0));

    let r = rendered.clone();
    let host = AxumHost::new().with_renderer(move |_ctx: &ViewContext| {
        r.fetch_add(1, Ordering::SeqCst);
        StatusCode::OK.into_response()
    });
    let controllers = ControllerRegistry::new().with("account", |_req: ControllerRequest| async {
        Ok::<_, ControllerError>(Outcome::Responded(
            (StatusCode::SEE_OTHER, [("location", "/login")]).into_response(),
        ))
    });
    let (router, _) = common::setup(dir.path(), host, controllers, &Value::Null);

    let (status, _) = common::get(&router, "/account").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(rendered.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_controller_runs_per_request_and_sees_request() {
    let dir = project(&["search"]);
    let calls = Arc::new(AtomicU32::new(0));

    let c = calls.clone();
    let controllers = ControllerRegistry::new().with("search", move |req: ControllerRequest| {
        let call = c.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            Ok::<_, ControllerError>(Outcome::Continue(json!({
                "call": call,
                "view": req.view.clone(),
                "query": req.query(),
            })))
        }
    });
    let (router, _) = common::setup(dir.path(), AxumHost::new(), controllers, &Value::Null);

    let (_, first) = common::get(&router, "/search?q=rust").await;
    let (_, second) = common::get(&router, "/search").await;

    assert_eq!(first["controller_result"], json!({ "call": 1, "view": "search", "query": "q=rust" }));
    assert_eq!(second["controller_result"], json!({ "call": 2, "view": "search", "query": null }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_aliases_share_one_controller() {
    let dir = project(&["profile"]);
    let calls = Arc::new(AtomicU32::new(0));

    let c = calls.clone();
    let controllers = ControllerRegistry::new().with("profile", move |_req: ControllerRequest| {
        c.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, ControllerError>(Outcome::Continue(json!({ "a": "b" }))) }
    });
    let overrides = json!({ "url_mappings": { "profile": ["/profile", "userProfile"] } });
    let (router, _) = common::setup(dir.path(), AxumHost::new(), controllers, &overrides);

    let (_, first) = common::get(&router, "/profile").await;
    let (_, second) = common::get(&router, "/userProfile").await;

    assert_eq!(first, second);
    assert_eq!(first["controller_result"], json!({ "a": "b" }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_colliding_mappings_both_run() {
    let dir = project(&["about", "team"]);
    let overrides = json!({ "url_mappings": { "about": "/info", "team": "/info" } });
    let controllers = ControllerRegistry::new().with("about", |_req: ControllerRequest| async {
        Ok::<_, ControllerError>(Outcome::Continue(json!("about")))
    });
    let (router, descriptors) = common::setup(dir.path(), AxumHost::new(), controllers, &overrides);

    assert_eq!(descriptors.len(), 2);

    // Chains run in registration order; the later view's fields win
    let (status, context) = common::get(&router, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(context["view"], "team");
    assert_eq!(context["controller_result"], "about");
}
