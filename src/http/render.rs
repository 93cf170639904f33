//! Final handlers of a view route.
//!
//! # Responsibilities
//! - Turn the finished [`ViewContext`] into a response ([`Renderer`])
//! - Turn a forwarded controller error into a response ([`ErrorHandler`])
//!
//! # Design Decisions
//! - Template rendering is not done here; hosts plug in their own renderer
//! - The default renderer answers with the context as JSON, which is what
//!   client-side rendered views and the tests consume
//! - The default error handler hides error details from the client

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::controller::ControllerError;
use crate::routing::ViewContext;

/// Renders a view from its context.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, context: &ViewContext) -> Response;
}

impl<F> Renderer for F
where
    F: Fn(&ViewContext) -> Response + Send + Sync + 'static,
{
    fn render(&self, context: &ViewContext) -> Response {
        self(context)
    }
}

/// Responds with the view context as a JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, context: &ViewContext) -> Response {
        Json(context).into_response()
    }
}

/// Host error path for failures forwarded by a route chain.
pub trait ErrorHandler: Send + Sync + 'static {
    fn handle(&self, error: ControllerError) -> Response;
}

impl<F> ErrorHandler for F
where
    F: Fn(ControllerError) -> Response + Send + Sync + 'static,
{
    fn handle(&self, error: ControllerError) -> Response {
        self(error)
    }
}

/// Logs the error and answers `500 Internal Server Error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, error: ControllerError) -> Response {
        tracing::error!(error = %error, "Controller failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_json_renderer() {
        let mut context = ViewContext::new();
        context.set("view", Some(json!("index")));

        let response = JsonRenderer.render(&context);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "view": "index" }));
    }

    #[test]
    fn test_default_error_handler() {
        let response = DefaultErrorHandler.handle(ControllerError::msg("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
