//! Controller contract.
//!
//! A controller computes the data a view needs for one request. It is invoked
//! once per matched request and completes exactly once: the returned future
//! resolves to either an [`Outcome`] or a [`ControllerError`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Uri};
use axum::response::Response;
use futures_util::future::BoxFuture;
use serde_json::Value;

/// Shared handle to a bound controller.
pub type ControllerHandle = Arc<dyn Controller>;

/// Successful completion of a controller.
#[derive(Debug)]
pub enum Outcome {
    /// Result to store in the view context before rendering.
    Continue(Value),

    /// The controller produced the whole response itself. Nothing is written
    /// to the view context and rendering is skipped.
    Responded(Response),
}

/// The request data a controller sees.
#[derive(Debug, Clone)]
pub struct ControllerRequest {
    /// Id of the view being served (`secure/secrets`).
    pub view: String,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl ControllerRequest {
    pub fn from_request(request: &Request<Body>, view: &str) -> Self {
        Self {
            view: view.to_string(),
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
        }
    }

    /// Request path as matched by the router.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }
}

/// Failure reported by a controller.
///
/// Forwarded unchanged to the host's error handler.
pub struct ControllerError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl ControllerError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            inner: error.into(),
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.inner
    }
}

impl fmt::Debug for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl From<std::io::Error> for ControllerError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<serde_json::Error> for ControllerError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

/// A view controller.
///
/// Implemented for any `Fn(ControllerRequest) -> impl Future<Output = Result<Outcome, ControllerError>>`,
/// so plain async closures can be registered directly.
pub trait Controller: Send + Sync + 'static {
    fn call(&self, request: ControllerRequest) -> BoxFuture<'static, Result<Outcome, ControllerError>>;
}

impl<F, Fut> Controller for F
where
    F: Fn(ControllerRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Outcome, ControllerError>> + Send + 'static,
{
    fn call(&self, request: ControllerRequest) -> BoxFuture<'static, Result<Outcome, ControllerError>> {
        Box::pin(self(request))
    }
}

/// Controller that always yields the same result.
///
/// Backs controller unit files discovered on disk.
#[derive(Debug, Clone)]
pub struct StaticController {
    result: Value,
}

impl StaticController {
    pub fn new(result: Value) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &Value {
        &self.result
    }
}

impl Controller for StaticController {
    fn call(&self, _request: ControllerRequest) -> BoxFuture<'static, Result<Outcome, ControllerError>> {
        let result = self.result.clone();
        Box::pin(async move { Ok(Outcome::Continue(result)) })
    }
}
