//! Route middleware convention and the host capability.
//!
//! # Responsibilities
//! - Define what one step of a route chain is ([`Middleware`])
//! - Define how a step hands control on ([`Flow`])
//! - Define the minimal host capability setup needs ([`Host`])
//!
//! # Design Decisions
//! - A step owns the request while it runs and gives it back on `Flow::Next`
//! - Errors short-circuit to the host's error path; nothing retries them
//! - The host, not the registrar, decides what happens with several chains
//!   on one path

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::controller::ControllerError;

/// What a middleware step decided.
#[derive(Debug)]
pub enum Flow {
    /// Continue with the next step (or the renderer, after the last one).
    Next(Request<Body>),

    /// Stop here and send this response.
    Respond(Response),

    /// Stop here and hand the error to the host's error path.
    Fail(ControllerError),
}

/// One step of a route chain.
pub type Middleware = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Flow> + Send + Sync>;

/// Wrap an async function as a [`Middleware`].
pub fn middleware<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Flow> + Send + 'static,
{
    Arc::new(move |request: Request<Body>| f(request).boxed())
}

/// Capability the engine needs from the host application.
pub trait Host {
    /// Host setting by name (`views`).
    fn setting(&self, name: &str) -> Option<String>;

    /// Register an ordered chain of steps for `GET path`.
    fn register_get(&mut self, path: &str, chain: Vec<Middleware>);
}
