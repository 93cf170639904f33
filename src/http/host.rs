//! Axum host application.
//!
//! # Responsibilities
//! - Hold host settings (`views`) for the engine to read at setup
//! - Collect the chains registered per path
//! - Compile them into an `axum::Router` of GET routes
//! - Per request: run the chains, then render or hand errors to the error path
//!
//! # Design Decisions
//! - Axum allows one handler per path, so chains registered on the same path
//!   are kept in registration order and run one after another in a single
//!   handler; later chains overwrite context fields written by earlier ones
//! - A chain that responds or fails ends the request; later chains do not run
//! - Rendering happens once, after the last chain
//! - Registered paths are literal: braces are escaped and the 0.7 `:capture`
//!   check is off, so no view name or mapping is read as route syntax

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::http::render::{DefaultErrorHandler, ErrorHandler, JsonRenderer, Renderer};
use crate::routing::{Flow, Host, Middleware, ViewContext};

/// A registered path and its chains, in registration order.
struct RouteEntry {
    path: String,
    chains: Vec<Vec<Middleware>>,
}

/// [`Host`] implementation backed by axum.
pub struct AxumHost {
    settings: HashMap<String, String>,
    routes: Vec<RouteEntry>,
    renderer: Arc<dyn Renderer>,
    errors: Arc<dyn ErrorHandler>,
}

impl AxumHost {
    /// Host with the JSON renderer and the default error handler.
    pub fn new() -> Self {
        Self {
            settings: HashMap::new(),
            routes: Vec::new(),
            renderer: Arc::new(JsonRenderer),
            errors: Arc::new(DefaultErrorHandler),
        }
    }

    /// Set a host setting.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.settings.insert(name.to_string(), value.into());
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn with_error_handler(mut self, handler: impl ErrorHandler) -> Self {
        self.errors = Arc::new(handler);
        self
    }

    /// Registered paths, in first-registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|entry| entry.path.as_str())
    }

    /// Number of chains registered on `path`.
    pub fn chain_count(&self, path: &str) -> usize {
        self.routes
            .iter()
            .find(|entry| entry.path == path)
            .map_or(0, |entry| entry.chains.len())
    }

    /// Compile the registered routes.
    pub fn into_router(self) -> Router {
        let mut router = Router::new().without_v07_checks();

        for entry in self.routes {
            let route = Arc::new(CompiledRoute {
                chains: entry.chains,
                renderer: self.renderer.clone(),
                errors: self.errors.clone(),
            });

            router = router.route(
                &literal_route(&entry.path),
                get(move |request: Request<Body>| {
                    let route = route.clone();
                    async move { route.dispatch(request).await }
                }),
            );
        }

        router
    }
}

impl Default for AxumHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for AxumHost {
    fn setting(&self, name: &str) -> Option<String> {
        self.settings.get(name).cloned()
    }

    fn register_get(&mut self, path: &str, chain: Vec<Middleware>) {
        match self.routes.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => {
                tracing::debug!(path = %path, chains = entry.chains.len() + 1, "Path registered more than once");
                entry.chains.push(chain);
            }
            None => self.routes.push(RouteEntry {
                path: path.to_string(),
                chains: vec![chain],
            }),
        }
    }
}

/// Escape `path` so the router matches it verbatim.
fn literal_route(path: &str) -> String {
    path.replace('{', "{{").replace('}', "}}")
}

struct CompiledRoute {
    chains: Vec<Vec<Middleware>>,
    renderer: Arc<dyn Renderer>,
    errors: Arc<dyn ErrorHandler>,
}

impl CompiledRoute {
    async fn dispatch(&self, mut request: Request<Body>) -> Response {
        for chain in &self.chains {
            for step in chain {
                match step(request).await {
                    Flow::Next(next) => request = next,
                    Flow::Respond(response) => return response,
                    Flow::Fail(error) => return self.errors.handle(error),
                }
            }
        }

        let context = ViewContext::from_extensions(request.extensions())
            .cloned()
            .unwrap_or_default();
        self.renderer.render(&context)
    }
}
