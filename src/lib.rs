//! View-tree routing for axum.
//!
//! Walks a directory of view files and registers one GET route per view (or
//! per configured URL alias). Each route fills a per-request [`ViewContext`]
//! with the view id, the URLs of same-named script and stylesheet assets, and
//! the result of a same-named controller, then hands it to a [`Renderer`].

pub mod config;
pub mod controller;
pub mod engine;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::EngineConfig;
pub use controller::{Controller, ControllerError, ControllerRegistry, ControllerRequest, Outcome};
pub use engine::{EngineError, ViewEngine};
pub use http::{AxumHost, HttpServer, JsonRenderer, Renderer};
pub use lifecycle::Shutdown;
pub use routing::{Host, ViewContext};
pub use views::ViewDescriptor;
