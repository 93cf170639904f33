//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at setup):
//!     ViewDescriptor[]
//!     → registrar.rs (one chain per descriptor, one route per URL)
//!     → Host::register_get(url, chain)
//!
//! Incoming Request (per matched route):
//!     → context setter (view id, script URL, style URL)
//!     → controller invoker, if the view has a controller
//!     → renderer reads ViewContext from request extensions
//! ```
//!
//! # Design Decisions
//! - Chains are built at setup, immutable at runtime
//! - Per-request state lives only in the request's own extensions
//! - Controller errors go to the host error path exactly once

pub mod context;
pub mod middleware;
pub mod registrar;

pub use context::ViewContext;
pub use middleware::{middleware, Flow, Host, Middleware};
pub use registrar::{chain_for, register_routes};
