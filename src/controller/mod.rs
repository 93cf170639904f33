//! Controller subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     view canonical path
//!     → binder.rs (registry lookup, then unit file probe)
//!     → BoundController stored on the ViewDescriptor
//!
//! Per request (driven by routing::registrar):
//!     ControllerRequest
//!     → Controller::call (one future, one completion)
//!     → Outcome::Continue(result) | Outcome::Responded(response) | ControllerError
//! ```
//!
//! # Design Decisions
//! - Controllers are resolved once at setup, never loaded per request
//! - Completion is a single future resolving to a `Result`, so it cannot
//!   fire twice or not at all without stalling
//! - No timeout and no retry around controller calls

pub mod binder;
pub mod handler;
pub mod registry;

pub use binder::{BindError, BoundController, ControllerBinder, ControllerOrigin};
pub use handler::{Controller, ControllerError, ControllerHandle, ControllerRequest, Outcome, StaticController};
pub use registry::{ControllerRegistry, ControllerSource};
