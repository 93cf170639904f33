//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (view, url, path, error)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber, filter from RUST_LOG or config)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Setup logs one debug event per route and one info summary
//! - Request IDs and request spans come from tower-http layers in the server

pub mod logging;
