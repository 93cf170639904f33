//! HTTP host subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, request ID, timeout)
//!     → host.rs (path → registered chains)
//!     → routing chain (context setter, controller invoker)
//!     → render.rs (Renderer, or ErrorHandler on a forwarded error)
//!     → Send to client
//! ```

pub mod host;
pub mod render;
pub mod server;

pub use host::AxumHost;
pub use render::{DefaultErrorHandler, ErrorHandler, JsonRenderer, Renderer};
pub use server::HttpServer;
