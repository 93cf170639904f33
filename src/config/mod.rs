//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → AppConfig { server, engine: raw overrides }
//!
//! At setup:
//!     EngineConfig::default()
//!     → resolve.rs (shallow merge with raw overrides)
//!     → EngineConfig (immutable, read by every setup component)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; the view tree is never re-read
//! - All fields have defaults to allow minimal configs
//! - Unknown engine keys are ignored rather than rejected

pub mod loader;
pub mod resolve;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use resolve::resolve;
pub use schema::{AppConfig, EngineConfig, ServerConfig, UrlMapping};
