//! View discovery subsystem.
//!
//! # Data Flow
//! ```text
//! view root directory
//!     → walker.rs (leaf files → canonical paths)
//!     → mapping.rs (canonical path + url_mappings → URL aliases)
//!     → assets.rs (probe public/<js>/<view>.js, public/<css>/<view>.css)
//!     → controller::binder (registry / unit file)
//!     → ViewDescriptor (immutable)
//! ```
//!
//! # Design Decisions
//! - Discovery reads a filesystem snapshot once at setup
//! - Absence of assets, controllers or mappings is never an error
//! - URL collisions between views are not detected

pub mod assets;
pub mod descriptor;
pub mod mapping;
pub mod walker;

pub use assets::AssetLocator;
pub use descriptor::ViewDescriptor;
pub use mapping::{normalize, resolve_urls};
pub use walker::{walk, ViewFile, WalkError};
