//! Controller discovery for a view.
//!
//! # Responsibilities
//! - Look the view up in the code registry
//! - Otherwise probe `<controllers>/<view>.json` and load it once
//! - Report load failures as setup errors, never at request time
//!
//! # Design Decisions
//! - Registry entries win over unit files for the same view
//! - A unit file's JSON document is the controller's result for every request

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::controller::handler::{ControllerHandle, StaticController};
use crate::controller::registry::ControllerSource;

/// File extension of controller unit files.
pub const CONTROLLER_EXTENSION: &str = "json";

/// Setup-time controller load failure.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to read controller {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse controller {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a bound controller came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerOrigin {
    Registry,
    File(PathBuf),
}

impl fmt::Display for ControllerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerOrigin::Registry => write!(f, "registry"),
            ControllerOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A controller attached to a view descriptor.
#[derive(Clone)]
pub struct BoundController {
    origin: ControllerOrigin,
    handle: ControllerHandle,
}

impl BoundController {
    pub fn new(origin: ControllerOrigin, handle: ControllerHandle) -> Self {
        Self { origin, handle }
    }

    pub fn origin(&self) -> &ControllerOrigin {
        &self.origin
    }

    pub fn handle(&self) -> &ControllerHandle {
        &self.handle
    }
}

impl fmt::Debug for BoundController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundController")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Resolves the controller for each discovered view.
pub struct ControllerBinder<'a> {
    source: &'a dyn ControllerSource,
    controllers_dir: PathBuf,
}

impl<'a> ControllerBinder<'a> {
    pub fn new(source: &'a dyn ControllerSource, controllers_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            controllers_dir: controllers_dir.into(),
        }
    }

    /// Conventional unit file location for a canonical path (`/secure/secrets`).
    pub fn unit_path(&self, canonical_path: &str) -> PathBuf {
        self.controllers_dir.join(format!(
            "{}.{}",
            canonical_path.trim_start_matches('/'),
            CONTROLLER_EXTENSION
        ))
    }

    /// Bind the controller for `canonical_path`, if one exists.
    pub fn bind(&self, canonical_path: &str) -> Result<Option<BoundController>, BindError> {
        let view = canonical_path.trim_start_matches('/');

        if let Some(handle) = self.source.lookup(view) {
            return Ok(Some(BoundController::new(ControllerOrigin::Registry, handle)));
        }

        let path = self.unit_path(canonical_path);
        if !path.is_file() {
            return Ok(None);
        }

        let controller = load_unit(&path)?;
        tracing::debug!(view = %view, path = %path.display(), "Loaded controller unit");
        Ok(Some(BoundController::new(
            ControllerOrigin::File(path),
            Arc::new(controller),
        )))
    }
}

fn load_unit(path: &Path) -> Result<StaticController, BindError> {
    let content = fs::read_to_string(path).map_err(|source| BindError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let result = serde_json::from_str(&content).map_err(|source| BindError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(StaticController::new(result))
}
