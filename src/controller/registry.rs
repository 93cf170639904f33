//! Controllers registered in code.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::controller::handler::{Controller, ControllerHandle};

/// Capability that hands out the controller for a view id, if any.
pub trait ControllerSource {
    fn lookup(&self, view: &str) -> Option<ControllerHandle>;
}

/// In-memory controller table keyed by view id (`dashboard`, `secure/secrets`).
///
/// Built before setup and read once per view during discovery.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, ControllerHandle>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller` for `view`. A leading `/` on the view id is ignored.
    /// Registering the same view twice keeps the last controller.
    pub fn register(&mut self, view: &str, controller: impl Controller) -> &mut Self {
        self.controllers
            .insert(view.trim_start_matches('/').to_string(), Arc::new(controller));
        self
    }

    /// Builder form of [`ControllerRegistry::register`].
    pub fn with(mut self, view: &str, controller: impl Controller) -> Self {
        self.register(view, controller);
        self
    }
}

impl ControllerSource for ControllerRegistry {
    fn lookup(&self, view: &str) -> Option<ControllerHandle> {
        self.controllers.get(view.trim_start_matches('/')).cloned()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut views: Vec<_> = self.controllers.keys().collect();
        views.sort();
        f.debug_struct("ControllerRegistry").field("views", &views).finish()
    }
}
