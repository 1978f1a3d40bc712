//! Screen provider registry.
//!
//! # Responsibilities
//! - Map screen ids to the loaders that produce them
//! - Verify that a route table only references registered screens

use std::collections::HashMap;
use std::sync::Arc;

use crate::loading::screen::{LoadError, ScreenLoader};
use crate::routing::router::{RouteTable, ScreenId};

/// Registered screen providers.
#[derive(Clone, Default)]
pub struct ScreenRegistry {
    loaders: HashMap<ScreenId, Arc<dyn ScreenLoader>>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the loader for a screen.
    pub fn register(&mut self, id: impl Into<ScreenId>, loader: impl ScreenLoader + 'static) {
        self.loaders.insert(id.into(), Arc::new(loader));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, id: impl Into<ScreenId>, loader: impl ScreenLoader + 'static) -> Self {
        self.register(id, loader);
        self
    }

    pub fn get(&self, id: &ScreenId) -> Option<Arc<dyn ScreenLoader>> {
        self.loaders.get(id).cloned()
    }

    pub fn contains(&self, id: &ScreenId) -> bool {
        self.loaders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Fail with the first screen referenced by `table` that has no loader.
    pub fn ensure_covers(&self, table: &RouteTable) -> Result<(), LoadError> {
        match table.screens().into_iter().find(|id| !self.contains(id)) {
            Some(missing) => Err(LoadError::NotRegistered(missing)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.loaders.keys().map(ScreenId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ScreenRegistry").field("screens", &ids).finish()
    }
}
