//! Loaded-module cache.
//!
//! Process-wide and append-only: once a screen implementation has been
//! produced it is handed out for the lifetime of the cache without invoking
//! its loader again. Concurrent first requests for the same screen share a
//! single in-flight load. A failed load leaves the slot empty so the next
//! navigation tries again.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::loading::registry::ScreenRegistry;
use crate::loading::screen::{LoadError, ScreenHandle};
use crate::observability::metrics;
use crate::routing::router::ScreenId;

/// Memoizing front for a [`ScreenRegistry`].
#[derive(Debug)]
pub struct ModuleCache {
    registry: ScreenRegistry,
    slots: DashMap<ScreenId, Arc<OnceCell<ScreenHandle>>>,
    invocations: DashMap<ScreenId, u64>,
    loaded: AtomicU64,
}

impl ModuleCache {
    pub fn new(registry: ScreenRegistry) -> Self {
        Self {
            registry,
            slots: DashMap::new(),
            invocations: DashMap::new(),
            loaded: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Return the cached implementation, loading it on first use.
    pub async fn get_or_load(&self, id: &ScreenId) -> Result<ScreenHandle, LoadError> {
        // Clone the slot out so no map guard is held across the await.
        let slot = self.slots.entry(id.clone()).or_default().clone();

        if let Some(screen) = slot.get() {
            metrics::record_cache_hit(id);
            return Ok(screen.clone());
        }

        let loader = self
            .registry
            .get(id)
            .ok_or_else(|| LoadError::NotRegistered(id.clone()))?;

        slot.get_or_try_init(|| async {
            *self.invocations.entry(id.clone()).or_insert(0) += 1;
            tracing::debug!(screen = %id, "Invoking screen loader");

            match loader.load().await {
                Ok(screen) => {
                    let total = self.loaded.fetch_add(1, Ordering::Relaxed) + 1;
                    metrics::record_loader_invocation(id, "ok");
                    metrics::record_cache_size(total);
                    tracing::info!(screen = %id, "Screen module loaded");
                    Ok(screen)
                }
                Err(e) => {
                    metrics::record_loader_invocation(id, "error");
                    tracing::warn!(screen = %id, error = %e, "Screen loader failed");
                    Err(e)
                }
            }
        })
        .await
        .cloned()
    }

    /// Cached implementation, if already loaded.
    pub fn get(&self, id: &ScreenId) -> Option<ScreenHandle> {
        self.slots.get(id).and_then(|slot| slot.get().cloned())
    }

    /// How many times the loader for `id` has been invoked.
    pub fn invocations(&self, id: &ScreenId) -> u64 {
        self.invocations.get(id).map(|r| *r.value()).unwrap_or(0)
    }

    /// Number of screen modules loaded so far.
    pub fn loaded(&self) -> u64 {
        self.loaded.load(Ordering::Relaxed)
    }
}
