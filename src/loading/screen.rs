//! Screens and their deferred loaders.

use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::routing::router::ScreenId;

/// An activatable screen implementation.
///
/// Lifecycle hooks are invoked synchronously by the navigator while it
/// holds its activation lock; they must not block.
pub trait Screen: Send + Sync + std::fmt::Debug {
    fn id(&self) -> &ScreenId;

    /// Human-readable title.
    fn title(&self) -> &str;

    /// Called when the screen is placed into its outlet.
    fn on_activate(&self) {}

    /// Called when the screen is removed from its outlet.
    fn on_deactivate(&self) {}
}

/// Shared handle to a loaded screen.
pub type ScreenHandle = Arc<dyn Screen>;

/// Errors raised while producing a screen implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No loader is registered for the screen.
    #[error("screen '{0}' is not registered")]
    NotRegistered(ScreenId),

    /// The loader ran and failed (network, missing module, ...).
    #[error("screen '{screen}' unavailable: {reason}")]
    Unavailable { screen: ScreenId, reason: String },
}

/// Deferred, parameterless producer of a screen implementation.
pub trait ScreenLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<ScreenHandle, LoadError>>;
}

impl<F, Fut> ScreenLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ScreenHandle, LoadError>> + Send + 'static,
{
    fn load(&self) -> BoxFuture<'static, Result<ScreenHandle, LoadError>> {
        Box::pin(self())
    }
}

/// A screen with fixed metadata and logging hooks.
#[derive(Debug, Clone)]
pub struct StaticScreen {
    id: ScreenId,
    title: String,
}

impl StaticScreen {
    pub fn new(id: impl Into<ScreenId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    pub fn handle(self) -> ScreenHandle {
        Arc::new(self)
    }
}

impl Screen for StaticScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn on_activate(&self) {
        tracing::debug!(screen = %self.id, "Screen activated");
    }

    fn on_deactivate(&self) {
        tracing::debug!(screen = %self.id, "Screen deactivated");
    }
}
