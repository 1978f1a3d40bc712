//! Lazy screen loading subsystem.
//!
//! # Data Flow
//! ```text
//! Planned screen id
//!     → cache.rs (already loaded? hand it out)
//!     → registry.rs (find the provider)
//!     → screen.rs loader (deferred fetch, may fail)
//!     → cache.rs (memoize on success)
//! ```
//!
//! # Design Decisions
//! - At most one loader invocation per screen for the lifetime of the cache
//! - Concurrent first requests share one in-flight load
//! - Failures are surfaced, never retried here

pub mod cache;
pub mod registry;
pub mod screen;

pub use cache::ModuleCache;
pub use registry::ScreenRegistry;
pub use screen::{LoadError, Screen, ScreenHandle, ScreenLoader, StaticScreen};
