//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → take generation token N
//!     → RouteTable::resolve (NoMatch: fail, nothing activated)
//!     → for each planned screen, outermost first:
//!         token still N? → ModuleCache::get_or_load → commit into outlet
//!     → deactivate leftovers, publish ActiveRoute snapshot
//!     → events.rs broadcast at each step
//! ```
//!
//! # Design Decisions
//! - Latest request wins; older in-flight navigations settle as superseded
//! - Screens already in place at the same depth are kept, not re-activated
//! - Errors go back to the caller; fallback policy belongs to the host

pub mod events;
pub mod navigator;

pub use events::NavigationEvent;
pub use navigator::{ActiveRoute, ActiveScreen, NavigationError, NavigationOutcome, Navigator};
