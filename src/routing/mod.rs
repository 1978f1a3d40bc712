//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation path ("dashboard/mytickets?tab=1")
//!     → path.rs (normalise into segments)
//!     → router.rs (walk the tree level by level)
//!     → matcher.rs (how many segments does this route consume?)
//!     → Return: RoutePlan (screens outermost first) or RouteError
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → validate
//!     → compile matchers and redirect targets
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves to the same plan
//! - First match wins (declaration order)
//! - An empty-path redirect and an empty-path default child are different things

pub mod matcher;
pub mod path;
pub mod router;

pub use matcher::PathMatch;
pub use router::{PlannedScreen, RouteError, RoutePlan, RouteTable, ScreenId};
