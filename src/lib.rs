//! Lazy, nested client-side route resolution for the helpdesk dashboard.

pub mod config;
pub mod helpdesk;
pub mod loading;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use loading::{ModuleCache, Screen, ScreenLoader, ScreenRegistry};
pub use navigation::{NavigationError, NavigationOutcome, Navigator};
pub use routing::{RouteError, RoutePlan, RouteTable, ScreenId};
