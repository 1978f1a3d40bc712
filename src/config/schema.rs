//! Configuration schema definitions.
//!
//! This module defines the declarative route table and the runtime settings
//! around it. All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::matcher::PathMatch;
use crate::routing::router::ScreenId;

/// Root configuration for the router.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Top-level route declarations, in match order.
    pub routes: Vec<RouteConfig>,

    /// Navigation settings.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One navigable path segment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct RouteConfig {
    /// Path relative to the parent (`""`, `login`, `reports/weekly`).
    #[serde(default)]
    pub path: String,

    /// How `path` is compared to the remaining URL.
    #[serde(default)]
    pub path_match: PathMatch,

    /// Redirect target. Leading `/` makes it absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,

    /// Screen module loaded when the route matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenId>,

    /// Nested routes rendered into this screen's outlet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

/// Navigation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum redirect hops followed for a single navigation.
    pub max_redirects: u32,

    /// Capacity of the navigation event channel.
    pub event_buffer: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirects: 8,
            event_buffer: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Install the Prometheus recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
        }
    }
}
