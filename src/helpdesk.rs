//! The support-ticket dashboard's route table.
//!
//! ```text
//! ''                      -> redirect login
//! login                   -> Login
//! dashboard               -> Dashboard shell
//!     ''                  -> Home (default child)
//!     mytickets           -> My Tickets
//!     alltickets          -> All Tickets
//!     submitticket        -> Submit Ticket
//! ```
//!
//! Screen providers here are simulated: they sleep for the configured
//! latency (plus up to 10% jitter) and hand back a [`StaticScreen`].

use std::time::Duration;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::loading::registry::ScreenRegistry;
use crate::loading::screen::{LoadError, StaticScreen};
use crate::routing::matcher::PathMatch;
use crate::routing::router::{RouteTable, ScreenId};

pub const LOGIN: &str = "login";
pub const DASHBOARD: &str = "dashboard";
pub const HOME: &str = "home";
pub const MY_TICKETS: &str = "my-tickets";
pub const ALL_TICKETS: &str = "all-tickets";
pub const SUBMIT_TICKET: &str = "submit-ticket";

fn screen(path: &str, id: &str) -> RouteConfig {
    RouteConfig {
        path: path.to_string(),
        screen: Some(id.into()),
        ..RouteConfig::default()
    }
}

/// The declarative route table.
pub fn routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path: String::new(),
            path_match: PathMatch::Exact,
            redirect_to: Some(LOGIN.to_string()),
            ..RouteConfig::default()
        },
        screen("login", LOGIN),
        RouteConfig {
            children: vec![
                RouteConfig {
                    path_match: PathMatch::Exact,
                    ..screen("", HOME)
                },
                screen("mytickets", MY_TICKETS),
                screen("alltickets", ALL_TICKETS),
                screen("submitticket", SUBMIT_TICKET),
            ],
            ..screen("dashboard", DASHBOARD)
        },
    ]
}

/// Router configuration with the helpdesk table and default settings.
pub fn config() -> RouterConfig {
    RouterConfig {
        routes: routes(),
        ..RouterConfig::default()
    }
}

/// Display title for a screen id.
pub fn title(id: &ScreenId) -> String {
    match id.as_str() {
        LOGIN => "Login".to_string(),
        DASHBOARD => "Dashboard".to_string(),
        HOME => "Home".to_string(),
        MY_TICKETS => "My Tickets".to_string(),
        ALL_TICKETS => "All Tickets".to_string(),
        SUBMIT_TICKET => "Submit Ticket".to_string(),
        other => other
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Simulated providers for every screen referenced by `table`.
pub fn simulated_registry(table: &RouteTable, latency: Duration) -> ScreenRegistry {
    let mut registry = ScreenRegistry::new();
    for id in table.screens() {
        let screen_title = title(&id);
        let screen_id = id.clone();
        registry.register(id, move || {
            let screen = StaticScreen::new(screen_id.clone(), screen_title.clone());
            async move {
                tokio::time::sleep(jittered(latency)).await;
                Ok::<_, LoadError>(screen.handle())
            }
        });
    }
    registry
}

fn jittered(latency: Duration) -> Duration {
    let base = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    if base == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(base.saturating_add(fastrand::u64(0..=base / 10)))
}
