//! Route lookup.
//!
//! # Responsibilities
//! - Store the compiled route tree
//! - Resolve a navigation path into the ordered screens it activates
//! - Follow redirects, bounded by a hop limit
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc` without locks)
//! - First match in declaration order wins; leaves backtrack, redirects commit
//! - Resolution is synchronous; loading screens is the navigator's job

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::schema::{NavigationConfig, RouteConfig, RouterConfig};
use crate::config::validation::validate_config;
use crate::routing::matcher::{Matcher, PathMatch, SegmentMatcher};
use crate::routing::path;

/// Identifier of a lazily-loaded screen module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScreenId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors produced while resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matches the path (or a nested remainder of it).
    #[error("no route matches '{path}'")]
    NoMatch { path: String },

    /// Redirects kept bouncing past the configured hop limit.
    #[error("redirect limit of {limit} exceeded while resolving '{path}'")]
    RedirectLoop { path: String, limit: u32 },
}

/// Parsed redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    raw: String,
    absolute: bool,
    segments: Vec<String>,
}

impl Redirect {
    pub fn parse(target: &str) -> Self {
        Self {
            raw: target.to_string(),
            absolute: target.starts_with('/'),
            segments: path::segments(target),
        }
    }

    pub fn target(&self) -> &str {
        &self.raw
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }
}

/// What a matched route resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(Redirect),
    Screen(ScreenId),
    /// Componentless entry: only hosts children.
    Group,
}

/// A compiled route node.
#[derive(Debug)]
pub struct Route {
    path: String,
    matcher: SegmentMatcher,
    target: RouteTarget,
    children: Vec<Route>,
}

impl Route {
    fn compile(config: &RouteConfig) -> Self {
        let target = match (&config.redirect_to, &config.screen) {
            (Some(redirect), _) => RouteTarget::Redirect(Redirect::parse(redirect)),
            (None, Some(screen)) => RouteTarget::Screen(screen.clone()),
            (None, None) => RouteTarget::Group,
        };
        Self {
            path: config.path.clone(),
            matcher: SegmentMatcher::new(&config.path, config.path_match),
            target,
            children: config.children.iter().map(Route::compile).collect(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_match(&self) -> PathMatch {
        self.matcher.mode()
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn children(&self) -> &[Route] {
        &self.children
    }
}

/// One screen in a resolved plan, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedScreen {
    pub screen: ScreenId,
    /// URL prefix consumed up to and including this screen's route.
    pub matched: String,
}

/// Result of resolving a path against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    /// Path as requested.
    pub requested: String,
    /// Canonical URL after redirects.
    pub url: String,
    /// Number of redirect hops followed.
    pub redirects: u32,
    pub screens: Vec<PlannedScreen>,
}

impl RoutePlan {
    pub fn screen_ids(&self) -> Vec<&str> {
        self.screens.iter().map(|s| s.screen.as_str()).collect()
    }
}

enum Outcome {
    Matched {
        screens: Vec<PlannedScreen>,
        url: Vec<String>,
    },
    Restart(Vec<String>),
    NoMatch,
}

/// Immutable route table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    max_redirects: u32,
}

impl RouteTable {
    /// Validate and compile a router configuration.
    pub fn from_config(config: &RouterConfig) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;
        Ok(Self::compile(&config.routes, &config.navigation))
    }

    fn compile(routes: &[RouteConfig], navigation: &NavigationConfig) -> Self {
        let routes: Vec<Route> = routes.iter().map(Route::compile).collect();
        tracing::debug!(
            top_level = routes.len(),
            max_redirects = navigation.max_redirects,
            "Route table compiled"
        );
        Self {
            routes,
            max_redirects: navigation.max_redirects,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Every screen id referenced anywhere in the table.
    pub fn screens(&self) -> BTreeSet<ScreenId> {
        fn collect(routes: &[Route], out: &mut BTreeSet<ScreenId>) {
            for route in routes {
                if let RouteTarget::Screen(id) = &route.target {
                    out.insert(id.clone());
                }
                collect(&route.children, out);
            }
        }
        let mut out = BTreeSet::new();
        collect(&self.routes, &mut out);
        out
    }

    /// Resolve a path into the screens it activates, outermost first.
    pub fn resolve(&self, requested: &str) -> Result<RoutePlan, RouteError> {
        let mut url = path::segments(requested);
        let mut hops = 0u32;

        loop {
            match self.match_level(&self.routes, &url, &[], &mut hops)? {
                Outcome::Matched { screens, url } => {
                    let plan = RoutePlan {
                        requested: requested.to_string(),
                        url: path::join(&url),
                        redirects: hops,
                        screens,
                    };
                    tracing::debug!(
                        requested = %plan.requested,
                        url = %plan.url,
                        redirects = plan.redirects,
                        depth = plan.screens.len(),
                        "Route resolved"
                    );
                    return Ok(plan);
                }
                Outcome::Restart(target) => url = target,
                Outcome::NoMatch => {
                    return Err(RouteError::NoMatch {
                        path: path::join(&url),
                    })
                }
            }
        }
    }

    fn match_level(
        &self,
        routes: &[Route],
        remaining: &[String],
        base: &[String],
        hops: &mut u32,
    ) -> Result<Outcome, RouteError> {
        for route in routes {
            let Some(consumed) = route.matcher.consume(remaining) else {
                continue;
            };
            let (head, rest) = remaining.split_at(consumed);

            let screen = match &route.target {
                RouteTarget::Redirect(redirect) => {
                    *hops += 1;
                    if *hops > self.max_redirects {
                        let mut full = base.to_vec();
                        full.extend_from_slice(remaining);
                        return Err(RouteError::RedirectLoop {
                            path: path::join(&full),
                            limit: self.max_redirects,
                        });
                    }
                    tracing::debug!(
                        from = %route.path,
                        to = %redirect.raw,
                        hop = *hops,
                        "Following redirect"
                    );
                    if redirect.absolute {
                        return Ok(Outcome::Restart(redirect.segments.clone()));
                    }
                    let mut next = redirect.segments.clone();
                    next.extend_from_slice(rest);
                    // A followed redirect is final: no backtracking past it.
                    return match self.match_level(routes, &next, base, hops)? {
                        Outcome::NoMatch => {
                            let mut full = base.to_vec();
                            full.extend(next);
                            Err(RouteError::NoMatch {
                                path: path::join(&full),
                            })
                        }
                        settled => Ok(settled),
                    };
                }
                RouteTarget::Screen(id) => Some(id),
                RouteTarget::Group => None,
            };

            let mut prefix = base.to_vec();
            prefix.extend_from_slice(head);
            let planned = screen.map(|id| PlannedScreen {
                screen: id.clone(),
                matched: path::join(&prefix),
            });

            if route.children.is_empty() {
                if !rest.is_empty() {
                    continue;
                }
                return Ok(Outcome::Matched {
                    screens: planned.into_iter().collect(),
                    url: head.to_vec(),
                });
            }

            match self.match_level(&route.children, rest, &prefix, hops)? {
                Outcome::Matched { screens, url } => {
                    let mut all: Vec<PlannedScreen> = planned.into_iter().collect();
                    all.extend(screens);
                    let mut full = head.to_vec();
                    full.extend(url);
                    return Ok(Outcome::Matched { screens: all, url: full });
                }
                Outcome::Restart(target) => return Ok(Outcome::Restart(target)),
                Outcome::NoMatch if rest.is_empty() => {
                    // Parent with an empty outlet.
                    return Ok(Outcome::Matched {
                        screens: planned.into_iter().collect(),
                        url: head.to_vec(),
                    });
                }
                Outcome::NoMatch => continue,
            }
        }
        Ok(Outcome::NoMatch)
    }
}

impl std::fmt::Display for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_level(
            f: &mut std::fmt::Formatter<'_>,
            routes: &[Route],
            depth: usize,
        ) -> std::fmt::Result {
            for route in routes {
                let name = if route.path.is_empty() { "''" } else { route.path.as_str() };
                write!(f, "{:indent$}{} [{}]", "", name, route.path_match(), indent = depth * 2)?;
                match &route.target {
                    RouteTarget::Redirect(r) => writeln!(f, " -> redirect {}", r.raw)?,
                    RouteTarget::Screen(id) => writeln!(f, " -> screen {}", id)?,
                    RouteTarget::Group => writeln!(f)?,
                }
                write_level(f, &route.children, depth + 1)?;
            }
            Ok(())
        }
        write_level(f, &self.routes, 0)
    }
}
