//! Segment matching logic.
//!
//! # Responsibilities
//! - Compare a route's declared path against the remaining URL segments
//! - Report how many segments the route consumes
//!
//! # Design Decisions
//! - Segment-wise comparison, never character prefixes (`log` does not match `login`)
//! - Case-sensitive
//! - No wildcards or parameters

use serde::{Deserialize, Serialize};

use crate::routing::path;

/// How a route's path is compared to the remaining URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    /// Route segments must equal the leading remaining segments.
    #[default]
    Prefix,
    /// Route segments must equal all remaining segments.
    #[serde(alias = "full")]
    Exact,
}

impl std::fmt::Display for PathMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathMatch::Prefix => write!(f, "prefix"),
            PathMatch::Exact => write!(f, "exact"),
        }
    }
}

/// Trait for matching remaining URL segments against a route.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the number of segments consumed, or `None` if the route does not match.
    fn consume(&self, remaining: &[String]) -> Option<usize>;
}

/// Matches a fixed run of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMatcher {
    pattern: Vec<String>,
    mode: PathMatch,
}

impl SegmentMatcher {
    /// Create a matcher for a declared route path such as `""`, `login` or `a/b`.
    pub fn new(route_path: &str, mode: PathMatch) -> Self {
        Self {
            pattern: path::segments(route_path),
            mode,
        }
    }

    pub fn mode(&self) -> PathMatch {
        self.mode
    }

    /// True when the route has an empty path.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl Matcher for SegmentMatcher {
    fn consume(&self, remaining: &[String]) -> Option<usize> {
        if self.pattern.len() > remaining.len() {
            return None;
        }
        if !self.pattern.iter().zip(remaining).all(|(p, s)| p == s) {
            return None;
        }
        match self.mode {
            PathMatch::Exact if self.pattern.len() != remaining.len() => None,
            _ => Some(self.pattern.len()),
        }
    }
}
