//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check each entry resolves to exactly one thing
//! - Detect sibling path conflicts
//! - Validate value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before a route table is compiled

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::matcher::PathMatch;

/// A single semantic problem in a route declaration.
///
/// `route` is the full declared path of the offending entry, `(root)` for
/// the empty top-level path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route table is empty")]
    EmptyTable,

    #[error("duplicate path '{path}' under {parent}")]
    DuplicatePath { parent: String, path: String },

    #[error("route {route} declares both a redirect and a screen")]
    ConflictingTarget { route: String },

    #[error("route {route} has no screen, redirect or children")]
    MissingTarget { route: String },

    #[error("redirect route {route} cannot have children")]
    RedirectWithChildren { route: String },

    #[error("empty-path redirect {route} must use exact matching")]
    PrefixEmptyRedirect { route: String },

    #[error("route {route} has an invalid path: {reason}")]
    InvalidPath { route: String, reason: &'static str },

    #[error("route {route} has an invalid redirect target '{target}'")]
    InvalidRedirect { route: String, target: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
}

/// Validate a router configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::EmptyTable);
    }
    if config.navigation.max_redirects == 0 {
        errors.push(ValidationError::ZeroValue { field: "navigation.max_redirects" });
    }
    if config.navigation.event_buffer == 0 {
        errors.push(ValidationError::ZeroValue { field: "navigation.event_buffer" });
    }

    validate_level(&config.routes, "", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_level(routes: &[RouteConfig], parent: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for route in routes {
        let full = join(parent, &route.path);
        let name = describe(&full);

        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath {
                parent: describe(parent),
                path: route.path.clone(),
            });
        }

        if let Some(reason) = path_problem(&route.path) {
            errors.push(ValidationError::InvalidPath { route: name.clone(), reason });
        }

        match (&route.redirect_to, &route.screen) {
            (Some(_), Some(_)) => {
                errors.push(ValidationError::ConflictingTarget { route: name.clone() });
            }
            (None, None) if route.children.is_empty() => {
                errors.push(ValidationError::MissingTarget { route: name.clone() });
            }
            _ => {}
        }

        if let Some(target) = &route.redirect_to {
            if !route.children.is_empty() {
                errors.push(ValidationError::RedirectWithChildren { route: name.clone() });
            }
            if route.path.is_empty() && route.path_match == PathMatch::Prefix {
                errors.push(ValidationError::PrefixEmptyRedirect { route: name.clone() });
            }
            if target.contains(['?', '#']) {
                errors.push(ValidationError::InvalidRedirect {
                    route: name.clone(),
                    target: target.clone(),
                });
            }
        }

        validate_level(&route.children, &full, errors);
    }
}

fn path_problem(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return None;
    }
    if path.starts_with('/') {
        return Some("route paths are relative and cannot start with '/'");
    }
    if path.contains(['?', '#']) {
        return Some("query and fragment characters are not allowed");
    }
    if path.split('/').any(str::is_empty) {
        return Some("empty segment");
    }
    None
}

fn join(parent: &str, path: &str) -> String {
    match (parent.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}/{}", parent, path),
    }
}

fn describe(full: &str) -> String {
    if full.is_empty() {
        "(root)".to_string()
    } else {
        format!("'{}'", full)
    }
}
