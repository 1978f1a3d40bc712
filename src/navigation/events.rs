//! Navigation lifecycle events.

use serde::Serialize;

use crate::routing::router::ScreenId;

/// Broadcast to every subscriber of a [`Navigator`](crate::navigation::Navigator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    Started {
        generation: u64,
        path: String,
    },
    /// The path resolved to a plan; `url` is the post-redirect URL.
    Resolved {
        generation: u64,
        url: String,
        screens: usize,
    },
    Activated {
        generation: u64,
        depth: usize,
        screen: ScreenId,
    },
    Deactivated {
        generation: u64,
        depth: usize,
        screen: ScreenId,
    },
    Completed {
        generation: u64,
        url: String,
    },
    /// A newer navigation took over before this one settled.
    Superseded {
        generation: u64,
        latest: u64,
    },
    Failed {
        generation: u64,
        reason: String,
    },
}

impl NavigationEvent {
    pub fn generation(&self) -> u64 {
        match self {
            NavigationEvent::Started { generation, .. }
            | NavigationEvent::Resolved { generation, .. }
            | NavigationEvent::Activated { generation, .. }
            | NavigationEvent::Deactivated { generation, .. }
            | NavigationEvent::Completed { generation, .. }
            | NavigationEvent::Superseded { generation, .. }
            | NavigationEvent::Failed { generation, .. } => *generation,
        }
    }
}
