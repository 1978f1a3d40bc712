//! Navigation driver.
//!
//! # Responsibilities
//! - Resolve a path through the route table
//! - Load each planned screen through the module cache, outermost first
//! - Activate screens into their outlets, reusing ones already in place
//! - Discard navigations superseded by a newer request
//!
//! # Design Decisions
//! - Every navigation takes a monotonically increasing generation token;
//!   only the holder of the latest token may touch the outlets
//! - The token check and the outlet mutation happen under one lock, so a
//!   stale load can never activate
//! - A parent is activated before its child's loader is invoked
//! - Readers get a lock-free snapshot of the active route (arc-swap)

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::loader::ConfigError;
use crate::config::schema::{NavigationConfig, RouterConfig};
use crate::loading::cache::ModuleCache;
use crate::loading::registry::ScreenRegistry;
use crate::loading::screen::{LoadError, ScreenHandle};
use crate::navigation::events::NavigationEvent;
use crate::observability::metrics;
use crate::routing::router::{RouteError, RoutePlan, RouteTable, ScreenId};

/// Errors surfaced to the hosting engine. No fallback is applied here.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("failed to load screen '{screen}': {source}")]
    Load {
        screen: ScreenId,
        #[source]
        source: LoadError,
    },
}

impl NavigationError {
    fn label(&self) -> &'static str {
        match self {
            NavigationError::Route(RouteError::NoMatch { .. }) => "no_match",
            NavigationError::Route(RouteError::RedirectLoop { .. }) => "redirect_loop",
            NavigationError::Load { .. } => "load_failed",
        }
    }
}

/// A screen sitting in an outlet.
#[derive(Debug, Clone)]
pub struct ActiveScreen {
    pub screen: ScreenHandle,
    /// URL prefix that matched this screen's route.
    pub matched: String,
}

/// The screens currently activated, outermost first.
#[derive(Debug, Clone, Default)]
pub struct ActiveRoute {
    /// Generation of the navigation that last changed the outlets.
    pub generation: u64,
    /// URL the screens in place were matched under.
    pub url: String,
    pub screens: Vec<ActiveScreen>,
}

impl ActiveRoute {
    pub fn screen_ids(&self) -> Vec<&str> {
        self.screens.iter().map(|s| s.screen.id().as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

/// How a navigation settled.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The navigation completed and its screens are active.
    Activated(Arc<ActiveRoute>),
    /// A newer navigation was requested first; nothing further was activated.
    Superseded { generation: u64, latest: u64 },
}

impl NavigationOutcome {
    pub fn route(&self) -> Option<&ActiveRoute> {
        match self {
            NavigationOutcome::Activated(route) => Some(route),
            NavigationOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationOutcome::Superseded { .. })
    }
}

/// Drives navigation requests against an immutable route table.
#[derive(Debug)]
pub struct Navigator {
    table: Arc<RouteTable>,
    modules: Arc<ModuleCache>,
    generation: AtomicU64,
    outlets: Mutex<ActiveRoute>,
    current: ArcSwap<ActiveRoute>,
    events: broadcast::Sender<NavigationEvent>,
}

impl Navigator {
    /// Create a navigator. Every screen in `table` must have a registered loader.
    pub fn new(
        table: Arc<RouteTable>,
        registry: ScreenRegistry,
        navigation: &NavigationConfig,
    ) -> Result<Self, LoadError> {
        registry.ensure_covers(&table)?;
        let (events, _) = broadcast::channel(navigation.event_buffer.max(1));

        tracing::info!(
            screens = registry.len(),
            event_buffer = navigation.event_buffer,
            "Navigator ready"
        );

        Ok(Self {
            table,
            modules: Arc::new(ModuleCache::new(registry)),
            generation: AtomicU64::new(0),
            outlets: Mutex::new(ActiveRoute::default()),
            current: ArcSwap::from_pointee(ActiveRoute::default()),
            events,
        })
    }

    /// Validate, compile and wire a navigator in one step.
    pub fn from_config(config: &RouterConfig, registry: ScreenRegistry) -> Result<Self, ConfigError> {
        let table = Arc::new(RouteTable::from_config(config)?);
        Ok(Self::new(table, registry, &config.navigation)?)
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn modules(&self) -> &Arc<ModuleCache> {
        &self.modules
    }

    /// Snapshot of the active route.
    pub fn current(&self) -> Arc<ActiveRoute> {
        self.current.load_full()
    }

    /// Latest generation token handed out.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    /// Navigate to `path`, superseding any navigation still in flight.
    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, NavigationError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = tracing::info_span!(
            "navigate",
            id = %Uuid::new_v4(),
            generation,
            path = %path
        );
        self.run(generation, path).instrument(span).await
    }

    async fn run(&self, generation: u64, path: &str) -> Result<NavigationOutcome, NavigationError> {
        let start = Instant::now();
        self.emit(NavigationEvent::Started {
            generation,
            path: path.to_string(),
        });

        let plan = match self.table.resolve(path) {
            Ok(plan) => plan,
            Err(e) => return Err(self.fail(generation, start, e.into())),
        };
        self.emit(NavigationEvent::Resolved {
            generation,
            url: plan.url.clone(),
            screens: plan.screens.len(),
        });

        for (depth, planned) in plan.screens.iter().enumerate() {
            if let Some(latest) = self.newer_than(generation) {
                return Ok(self.superseded(generation, latest, start));
            }

            let screen = match self.modules.get_or_load(&planned.screen).await {
                Ok(screen) => screen,
                Err(source) => {
                    if let Some(latest) = self.newer_than(generation) {
                        return Ok(self.superseded(generation, latest, start));
                    }
                    let err = NavigationError::Load {
                        screen: planned.screen.clone(),
                        source,
                    };
                    return Err(self.fail(generation, start, err));
                }
            };

            let entry = ActiveScreen {
                screen,
                matched: planned.matched.clone(),
            };
            if let Err(latest) = self.commit(generation, depth, entry) {
                return Ok(self.superseded(generation, latest, start));
            }
        }

        match self.finish(generation, &plan) {
            Ok(route) => {
                metrics::record_navigation("completed", start);
                self.emit(NavigationEvent::Completed {
                    generation,
                    url: route.url.clone(),
                });
                tracing::info!(url = %route.url, screens = ?route.screen_ids(), "Navigation completed");
                Ok(NavigationOutcome::Activated(route))
            }
            Err(latest) => Ok(self.superseded(generation, latest, start)),
        }
    }

    /// Place `entry` at `depth`. Fails with the latest token if `generation` is stale.
    fn commit(&self, generation: u64, depth: usize, entry: ActiveScreen) -> Result<(), u64> {
        let mut outlets = self.lock_outlets();
        self.check_current(generation)?;

        let reuse = outlets
            .screens
            .get(depth)
            .is_some_and(|active| active.screen.id() == entry.screen.id());
        if reuse {
            outlets.screens[depth].matched = entry.matched;
            return Ok(());
        }

        self.deactivate_from(&mut outlets, depth, generation);

        let id = entry.screen.id().clone();
        entry.screen.on_activate();
        // Snapshots always name the URL of their innermost screen.
        outlets.url = entry.matched.clone();
        outlets.screens.push(entry);
        outlets.generation = generation;
        tracing::debug!(depth, screen = %id, "Screen activated");
        self.emit(NavigationEvent::Activated {
            generation,
            depth,
            screen: id,
        });

        self.current.store(Arc::new(outlets.clone()));
        Ok(())
    }

    fn finish(&self, generation: u64, plan: &RoutePlan) -> Result<Arc<ActiveRoute>, u64> {
        let mut outlets = self.lock_outlets();
        self.check_current(generation)?;

        self.deactivate_from(&mut outlets, plan.screens.len(), generation);
        outlets.generation = generation;
        outlets.url = plan.url.clone();

        let snapshot = Arc::new(outlets.clone());
        self.current.store(snapshot.clone());
        Ok(snapshot)
    }

    /// Deactivate every screen at `depth` and deeper, innermost first.
    fn deactivate_from(&self, outlets: &mut ActiveRoute, depth: usize, generation: u64) {
        while outlets.screens.len() > depth {
            let Some(old) = outlets.screens.pop() else {
                break;
            };
            old.screen.on_deactivate();
            self.emit(NavigationEvent::Deactivated {
                generation,
                depth: outlets.screens.len(),
                screen: old.screen.id().clone(),
            });
        }
    }

    fn check_current(&self, generation: u64) -> Result<(), u64> {
        match self.newer_than(generation) {
            Some(latest) => Err(latest),
            None => Ok(()),
        }
    }

    fn newer_than(&self, generation: u64) -> Option<u64> {
        let latest = self.generation.load(Ordering::SeqCst);
        (latest != generation).then_some(latest)
    }

    fn superseded(&self, generation: u64, latest: u64, start: Instant) -> NavigationOutcome {
        metrics::record_navigation("superseded", start);
        tracing::info!(latest, "Navigation superseded");
        self.emit(NavigationEvent::Superseded { generation, latest });
        NavigationOutcome::Superseded { generation, latest }
    }

    fn fail(&self, generation: u64, start: Instant, err: NavigationError) -> NavigationError {
        metrics::record_navigation(err.label(), start);
        tracing::warn!(error = %err, "Navigation failed");
        self.emit(NavigationEvent::Failed {
            generation,
            reason: err.to_string(),
        });
        err
    }

    fn emit(&self, event: NavigationEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn lock_outlets(&self) -> MutexGuard<'_, ActiveRoute> {
        self.outlets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
