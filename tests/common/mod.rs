//! Shared fixtures for navigation tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use helpdesk_router::loading::{LoadError, Screen, ScreenHandle, ScreenRegistry};
use helpdesk_router::{helpdesk, Navigator, RouteTable, ScreenId};

pub type Log = Arc<Mutex<Vec<String>>>;

/// Screen that writes its lifecycle hooks into a shared log.
#[derive(Debug)]
pub struct RecordingScreen {
    id: ScreenId,
    log: Log,
}

impl Screen for RecordingScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        self.id.as_str()
    }

    fn on_activate(&self) {
        self.log.lock().unwrap().push(format!("activate:{}", self.id));
    }

    fn on_deactivate(&self) {
        self.log.lock().unwrap().push(format!("deactivate:{}", self.id));
    }
}

/// Helpdesk screens backed by recording loaders.
///
/// Every loader call logs `load:<id>`. Gated screens block until
/// [`Fixture::open`]; failing screens always return an error.
#[derive(Default)]
pub struct Fixture {
    pub log: Log,
    gates: HashMap<String, Arc<Semaphore>>,
    failing: HashSet<String>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(mut self, id: &str) -> Self {
        self.gates.insert(id.to_string(), Arc::new(Semaphore::new(0)));
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Release every pending and future load of a gated screen.
    pub fn open(&self, id: &str) {
        if let Some(gate) = self.gates.get(id) {
            gate.add_permits(1_000);
        }
    }

    pub fn registry(&self, table: &RouteTable) -> ScreenRegistry {
        let mut registry = ScreenRegistry::new();
        for id in table.screens() {
            let log = self.log.clone();
            let gate = self.gates.get(id.as_str()).cloned();
            let fail = self.failing.contains(id.as_str());
            let screen_id = id.clone();

            registry.register(id, move || {
                let log = log.clone();
                let gate = gate.clone();
                let id = screen_id.clone();
                async move {
                    log.lock().unwrap().push(format!("load:{}", id));
                    if let Some(gate) = gate {
                        gate.acquire().await.map_err(|_| LoadError::Unavailable {
                            screen: id.clone(),
                            reason: "gate closed".into(),
                        })?;
                    }
                    if fail {
                        return Err(LoadError::Unavailable {
                            screen: id,
                            reason: "chunk load failed".into(),
                        });
                    }
                    Ok(Arc::new(RecordingScreen { id, log }) as ScreenHandle)
                }
            });
        }
        registry
    }

    /// Navigator over the helpdesk table.
    pub fn navigator(&self) -> Arc<Navigator> {
        let config = helpdesk::config();
        let table = Arc::new(RouteTable::from_config(&config).unwrap());
        let registry = self.registry(&table);
        Arc::new(Navigator::new(table, registry, &config.navigation).unwrap())
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Number of loader invocations for a screen.
    pub fn loads(&self, id: &str) -> usize {
        let entry = format!("load:{}", id);
        self.entries().iter().filter(|e| **e == entry).count()
    }

    pub async fn wait_for(&self, entry: &str) {
        eventually(|| self.entries().iter().any(|e| e == entry)).await;
    }
}

/// Poll `cond` until it holds, panicking after five seconds.
pub async fn eventually(cond: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
