//! Route file watcher.
//!
//! Re-loads and re-validates a route declaration whenever it changes on
//! disk and forwards every outcome, good or bad, to the receiver. The live
//! route table of a running navigator is never touched.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::RouterConfig;

/// Result of re-loading the watched file.
pub type ReloadResult = Result<RouterConfig, ConfigError>;

/// A watcher that monitors a route file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ReloadResult>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for reload results.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ReloadResult>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Route file changed, revalidating");
                    let result = load_config(&path);
                    if let Err(e) = &result {
                        tracing::warn!(error = %e, "Route file rejected");
                    }
                    let _ = tx.send(result);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route file watcher started");
        Ok(watcher)
    }
}
