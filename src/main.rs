//! Helpdesk navigation shell.
//!
//! Plays the hosting navigation engine: feeds paths to a [`Navigator`] one
//! after another and prints what ended up in the outlets.
//!
//! ```text
//!   path (args or stdin)
//!          │
//!          ▼
//!   ┌─────────────┐   resolve   ┌─────────────┐
//!   │  navigator  │────────────▶│ route table │
//!   └──────┬──────┘             └─────────────┘
//!          │ get_or_load
//!          ▼
//!   ┌─────────────┐   first use  ┌─────────────────────┐
//!   │module cache │─────────────▶│ simulated providers │
//!   └──────┬──────┘              └─────────────────────┘
//!          │
//!          ▼
//!   active route (JSON on stdout)
//! ```

use clap::Parser;
use serde::Serialize;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use helpdesk_router::config::load_config;
use helpdesk_router::navigation::ActiveRoute;
use helpdesk_router::observability::{logging, metrics};
use helpdesk_router::{helpdesk, NavigationOutcome, Navigator, RouteTable};

#[derive(Parser)]
#[command(name = "helpdesk-router")]
#[command(about = "Navigate the helpdesk route table", long_about = None)]
struct Cli {
    /// Route declaration (TOML). Defaults to the built-in helpdesk table.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Simulated screen load latency in milliseconds.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Print Prometheus metrics when done.
    #[arg(long)]
    metrics: bool,

    /// Paths to navigate to, in order. Reads one per line from stdin when omitted.
    paths: Vec<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a str,
    url: &'a str,
    screens: Vec<ScreenReport<'a>>,
}

#[derive(Serialize)]
struct ScreenReport<'a> {
    screen: &'a str,
    title: &'a str,
    matched: &'a str,
}

impl<'a> Report<'a> {
    fn new(path: &'a str, route: &'a ActiveRoute) -> Self {
        Self {
            path,
            url: &route.url,
            screens: route
                .screens
                .iter()
                .map(|s| ScreenReport {
                    screen: s.screen.id().as_str(),
                    title: s.screen.title(),
                    matched: &s.matched,
                })
                .collect(),
        }
    }
}

/// One path per line; blank lines are skipped.
fn read_paths(input: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut paths = Vec::new();
    for line in input.lines() {
        let line = line?;
        let path = line.trim();
        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }
    Ok(paths)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.routes {
        Some(path) => load_config(path)?,
        None => helpdesk::config(),
    };
    config.observability.metrics_enabled |= cli.metrics;

    logging::init_logging(&config.observability)?;
    tracing::info!("helpdesk-router v{} starting", env!("CARGO_PKG_VERSION"));

    let prometheus = if config.observability.metrics_enabled {
        Some(metrics::install_recorder()?)
    } else {
        None
    };

    let table = Arc::new(RouteTable::from_config(&config)?);
    let registry = helpdesk::simulated_registry(&table, Duration::from_millis(cli.latency_ms));
    let navigator = Navigator::new(table, registry, &config.navigation)?;

    tracing::info!(
        routes = config.routes.len(),
        latency_ms = cli.latency_ms,
        "Route table loaded"
    );

    let paths = if cli.paths.is_empty() {
        read_paths(std::io::stdin().lock())?
    } else {
        cli.paths
    };

    let mut failures = 0usize;
    for path in &paths {
        match navigator.navigate(path).await {
            Ok(NavigationOutcome::Activated(route)) => {
                println!("{}", serde_json::to_string(&Report::new(path, &route))?);
            }
            Ok(NavigationOutcome::Superseded { .. }) => {
                // Sequential navigation never overlaps.
                tracing::warn!(path = %path, "Navigation superseded");
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", path, e);
            }
        }
    }

    if let Some(handle) = prometheus {
        print!("{}", handle.render());
    }

    tracing::info!(navigations = paths.len(), failures, "Shell finished");
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
