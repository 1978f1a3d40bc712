//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_navigation_duration_seconds` (histogram): request to settle
//! - `router_loader_invocations_total` (counter): loader calls by screen, result
//! - `router_module_cache_hits_total` (counter): cached screens handed out
//! - `router_module_cache_size` (gauge): screen modules loaded
//!
//! Recording is a no-op until a recorder is installed.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

use crate::routing::router::ScreenId;

/// Install a Prometheus recorder and return the handle used to render it.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("Prometheus recorder installed");
    Ok(handle)
}

pub fn record_navigation(outcome: &'static str, start: Instant) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
    histogram!("router_navigation_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_loader_invocation(screen: &ScreenId, result: &'static str) {
    counter!(
        "router_loader_invocations_total",
        "screen" => screen.to_string(),
        "result" => result
    )
    .increment(1);
}

pub fn record_cache_hit(screen: &ScreenId) {
    counter!("router_module_cache_hits_total", "screen" => screen.to_string()).increment(1);
}

pub fn record_cache_size(loaded: u64) {
    gauge!("router_module_cache_size").set(loaded as f64);
}
