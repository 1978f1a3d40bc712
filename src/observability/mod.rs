//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / loading / navigation produce:
//!     → logging.rs (structured log events, one span per navigation)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr / JSON log lines
//!     → Prometheus text rendered by the shell (--metrics)
//! ```
//!
//! # Design Decisions
//! - Navigation ID (UUID v4) recorded on every navigation span
//! - Metrics are cheap and silent without an installed recorder

pub mod logging;
pub mod metrics;
