//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated)
//!     → RouteTable::from_config (compiled, immutable)
//!
//! While editing (routes-cli check --watch):
//!     watcher.rs detects change
//!     → loader.rs loads and validates again
//!     → result reported; no live table is swapped
//! ```
//!
//! # Design Decisions
//! - A compiled route table never changes; a new table means a new navigator
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::NavigationConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
