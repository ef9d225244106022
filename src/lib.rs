//! Matchmaker - arrival-order group formation
//!
//! Players are enrolled one at a time into a waiting pool; as soon as the
//! pool holds `group_size` players, the oldest `group_size` are removed as one
//! group and a summary report is logged.
//!
//! # Modules
//!
//! - [`core_types`] - `Player` and `Group`
//! - [`queue_store`] - Storage capability (volatile and PostgreSQL backends)
//! - [`engine`] - Match engine: serialized enroll, threshold check, group formation
//! - [`report`] - Group statistics (skill, latency, wait time)
//! - [`error`] - Engine error types
//! - [`db`] - PostgreSQL pool management
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`gateway`] - HTTP transport (axum)

pub mod config;
pub mod core_types;
pub mod db;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod queue_store;
pub mod report;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError, DbConfig, StorageKind};
pub use core_types::{Group, Player, PlayerName};
pub use engine::MatchEngine;
pub use error::MatchError;
pub use queue_store::{InMemoryStore, PostgresStore, QueueStore, StoreError, build_store};
pub use report::{GroupReport, Stats};
