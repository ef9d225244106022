//! Queue Store
//!
//! Storage capability holding the set of currently-waiting players.
//!
//! # Backends
//!
//! - [`InMemoryStore`] - volatile, process-local `Vec`
//! - [`PostgresStore`] - persistent, one row per queued player
//!
//! The [`MatchEngine`](crate::engine::MatchEngine) is the only owner of a
//! store and serializes every call; implementations need no internal locking
//! beyond what `&mut self` already gives them.

pub mod memory;
pub mod postgres;
pub mod schema;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{AppConfig, StorageKind};
use crate::core_types::Player;

/// Queue store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage capability for queued players
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Backend name for logging
    fn backend_name(&self) -> &'static str;

    /// Insert a player. No uniqueness check is performed here.
    async fn add_player(&mut self, player: Player) -> Result<(), StoreError>;

    /// Snapshot of all queued players, in backend-defined order.
    async fn get_players(&self) -> Result<Vec<Player>, StoreError>;

    /// Remove every player in `group`, matched by name.
    ///
    /// Either all members are removed or, on error, none are.
    async fn remove_players(&mut self, group: &[Player]) -> Result<(), StoreError>;

    /// Number of queued players
    async fn player_count(&self) -> Result<usize, StoreError>;

    /// Whether a player with this name is currently queued
    async fn contains_player(&self, name: &str) -> Result<bool, StoreError>;
}

/// Build the queue store selected by configuration.
pub async fn build_store(config: &AppConfig) -> Result<Box<dyn QueueStore>, StoreError> {
    match config.storage {
        StorageKind::Memory => Ok(Box::new(InMemoryStore::new())),
        StorageKind::Postgres => Ok(Box::new(PostgresStore::connect(&config.database).await?)),
    }
}
