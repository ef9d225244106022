//! Core types for the matchmaking queue
//!
//! These types are shared by the queue stores, the engine and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Player name - identity key while queued
pub type PlayerName = String;

/// A queued participant awaiting grouping.
///
/// `enqueued_at` is assigned by the engine at enroll time and is the
/// sole ordering key for group formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub name: PlayerName,
    pub skill: f64,
    pub latency: f64,
    #[sqlx(rename = "queue_time")]
    pub enqueued_at: DateTime<Utc>,
}

impl Player {
    /// Create a player stamped with the current time.
    ///
    /// The engine re-stamps on enroll; this is the stamp used by stores in
    /// isolation (tests, tooling).
    pub fn new(name: impl Into<PlayerName>, skill: f64, latency: f64) -> Self {
        Self {
            name: name.into(),
            skill,
            latency,
            enqueued_at: Utc::now(),
        }
    }

    /// Seconds this player has waited as of `now`.
    pub fn wait_secs(&self, now: DateTime<Utc>) -> f64 {
        (now - self.enqueued_at)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_else(|| (now - self.enqueued_at).num_seconds() as f64)
    }
}

/// A formed group: exactly `group_size` players, oldest first.
pub type Group = Vec<Player>;
