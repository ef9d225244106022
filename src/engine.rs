//! Match Engine - arrival-order group formation
//!
//! The engine handles:
//! 1. Stamping each enrolled player with a strictly increasing arrival time
//! 2. Inserting into the queue store under a single exclusivity guard
//! 3. Forming a group of the `group_size` oldest players once the threshold is met
//!
//! # Atomicity
//!
//! The guard (a `tokio::sync::Mutex` owning the store) is held across the
//! whole insert-check-form sequence of every call, so enroll calls are totally
//! ordered and two calls can never drain overlapping players. The guard is
//! dropped on every exit path, including store errors propagated with `?`.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::core_types::{Group, Player};
use crate::error::MatchError;
use crate::queue_store::QueueStore;
use crate::report::report_group;

/// Strictly increasing microsecond timestamps.
///
/// Microseconds match the persistent backend's precision, so stamps stay
/// distinct after a round trip through the database.
#[derive(Debug, Default)]
pub struct ArrivalClock {
    last_us: AtomicI64,
}

impl ArrivalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time, bumped to previous + 1µs if the wall clock has not advanced
    pub fn stamp(&self) -> DateTime<Utc> {
        let now_us = Utc::now().timestamp_micros();
        let prev = self
            .last_us
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_us.max(last + 1))
            })
            .unwrap_or(now_us); // closure always returns Some
        let stamped = now_us.max(prev + 1);
        DateTime::from_timestamp_micros(stamped).unwrap_or_else(Utc::now)
    }
}

/// Matchmaking engine over a queue store
pub struct MatchEngine {
    store: Mutex<Box<dyn QueueStore>>,
    group_size: usize,
    clock: ArrivalClock,
}

impl MatchEngine {
    /// Create an engine. Fails if `group_size` is zero.
    pub fn new(store: Box<dyn QueueStore>, group_size: usize) -> Result<Self, MatchError> {
        if group_size == 0 {
            return Err(MatchError::InvalidGroupSize(group_size));
        }
        tracing::info!(
            backend = store.backend_name(),
            group_size,
            "Match engine ready"
        );
        Ok(Self {
            store: Mutex::new(store),
            group_size,
            clock: ArrivalClock::new(),
        })
    }

    /// Convenience constructor for a concrete store
    pub fn with_store<S>(store: S, group_size: usize) -> Result<Self, MatchError>
    where
        S: QueueStore + 'static,
    {
        Self::new(Box::new(store), group_size)
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Enroll a player.
    ///
    /// Returns the group formed by this call, if the insert crossed the
    /// threshold. An `Err` means the player was not queued: once the insert
    /// succeeds, a store failure during the threshold check or formation is
    /// logged and yields `Ok(None)`. The pending group forms on a later enroll.
    pub async fn enroll(
        &self,
        name: impl Into<String>,
        skill: f64,
        latency: f64,
    ) -> Result<Option<Group>, MatchError> {
        self.enroll_player(Player::new(name, skill, latency)).await
    }

    /// Enroll an existing record; its `enqueued_at` is overwritten.
    pub async fn enroll_player(&self, mut player: Player) -> Result<Option<Group>, MatchError> {
        player.enqueued_at = self.clock.stamp();

        let mut store = self.store.lock().await;

        if store.contains_player(&player.name).await? {
            tracing::warn!(name = %player.name, "Rejected enroll: player already queued");
            return Err(MatchError::DuplicatePlayer(player.name));
        }

        let name = player.name.clone();
        store.add_player(player).await?;

        // The player is queued from here on; later failures must not read as a
        // failed enroll, or a retry would hit DuplicatePlayer.
        match Self::check_and_form(&mut **store, self.group_size).await {
            Ok((queued, group)) => {
                tracing::debug!(name = %name, queued, "Player enrolled");
                Ok(group)
            }
            Err(e) => {
                tracing::error!(
                    name = %name,
                    backend = store.backend_name(),
                    error = %e,
                    "Group formation failed; player stays queued"
                );
                Ok(None)
            }
        }
    }

    /// Number of players currently waiting
    pub async fn queued_count(&self) -> Result<usize, MatchError> {
        let store = self.store.lock().await;
        Ok(store.player_count().await?)
    }

    /// Threshold check plus formation. Returns the queue size seen before
    /// formation and the group, if one formed.
    async fn check_and_form(
        store: &mut dyn QueueStore,
        group_size: usize,
    ) -> Result<(usize, Option<Group>), MatchError> {
        let queued = store.player_count().await?;
        if queued < group_size {
            return Ok((queued, None));
        }
        let group = Self::form_group(store, group_size).await?;
        Ok((queued, Some(group)))
    }

    /// Snapshot, sort by arrival, take the oldest `group_size`, remove them.
    ///
    /// Caller must hold the guard.
    async fn form_group(
        store: &mut dyn QueueStore,
        group_size: usize,
    ) -> Result<Group, MatchError> {
        let mut players = store.get_players().await?;

        // Stable; name breaks equal stamps so order never depends on the snapshot
        players.sort_by(|a, b| {
            a.enqueued_at
                .cmp(&b.enqueued_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        players.truncate(group_size);

        store.remove_players(&players).await?;

        report_group(&players);
        Ok(players)
    }
}
