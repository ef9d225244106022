//! Persistent queue store backed by PostgreSQL
//!
//! One row per queued player in the `players` table (see [`super::schema`]).
//! Group removal runs as a single `DELETE ... = ANY($1)` inside a
//! transaction, so a failure never leaves half a group behind.

use async_trait::async_trait;

use super::schema::init_schema;
use super::{QueueStore, StoreError};
use crate::config::DbConfig;
use crate::core_types::Player;
use crate::db::Database;

/// Queue store on top of a PostgreSQL pool
pub struct PostgresStore {
    db: Database,
}

impl PostgresStore {
    /// Wrap an existing pool. The schema must already exist.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connect with the given parameters and make sure the schema exists
    pub async fn connect(cfg: &DbConfig) -> Result<Self, StoreError> {
        let db = Database::connect_with_config(cfg).await?;
        init_schema(db.pool()).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl QueueStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn add_player(&mut self, player: Player) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO players (name, skill, latency, queue_time)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(&player.name)
        .bind(player.skill)
        .bind(player.latency)
        .bind(player.enqueued_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        let players: Vec<Player> =
            sqlx::query_as(r#"SELECT name, skill, latency, queue_time FROM players"#)
                .fetch_all(self.db.pool())
                .await?;
        Ok(players)
    }

    async fn remove_players(&mut self, group: &[Player]) -> Result<(), StoreError> {
        if group.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = group.iter().map(|p| p.name.as_str()).collect();

        let mut tx = self.db.pool().begin().await?;
        let deleted = sqlx::query("DELETE FROM players WHERE name = ANY($1)")
            .bind(names)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        if deleted as usize != group.len() {
            tracing::warn!(
                expected = group.len(),
                deleted,
                "Group removal deleted fewer rows than members"
            );
        }
        Ok(())
    }

    async fn player_count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as usize)
    }

    async fn contains_player(&self, name: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM players WHERE name = $1)")
                .bind(name)
                .fetch_one(self.db.pool())
                .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, DurationRound, Utc};

    // Requires PostgreSQL at DbConfig::default(); each test clears the players table first.
    async fn fresh_store() -> PostgresStore {
        let db = Database::connect_with_config(&DbConfig::default())
            .await
            .expect("Failed to connect");
        init_schema(db.pool()).await.expect("Failed to init schema");
        sqlx::query("DELETE FROM players")
            .execute(db.pool())
            .await
            .expect("Failed to clear players");
        PostgresStore::new(db)
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL running
    async fn test_insert_read_back() {
        let mut store = fresh_store().await;
        let base = Utc::now()
            .duration_trunc(Duration::microseconds(1))
            .unwrap();

        let first = Player {
            name: "alice".into(),
            skill: 1520.5,
            latency: 33.0,
            enqueued_at: base,
        };
        let second = Player {
            name: "bob".into(),
            skill: 1400.0,
            latency: 80.25,
            enqueued_at: base + Duration::microseconds(1),
        };
        store.add_player(first.clone()).await.unwrap();
        store.add_player(second.clone()).await.unwrap();

        let mut players = store.get_players().await.unwrap();
        players.sort_by_key(|p| p.enqueued_at);
        assert_eq!(players, vec![first, second]);
    }

    #[tokio::test]
    #[ignore]
    async fn test_count_and_remove() {
        let mut store = fresh_store().await;
        for name in ["a", "b", "c"] {
            store.add_player(Player::new(name, 1.0, 1.0)).await.unwrap();
        }
        assert_eq!(store.player_count().await.unwrap(), 3);
        assert!(store.contains_player("b").await.unwrap());

        let snapshot = store.get_players().await.unwrap();
        let group: Vec<Player> = snapshot.into_iter().filter(|p| p.name != "c").collect();
        store.remove_players(&group).await.unwrap();

        assert_eq!(store.player_count().await.unwrap(), 1);
        assert!(!store.contains_player("b").await.unwrap());
        assert!(store.contains_player("c").await.unwrap());
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_name_rejected_by_schema() {
        let mut store = fresh_store().await;
        store.add_player(Player::new("dup", 1.0, 1.0)).await.unwrap();
        let res = store.add_player(Player::new("dup", 2.0, 2.0)).await;
        assert!(matches!(res, Err(StoreError::Database(_))));
        assert_eq!(store.player_count().await.unwrap(), 1);
    }
}
