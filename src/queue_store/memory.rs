//! Volatile queue store

use async_trait::async_trait;
use rustc_hash::FxHashSet;

use super::{QueueStore, StoreError};
use crate::core_types::Player;

/// In-process queue; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    players: Vec<Player>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn add_player(&mut self, player: Player) -> Result<(), StoreError> {
        self.players.push(player);
        Ok(())
    }

    async fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }

    async fn remove_players(&mut self, group: &[Player]) -> Result<(), StoreError> {
        let names: FxHashSet<&str> = group.iter().map(|p| p.name.as_str()).collect();
        self.players.retain(|p| !names.contains(p.name.as_str()));
        Ok(())
    }

    async fn player_count(&self) -> Result<usize, StoreError> {
        Ok(self.players.len())
    }

    async fn contains_player(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.players.iter().any(|p| p.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_count() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.player_count().await.unwrap(), 0);

        store.add_player(Player::new("a", 1.0, 10.0)).await.unwrap();
        store.add_player(Player::new("b", 2.0, 20.0)).await.unwrap();

        assert_eq!(store.player_count().await.unwrap(), 2);
        assert!(store.contains_player("a").await.unwrap());
        assert!(!store.contains_player("c").await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_keeps_append_order() {
        let mut store = InMemoryStore::new();
        for name in ["x", "y", "z"] {
            store.add_player(Player::new(name, 0.0, 0.0)).await.unwrap();
        }

        let names: Vec<String> = store
            .get_players()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_remove_by_name() {
        let mut store = InMemoryStore::new();
        for name in ["a", "b", "c", "d"] {
            store.add_player(Player::new(name, 0.0, 0.0)).await.unwrap();
        }

        // Removal matches by name only; other fields are irrelevant
        let group = vec![Player::new("b", 99.0, 99.0), Player::new("d", 0.0, 0.0)];
        store.remove_players(&group).await.unwrap();

        let remaining: Vec<String> = store
            .get_players()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_is_noop() {
        let mut store = InMemoryStore::new();
        store.add_player(Player::new("a", 0.0, 0.0)).await.unwrap();

        store
            .remove_players(&[Player::new("ghost", 0.0, 0.0)])
            .await
            .unwrap();
        assert_eq!(store.player_count().await.unwrap(), 1);
    }
}
