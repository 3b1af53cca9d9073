//! The single authoritative game store.
//!
//! One arena maps [`GameId`] to its owning [`Game`]; cross-game state is
//! never shared, and nothing outside the store hands out game handles.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tharsis_types::GameId;

use crate::deck::Deck;
use crate::game::Game;
use crate::sync;

/// Arena-style lookup of live games by ID.
#[derive(Debug, Default)]
pub struct GameStore {
    games: RwLock<BTreeMap<GameId, Arc<Game>>>,
}

impl GameStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game with the given deck, register it, and return its
    /// handle.
    pub fn create(&self, id: GameId, deck: Deck) -> Arc<Game> {
        let game = Arc::new(Game::new(id, deck));
        sync::write(&self.games).insert(id, Arc::clone(&game));
        game
    }

    /// Look up a game by ID.
    pub fn get(&self, id: GameId) -> Option<Arc<Game>> {
        sync::read(&self.games).get(&id).cloned()
    }

    /// Remove a game, returning its handle if it existed.
    pub fn remove(&self, id: GameId) -> Option<Arc<Game>> {
        sync::write(&self.games).remove(&id)
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        sync::read(&self.games).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        sync::read(&self.games).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get_returns_same_game() {
        let store = GameStore::new();
        let id = GameId::new();
        let created = store.create(id, Deck::default());
        let fetched = store.get(id);
        assert!(fetched.is_some_and(|g| Arc::ptr_eq(&g, &created)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_drops_the_game() {
        let store = GameStore::new();
        let id = GameId::new();
        store.create(id, Deck::default());
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }
}
