//! The project deck collaborator.
//!
//! Card-draw effects reach the deck through the [`DeckService`] trait so
//! the effect processor stays decoupled from deck storage. The in-memory
//! [`Deck`] draws from the front, seeds its shuffle for deterministic
//! tests, and errors rather than short-draws when exhausted.

use std::collections::VecDeque;
use std::sync::RwLock;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use tharsis_types::CardId;

use crate::error::GameError;
use crate::sync;

/// Synchronous deck access used by card-draw effects.
pub trait DeckService: Send + Sync {
    /// Draw `count` project cards off the top of the deck.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DeckExhausted`] when fewer than `count`
    /// cards remain; no cards are drawn in that case.
    fn draw_project_cards(&self, count: usize) -> Result<Vec<CardId>, GameError>;
}

/// An in-memory project deck.
#[derive(Debug, Default)]
pub struct Deck {
    cards: RwLock<VecDeque<CardId>>,
    discard: RwLock<Vec<CardId>>,
}

impl Deck {
    /// A deck with the given draw order (top of the deck first).
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            cards: RwLock::new(cards.into_iter().collect()),
            discard: RwLock::new(Vec::new()),
        }
    }

    /// A deck shuffled with a seed, so replays and tests can reproduce
    /// the exact draw order.
    pub fn shuffled(cards: impl IntoIterator<Item = CardId>, seed: u64) -> Self {
        let mut ordered: Vec<CardId> = cards.into_iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        ordered.shuffle(&mut rng);
        Self::new(ordered)
    }

    /// Cards remaining in the draw pile.
    pub fn remaining(&self) -> usize {
        sync::read(&self.cards).len()
    }

    /// Move cards to the discard pile.
    pub fn discard(&self, cards: impl IntoIterator<Item = CardId>) {
        sync::write(&self.discard).extend(cards);
    }

    /// Cards in the discard pile.
    pub fn discarded(&self) -> usize {
        sync::read(&self.discard).len()
    }
}

impl DeckService for Deck {
    fn draw_project_cards(&self, count: usize) -> Result<Vec<CardId>, GameError> {
        let mut cards = sync::write(&self.cards);
        if cards.len() < count {
            return Err(GameError::DeckExhausted {
                requested: count,
                available: cards.len(),
            });
        }
        let drawn: Vec<CardId> = cards.drain(..count).collect();
        debug!(count, remaining = cards.len(), "drew project cards");
        Ok(drawn)
    }
}
