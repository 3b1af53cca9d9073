//! Card definition lookup.
//!
//! The engine never reads card JSON from disk itself; it consumes an
//! already-loaded [`CardCatalog`] (or any other [`CardLookup`]
//! implementation) built from the card-definition format: a JSON array
//! of cards, each with `id`, `name`, `type`, `cost`, `tags`,
//! `requirements`, and `behaviors`.

use std::collections::BTreeMap;

use tharsis_types::{Card, CardId};

/// Card definition lookup used by validators and the effect processor.
pub trait CardLookup: Send + Sync {
    /// Look up a card definition by ID.
    fn get(&self, id: &CardId) -> Option<&Card>;
}

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The card definition JSON failed to parse.
    #[error("malformed card definitions: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two definitions share an ID.
    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),
}

/// An in-memory card catalog keyed by card ID.
#[derive(Debug, Default)]
pub struct CardCatalog {
    cards: BTreeMap<CardId, Card>,
}

impl CardCatalog {
    /// Build a catalog from already-parsed cards.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for card in cards {
            let id = card.id.clone();
            if map.insert(id.clone(), card).is_some() {
                return Err(CatalogError::DuplicateCard(id));
            }
        }
        Ok(Self { cards: map })
    }

    /// Parse a catalog from the card-definition JSON array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate all definitions in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

impl CardLookup for CardCatalog {
    fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }
}
