//! Error types for the `tharsis-game` crate.
//!
//! All fallible entity operations return [`GameError`] through the
//! standard [`Result`] type alias.

use tharsis_types::{BasicResource, CardId, PlayerId};

/// Errors that can occur while operating on live game entities.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No player with the given ID exists in this game.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The player does not hold the named card in hand.
    #[error("card {card} is not in the player's hand")]
    CardNotInHand {
        /// The missing card.
        card: CardId,
    },

    /// A resource pool change would cross its floor.
    #[error("insufficient {resource}: change of {delta} from {current} would fall below {floor}")]
    ResourceFloor {
        /// The affected resource.
        resource: BasicResource,
        /// The rejected delta.
        delta: i32,
        /// The value before the change.
        current: i32,
        /// The floor that would be crossed.
        floor: i32,
    },

    /// A production change would cross its floor (credits -5, others 0).
    #[error(
        "insufficient {resource} production: change of {delta} from {current} would fall below {floor}"
    )]
    ProductionFloor {
        /// The affected resource.
        resource: BasicResource,
        /// The rejected delta.
        delta: i32,
        /// The value before the change.
        current: i32,
        /// The floor that would be crossed.
        floor: i32,
    },

    /// A card-storage bucket change would go negative.
    #[error("card {card} storage cannot go below zero (change of {delta} from {current})")]
    StorageFloor {
        /// The card whose bucket was targeted.
        card: CardId,
        /// The rejected delta.
        delta: i32,
        /// The bucket value before the change.
        current: i32,
    },

    /// The deck cannot satisfy a draw request.
    #[error("deck exhausted: requested {requested} cards, {available} available")]
    DeckExhausted {
        /// Cards requested.
        requested: usize,
        /// Cards remaining.
        available: usize,
    },
}
