//! The game entity.
//!
//! A [`Game`] exclusively owns its players, its global parameters, its
//! deck, and the pending tile placement queue. Tile effects enqueue one
//! placement request per unit here; the board subsystem (outside this
//! engine) drains the queue through player interaction.

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use tharsis_types::{CardId, GameId, GamePhase, PlayerId, TileKind};

use crate::deck::Deck;
use crate::error::GameError;
use crate::global_parameters::GlobalParameters;
use crate::player::Player;
use crate::sync;

/// One queued tile placement awaiting board resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePlacementRequest {
    /// The player who will place the tile.
    pub player: PlayerId,
    /// The card or project that produced the placement.
    pub source: CardId,
    /// What kind of tile to place.
    pub kind: TileKind,
}

/// Turn/phase bookkeeping.
#[derive(Debug)]
struct Meta {
    generation: u32,
    phase: GamePhase,
    current_player: Option<PlayerId>,
}

/// One running game and everything it owns.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    players: RwLock<BTreeMap<PlayerId, Arc<Player>>>,
    parameters: GlobalParameters,
    deck: Deck,
    tile_queue: RwLock<VecDeque<TilePlacementRequest>>,
    meta: RwLock<Meta>,
}

impl Game {
    /// Create a game with the given deck, no players, parameters at
    /// their floor, generation 1, setup phase.
    pub fn new(id: GameId, deck: Deck) -> Self {
        Self {
            id,
            players: RwLock::new(BTreeMap::new()),
            parameters: GlobalParameters::new(),
            deck,
            tile_queue: RwLock::new(VecDeque::new()),
            meta: RwLock::new(Meta {
                generation: 1,
                phase: GamePhase::Setup,
                current_player: None,
            }),
        }
    }

    /// The game's identifier.
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// The game's global parameters.
    pub const fn parameters(&self) -> &GlobalParameters {
        &self.parameters
    }

    /// The game's project deck.
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    // -- Players -----------------------------------------------------------

    /// Add a player and return its handle.
    pub fn add_player(&self, id: PlayerId, name: impl Into<String>) -> Arc<Player> {
        let player = Arc::new(Player::new(id, name));
        sync::write(&self.players).insert(id, Arc::clone(&player));
        if sync::read(&self.meta).current_player.is_none() {
            sync::write(&self.meta).current_player = Some(id);
        }
        player
    }

    /// Look up a player by ID.
    pub fn player(&self, id: PlayerId) -> Result<Arc<Player>, GameError> {
        sync::read(&self.players)
            .get(&id)
            .cloned()
            .ok_or(GameError::PlayerNotFound(id))
    }

    /// Handles to every player, in ID order.
    pub fn players(&self) -> Vec<Arc<Player>> {
        sync::read(&self.players).values().cloned().collect()
    }

    // -- Turn structure ----------------------------------------------------

    /// Current generation number.
    pub fn generation(&self) -> u32 {
        sync::read(&self.meta).generation
    }

    /// Current game phase.
    pub fn phase(&self) -> GamePhase {
        sync::read(&self.meta).phase
    }

    /// Set the game phase.
    pub fn set_phase(&self, phase: GamePhase) {
        sync::write(&self.meta).phase = phase;
    }

    /// The player whose turn it is, if turn order has started.
    pub fn current_player(&self) -> Option<PlayerId> {
        sync::read(&self.meta).current_player
    }

    /// Set the player whose turn it is.
    pub fn set_current_player(&self, player: Option<PlayerId>) {
        sync::write(&self.meta).current_player = player;
    }

    /// Advance to the next generation: bump the counter and reset every
    /// player's standing-action use counts.
    pub fn begin_generation(&self) -> u32 {
        let next = {
            let mut meta = sync::write(&self.meta);
            meta.generation = meta.generation.saturating_add(1);
            meta.generation
        };
        for player in self.players() {
            player.reset_action_uses();
        }
        debug!(game = %self.id, generation = next, "generation started");
        next
    }

    // -- Tile queue --------------------------------------------------------

    /// Enqueue tile placements for a player: one request per entry in
    /// `kinds`, in order.
    pub fn enqueue_tile_placements(
        &self,
        player: PlayerId,
        source: &CardId,
        kinds: impl IntoIterator<Item = TileKind>,
    ) {
        let mut queue = sync::write(&self.tile_queue);
        for kind in kinds {
            queue.push_back(TilePlacementRequest {
                player,
                source: source.clone(),
                kind,
            });
        }
        debug!(game = %self.id, pending = queue.len(), "tile placements enqueued");
    }

    /// Snapshot of the pending tile placements, front first.
    pub fn pending_tile_placements(&self) -> Vec<TilePlacementRequest> {
        sync::read(&self.tile_queue).iter().cloned().collect()
    }

    /// Take the next pending tile placement, if any (board subsystem).
    pub fn pop_tile_placement(&self) -> Option<TilePlacementRequest> {
        sync::write(&self.tile_queue).pop_front()
    }
}
