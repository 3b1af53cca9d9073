//! The reconstructed game state snapshot.
//!
//! [`GameState`] is the value the aggregate folds events into. It is a
//! plain, comparable snapshot -- no locks, no handles -- so two replays
//! of the same log can be checked for field-by-field equality. The
//! empty canonical state starts at generation 1 in the setup phase with
//! every global parameter at its floor and the standard projects,
//! milestones, and awards pre-populated.

use serde::{Deserialize, Serialize};

use tharsis_types::{
    CardId, GameId, GamePhase, PlayerId, ResourceSet, StandardProjectKind, TileKind,
};

/// Starting credits granted on join (before corporation selection).
pub const STARTING_CREDITS: i32 = 20;
/// Starting terraform rating.
pub const STARTING_TERRAFORM_RATING: i32 = 20;

/// One player's reconstructed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// The player's ID.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Resource pools.
    pub resources: ResourceSet,
    /// Production vector.
    pub production: ResourceSet,
    /// Terraform rating.
    pub terraform_rating: i32,
    /// Banked victory points.
    pub victory_points: i32,
    /// Cards in hand.
    pub hand: Vec<CardId>,
    /// Cards played, in order.
    pub played_cards: Vec<CardId>,
    /// Selected corporation, once chosen.
    pub corporation: Option<CardId>,
    /// Claimed milestone IDs.
    pub claimed_milestones: Vec<String>,
    /// Funded award IDs.
    pub funded_awards: Vec<String>,
}

impl PlayerSnapshot {
    /// A player as they stand immediately after joining: starting
    /// credits, base production of 1 credit / 1 energy / 1 heat, and
    /// the starting terraform rating.
    pub fn joining(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            resources: ResourceSet {
                credits: STARTING_CREDITS,
                ..ResourceSet::ZERO
            },
            production: ResourceSet {
                credits: 1,
                energy: 1,
                heat: 1,
                ..ResourceSet::ZERO
            },
            terraform_rating: STARTING_TERRAFORM_RATING,
            victory_points: 0,
            hand: Vec::new(),
            played_cards: Vec::new(),
            corporation: None,
            claimed_milestones: Vec::new(),
            funded_awards: Vec::new(),
        }
    }
}

/// One of the five claimable milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Claim cost in megacredits.
    pub claim_cost: u32,
    /// Victory points at final scoring.
    pub victory_points: i32,
    /// Who claimed it, if anyone.
    pub claimed_by: Option<PlayerId>,
}

/// One of the five fundable awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Funding cost in megacredits.
    pub funding_cost: u32,
    /// Who funded it, if anyone.
    pub funded_by: Option<PlayerId>,
}

/// A tile on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedTile {
    /// The owning player.
    pub player: PlayerId,
    /// What kind of tile.
    pub kind: TileKind,
    /// Axial-cube column.
    pub q: i32,
    /// Axial-cube row.
    pub r: i32,
    /// Axial-cube diagonal.
    pub s: i32,
}

/// The full reconstructed state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// The game's ID.
    pub id: GameId,
    /// Every joined player, in join order.
    pub players: Vec<PlayerSnapshot>,
    /// Current generation.
    pub generation: u32,
    /// Current phase.
    pub phase: GamePhase,
    /// Global temperature, degrees Celsius.
    pub temperature: i32,
    /// Global oxygen, percent.
    pub oxygen: i32,
    /// Placed ocean count.
    pub oceans: i32,
    /// The claimable milestones.
    pub milestones: Vec<Milestone>,
    /// The fundable awards.
    pub awards: Vec<Award>,
    /// The always-available standard projects.
    pub available_standard_projects: Vec<StandardProjectKind>,
    /// Tiles on the board.
    pub tiles: Vec<PlacedTile>,
    /// Whose turn it is.
    pub current_player: Option<PlayerId>,
    /// Who goes first this generation.
    pub first_player: Option<PlayerId>,
    /// Seat limit from game creation.
    pub max_players: u32,
    /// The winner, once the game has ended.
    pub winner: Option<PlayerId>,
    /// Whether the game has ended.
    pub ended: bool,
}

impl GameState {
    /// The empty canonical state replay starts from.
    pub fn empty(id: GameId) -> Self {
        Self {
            id,
            players: Vec::new(),
            generation: 1,
            phase: GamePhase::Setup,
            temperature: -30,
            oxygen: 0,
            oceans: 0,
            milestones: base_milestones(),
            awards: base_awards(),
            available_standard_projects: vec![
                StandardProjectKind::SellPatents,
                StandardProjectKind::PowerPlant,
                StandardProjectKind::Asteroid,
                StandardProjectKind::Aquifer,
                StandardProjectKind::Greenery,
                StandardProjectKind::City,
                StandardProjectKind::ConvertPlants,
                StandardProjectKind::ConvertHeat,
            ],
            tiles: Vec::new(),
            current_player: None,
            first_player: None,
            max_players: 0,
            winner: None,
            ended: false,
        }
    }

    /// Find a player by ID.
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Find a player mutably by ID.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerSnapshot> {
        self.players.iter_mut().find(|p| p.id == id)
    }
}

/// The base-game milestones: 8 M€ to claim, worth 5 VP.
fn base_milestones() -> Vec<Milestone> {
    ["terraformer", "mayor", "gardener", "builder", "planner"]
        .into_iter()
        .map(|id| Milestone {
            id: id.to_owned(),
            name: capitalize(id),
            claim_cost: 8,
            victory_points: 5,
            claimed_by: None,
        })
        .collect()
}

/// The base-game awards: 8 M€ to fund.
fn base_awards() -> Vec<Award> {
    ["landlord", "banker", "scientist", "thermalist", "miner"]
        .into_iter()
        .map(|id| Award {
            id: id.to_owned(),
            name: capitalize(id),
            funding_cost: 8,
            funded_by: None,
        })
        .collect()
}

/// Uppercase the first letter of an ASCII identifier.
fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_matches_the_canonical_start() {
        let state = GameState::empty(GameId::new());
        assert_eq!(state.generation, 1);
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.temperature, -30);
        assert_eq!(state.oxygen, 0);
        assert_eq!(state.oceans, 0);
        assert_eq!(state.milestones.len(), 5);
        assert_eq!(state.awards.len(), 5);
        assert_eq!(state.available_standard_projects.len(), 8);
        assert!(state.players.is_empty());
        assert!(!state.ended);
    }

    #[test]
    fn joining_player_gets_starting_economy() {
        let snapshot = PlayerSnapshot::joining(PlayerId::new(), "Aria");
        assert_eq!(snapshot.resources.credits, STARTING_CREDITS);
        assert_eq!(snapshot.production.credits, 1);
        assert_eq!(snapshot.production.energy, 1);
        assert_eq!(snapshot.production.heat, 1);
        assert_eq!(snapshot.terraform_rating, STARTING_TERRAFORM_RATING);
    }

    #[test]
    fn milestones_are_unclaimed_initially() {
        let state = GameState::empty(GameId::new());
        assert!(state.milestones.iter().all(|m| m.claimed_by.is_none()));
        assert!(state.awards.iter().all(|a| a.funded_by.is_none()));
    }
}
