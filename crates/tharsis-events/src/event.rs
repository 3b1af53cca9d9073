//! The domain event model.
//!
//! Events are strictly ordered by `version` within a game; the `data`
//! field carries a type-specific JSON payload deserialized by the
//! matching handler in [`crate::aggregate`]. Payloads are
//! self-contained -- everything a handler needs is in the event, never
//! looked up elsewhere, which is what keeps replay deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tharsis_types::{
    CardId, EventId, GameId, GamePhase, GlobalParameter, PlayerId, ResourceSet, ResourceType,
    TileKind,
};

// ---------------------------------------------------------------------------
// Event envelope
// ---------------------------------------------------------------------------

/// The kind of a domain event.
///
/// Unrecognized wire names parse into [`GameEventType::Other`]; the
/// aggregate treats them as fatal replay corruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameEventType {
    /// A game was created.
    GameCreated,
    /// A player joined the game.
    PlayerJoined,
    /// A player selected their corporation.
    CorporationSelected,
    /// A card was played.
    CardPlayed,
    /// A tile was placed on the board.
    TilePlaced,
    /// A player gained resources.
    ResourcesGained,
    /// A player lost resources.
    ResourcesLost,
    /// A player's production changed.
    ProductionChanged,
    /// A global parameter increased.
    ParameterIncreased,
    /// A milestone was claimed.
    MilestoneClaimed,
    /// An award was funded.
    AwardFunded,
    /// The game phase changed.
    PhaseChanged,
    /// A new generation started.
    GenerationStarted,
    /// A player's turn started.
    TurnStarted,
    /// Victory points were awarded.
    VictoryPointsAwarded,
    /// The game ended.
    GameEnded,
    /// Unrecognized event type, preserved verbatim.
    Other(String),
}

impl GameEventType {
    /// The canonical wire string for this event type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GameCreated => "game_created",
            Self::PlayerJoined => "player_joined",
            Self::CorporationSelected => "corporation_selected",
            Self::CardPlayed => "card_played",
            Self::TilePlaced => "tile_placed",
            Self::ResourcesGained => "resources_gained",
            Self::ResourcesLost => "resources_lost",
            Self::ProductionChanged => "production_changed",
            Self::ParameterIncreased => "parameter_increased",
            Self::MilestoneClaimed => "milestone_claimed",
            Self::AwardFunded => "award_funded",
            Self::PhaseChanged => "phase_changed",
            Self::GenerationStarted => "generation_started",
            Self::TurnStarted => "turn_started",
            Self::VictoryPointsAwarded => "victory_points_awarded",
            Self::GameEnded => "game_ended",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for GameEventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "game_created" => Self::GameCreated,
            "player_joined" => Self::PlayerJoined,
            "corporation_selected" => Self::CorporationSelected,
            "card_played" => Self::CardPlayed,
            "tile_placed" => Self::TilePlaced,
            "resources_gained" => Self::ResourcesGained,
            "resources_lost" => Self::ResourcesLost,
            "production_changed" => Self::ProductionChanged,
            "parameter_increased" => Self::ParameterIncreased,
            "milestone_claimed" => Self::MilestoneClaimed,
            "award_funded" => Self::AwardFunded,
            "phase_changed" => Self::PhaseChanged,
            "generation_started" => Self::GenerationStarted,
            "turn_started" => Self::TurnStarted,
            "victory_points_awarded" => Self::VictoryPointsAwarded,
            "game_ended" => Self::GameEnded,
            _ => Self::Other(raw),
        }
    }
}

impl From<GameEventType> for String {
    fn from(value: GameEventType) -> Self {
        value.as_str().to_owned()
    }
}

impl core::fmt::Display for GameEventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Additional context attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventMetadata {
    /// Correlates events caused by one command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// The event that caused this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,
    /// Free-form labels.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One immutable domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// The game this event belongs to.
    pub game_id: GameId,
    /// The event kind, which selects the payload shape.
    #[serde(rename = "type")]
    pub event_type: GameEventType,
    /// Strict ordering within the game's log; assigned by the
    /// aggregate on append.
    pub version: u64,
    /// The acting player, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    /// Wall-clock time of recording. Never consulted during replay.
    pub timestamp: DateTime<Utc>,
    /// Type-specific payload.
    pub data: serde_json::Value,
    /// Additional context.
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl GameEvent {
    /// Build an event with a fresh ID and the current timestamp.
    /// Version 0 until the aggregate assigns the real one.
    pub fn new(
        game_id: GameId,
        event_type: GameEventType,
        player_id: Option<PlayerId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            game_id,
            event_type,
            version: 0,
            player_id,
            timestamp: Utc::now(),
            data,
            metadata: EventMetadata::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload of [`GameEventType::GameCreated`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameCreatedData {
    /// Who created the game.
    pub created_by: String,
    /// Seat limit.
    pub max_players: u32,
}

/// Payload of [`GameEventType::PlayerJoined`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerJoinedData {
    /// The joining player.
    pub player_id: PlayerId,
    /// Display name.
    pub player_name: String,
    /// Seat order.
    #[serde(default)]
    pub join_order: u32,
}

/// Payload of [`GameEventType::CorporationSelected`].
///
/// Carries the corporation's starting deltas so replay never needs a
/// card lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporationSelectedData {
    /// The selecting player.
    pub player_id: PlayerId,
    /// The chosen corporation card.
    pub corporation_id: CardId,
    /// The corporation's starting resource pools (replaces the join
    /// defaults).
    #[serde(default)]
    pub starting_resources: ResourceSet,
    /// Starting production added on top of the join defaults.
    #[serde(default)]
    pub starting_production: ResourceSet,
}

/// Payload of [`GameEventType::CardPlayed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPlayedData {
    /// The acting player.
    pub player_id: PlayerId,
    /// The card played.
    pub card_id: CardId,
    /// Printed cost at the time of play.
    #[serde(default)]
    pub cost: u32,
    /// Everything the play consumed, cash payment and behavior costs
    /// combined.
    #[serde(default)]
    pub resources_spent: ResourceSet,
}

/// Payload of [`GameEventType::TilePlaced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePlacedData {
    /// The placing player.
    pub player_id: PlayerId,
    /// What was placed.
    pub tile_kind: TileKind,
    /// Axial-cube column.
    pub q: i32,
    /// Axial-cube row.
    pub r: i32,
    /// Axial-cube diagonal.
    pub s: i32,
    /// Printed space bonuses granted on placement, one unit each.
    #[serde(default)]
    pub space_bonuses: Vec<ResourceType>,
}

/// Payload of [`GameEventType::ResourcesGained`] and
/// [`GameEventType::ResourcesLost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesChangedData {
    /// The affected player.
    pub player_id: PlayerId,
    /// Unsigned magnitudes; the event type supplies the sign.
    pub changes: ResourceSet,
    /// Why, for audit display.
    #[serde(default)]
    pub reason: String,
}

/// Payload of [`GameEventType::ProductionChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionChangedData {
    /// The affected player.
    pub player_id: PlayerId,
    /// Signed production deltas.
    pub changes: ResourceSet,
}

/// Payload of [`GameEventType::ParameterIncreased`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterIncreasedData {
    /// Which parameter moved.
    pub parameter: GlobalParameter,
    /// The value after the move (already clamped when recorded).
    pub new_value: i32,
    /// Terraform rating granted to the acting player.
    #[serde(default)]
    pub tr_increase: i32,
    /// The acting player, if the increase is attributable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

/// Payload of [`GameEventType::MilestoneClaimed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneClaimedData {
    /// The claiming player.
    pub player_id: PlayerId,
    /// The claimed milestone.
    pub milestone_id: String,
    /// Credits paid.
    #[serde(default)]
    pub cost: u32,
}

/// Payload of [`GameEventType::AwardFunded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardFundedData {
    /// The funding player.
    pub player_id: PlayerId,
    /// The funded award.
    pub award_id: String,
    /// Credits paid.
    #[serde(default)]
    pub cost: u32,
}

/// Payload of [`GameEventType::PhaseChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChangedData {
    /// The phase entered.
    pub new_phase: GamePhase,
    /// The generation the phase belongs to.
    pub generation: u32,
}

/// Payload of [`GameEventType::GenerationStarted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStartedData {
    /// The new generation number.
    pub generation: u32,
    /// Who goes first.
    pub first_player: PlayerId,
}

/// Payload of [`GameEventType::TurnStarted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnStartedData {
    /// Whose turn began.
    pub player_id: PlayerId,
}

/// Payload of [`GameEventType::VictoryPointsAwarded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryPointsAwardedData {
    /// The scoring player.
    pub player_id: PlayerId,
    /// Points granted.
    pub points: i32,
    /// What granted them (card name, milestone, final scoring).
    #[serde(default)]
    pub source: String,
}

/// Payload of [`GameEventType::GameEnded`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameEndedData {
    /// The winner, if one was determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_roundtrips_wire_names() {
        for wire in ["game_created", "card_played", "parameter_increased", "game_ended"] {
            let parsed = GameEventType::from(wire.to_owned());
            assert_eq!(parsed.as_str(), wire);
            assert!(!matches!(parsed, GameEventType::Other(_)));
        }
    }

    #[test]
    fn unknown_event_type_is_preserved_for_the_fatal_path() {
        let parsed = GameEventType::from("colony_settled".to_owned());
        assert_eq!(parsed, GameEventType::Other("colony_settled".to_owned()));
    }

    #[test]
    fn event_envelope_serializes_type_and_data() {
        let event = GameEvent::new(
            GameId::new(),
            GameEventType::TurnStarted,
            None,
            serde_json::json!({"playerId": PlayerId::new()}),
        );
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(
            json.get("type").and_then(|v| v.as_str()),
            Some("turn_started")
        );
        assert!(json.get("data").is_some());
    }
}
