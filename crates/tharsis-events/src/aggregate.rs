//! The event aggregate: folding an ordered log into game state.
//!
//! [`apply_event_to_state`] is the single dispatch point. Every handler
//! deserializes its event's typed payload and mutates only the fields
//! that event type owns -- never reaching across unrelated state.
//! Unknown event types are fatal: the log is corrupt or was written by
//! a newer schema, and a silently-skipped event would reconstruct a
//! state that never existed.

use serde::de::DeserializeOwned;
use tracing::debug;

use tharsis_types::{BasicResource, GameId, GamePhase, GlobalParameter, ResourceSet};

use crate::error::EventError;
use crate::event::{
    AwardFundedData, CardPlayedData, CorporationSelectedData, GameCreatedData, GameEndedData,
    GameEvent, GameEventType, GenerationStartedData, MilestoneClaimedData, ParameterIncreasedData,
    PhaseChangedData, PlayerJoinedData, ProductionChangedData, ResourcesChangedData,
    TilePlacedData, TurnStartedData, VictoryPointsAwardedData,
};
use crate::state::{GameState, PlacedTile, PlayerSnapshot};

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// A game reconstructed from (and extended through) its event log.
#[derive(Debug)]
pub struct GameAggregate {
    state: GameState,
    events: Vec<GameEvent>,
    version: u64,
}

impl GameAggregate {
    /// Rebuild an aggregate by replaying a log.
    ///
    /// Events are sorted by version ascending before application, so
    /// the caller may hand over an unordered batch.
    pub fn from_events(game_id: GameId, mut events: Vec<GameEvent>) -> Result<Self, EventError> {
        events.sort_by_key(|e| e.version);

        let mut state = GameState::empty(game_id);
        for event in &events {
            apply_event_to_state(event, &mut state)?;
        }

        let version = events.last().map_or(0, |e| e.version);
        debug!(game = %game_id, events = events.len(), version, "aggregate reconstructed");
        Ok(Self {
            state,
            events,
            version,
        })
    }

    /// The current folded state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The full event history, version-ordered.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// The version of the latest applied event.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Apply a new event: assign it the next version, fold it into the
    /// state, and append it to the history.
    pub fn apply_event(&mut self, mut event: GameEvent) -> Result<u64, EventError> {
        event.version = self.version.saturating_add(1);
        apply_event_to_state(&event, &mut self.state)?;
        self.version = event.version;
        self.events.push(event);
        Ok(self.version)
    }

    /// Reconstruct the state as of a specific version, for point-in-time
    /// debugging or resolving what a player saw.
    pub fn state_at_version(&self, version: u64) -> Result<GameState, EventError> {
        let mut state = GameState::empty(self.state.id);
        for event in &self.events {
            if event.version > version {
                break;
            }
            apply_event_to_state(event, &mut state)?;
        }
        Ok(state)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Fold one event into a state. Total over the event vocabulary, with
/// the explicit default arm returning the fatal unsupported-event
/// error.
pub fn apply_event_to_state(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    match &event.event_type {
        GameEventType::GameCreated => apply_game_created(event, state),
        GameEventType::PlayerJoined => apply_player_joined(event, state),
        GameEventType::CorporationSelected => apply_corporation_selected(event, state),
        GameEventType::CardPlayed => apply_card_played(event, state),
        GameEventType::TilePlaced => apply_tile_placed(event, state),
        GameEventType::ResourcesGained => apply_resources_changed(event, state, 1),
        GameEventType::ResourcesLost => apply_resources_changed(event, state, -1),
        GameEventType::ProductionChanged => apply_production_changed(event, state),
        GameEventType::ParameterIncreased => apply_parameter_increased(event, state),
        GameEventType::MilestoneClaimed => apply_milestone_claimed(event, state),
        GameEventType::AwardFunded => apply_award_funded(event, state),
        GameEventType::PhaseChanged => apply_phase_changed(event, state),
        GameEventType::GenerationStarted => apply_generation_started(event, state),
        GameEventType::TurnStarted => apply_turn_started(event, state),
        GameEventType::VictoryPointsAwarded => apply_victory_points_awarded(event, state),
        GameEventType::GameEnded => apply_game_ended(event, state),
        GameEventType::Other(kind) => Err(EventError::UnsupportedEvent { kind: kind.clone() }),
    }
}

/// Deserialize an event's payload into the shape its type demands.
fn payload<T: DeserializeOwned>(event: &GameEvent) -> Result<T, EventError> {
    serde_json::from_value(event.data.clone()).map_err(|source| EventError::MalformedPayload {
        kind: event.event_type.as_str().to_owned(),
        source,
    })
}

/// Add `sign` times `delta` to a resource set, saturating per field.
fn apply_delta(target: &mut ResourceSet, delta: &ResourceSet, sign: i32) {
    for resource in BasicResource::ALL {
        let change = delta.amount(resource).saturating_mul(sign);
        let current = target.amount(resource);
        target.set_amount(resource, current.saturating_add(change));
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn apply_game_created(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: GameCreatedData = payload(event)?;
    state.max_players = data.max_players;
    Ok(())
}

fn apply_player_joined(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: PlayerJoinedData = payload(event)?;

    // Joining twice is a no-op, not corruption.
    if state.player(data.player_id).is_some() {
        return Ok(());
    }

    state
        .players
        .push(PlayerSnapshot::joining(data.player_id, data.player_name));
    if state.current_player.is_none() {
        state.current_player = Some(data.player_id);
    }
    if state.first_player.is_none() {
        state.first_player = Some(data.player_id);
    }
    Ok(())
}

fn apply_corporation_selected(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: CorporationSelectedData = payload(event)?;
    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;

    player.corporation = Some(data.corporation_id);
    player.resources = data.starting_resources;
    apply_delta(&mut player.production, &data.starting_production, 1);
    Ok(())
}

fn apply_card_played(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: CardPlayedData = payload(event)?;
    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;

    if let Some(index) = player.hand.iter().position(|c| *c == data.card_id) {
        player.hand.remove(index);
    }
    player.played_cards.push(data.card_id);
    apply_delta(&mut player.resources, &data.resources_spent, -1);
    Ok(())
}

fn apply_tile_placed(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: TilePlacedData = payload(event)?;

    // Space bonuses land in the owner's pools, one unit each.
    {
        let player = state
            .player_mut(data.player_id)
            .ok_or(EventError::PlayerNotFound(data.player_id))?;
        for bonus in &data.space_bonuses {
            if let Some(resource) = BasicResource::from_pool(bonus) {
                let current = player.resources.amount(resource);
                player.resources.set_amount(resource, current.saturating_add(1));
            }
        }
    }

    state.tiles.push(PlacedTile {
        player: data.player_id,
        kind: data.tile_kind,
        q: data.q,
        r: data.r,
        s: data.s,
    });
    Ok(())
}

fn apply_resources_changed(
    event: &GameEvent,
    state: &mut GameState,
    sign: i32,
) -> Result<(), EventError> {
    let data: ResourcesChangedData = payload(event)?;
    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;
    apply_delta(&mut player.resources, &data.changes, sign);
    Ok(())
}

fn apply_production_changed(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: ProductionChangedData = payload(event)?;
    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;
    apply_delta(&mut player.production, &data.changes, 1);
    Ok(())
}

fn apply_parameter_increased(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: ParameterIncreasedData = payload(event)?;

    match data.parameter {
        GlobalParameter::Temperature => state.temperature = data.new_value,
        GlobalParameter::Oxygen => state.oxygen = data.new_value,
        GlobalParameter::Oceans => state.oceans = data.new_value,
    }

    // Rating goes to the acting player when the increase is
    // attributable; world-driven increases award nothing.
    if data.tr_increase != 0 {
        if let Some(player_id) = data.player_id.or(event.player_id) {
            let player = state
                .player_mut(player_id)
                .ok_or(EventError::PlayerNotFound(player_id))?;
            player.terraform_rating = player.terraform_rating.saturating_add(data.tr_increase);
        }
    }
    Ok(())
}

fn apply_milestone_claimed(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: MilestoneClaimedData = payload(event)?;

    let milestone = state
        .milestones
        .iter_mut()
        .find(|m| m.id == data.milestone_id)
        .ok_or_else(|| EventError::MilestoneNotFound(data.milestone_id.clone()))?;
    milestone.claimed_by = Some(data.player_id);

    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;
    player.claimed_milestones.push(data.milestone_id);
    player.resources.credits = player
        .resources
        .credits
        .saturating_sub(i32::try_from(data.cost).unwrap_or(i32::MAX));
    Ok(())
}

fn apply_award_funded(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: AwardFundedData = payload(event)?;

    let award = state
        .awards
        .iter_mut()
        .find(|a| a.id == data.award_id)
        .ok_or_else(|| EventError::AwardNotFound(data.award_id.clone()))?;
    award.funded_by = Some(data.player_id);

    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;
    player.funded_awards.push(data.award_id);
    player.resources.credits = player
        .resources
        .credits
        .saturating_sub(i32::try_from(data.cost).unwrap_or(i32::MAX));
    Ok(())
}

fn apply_phase_changed(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: PhaseChangedData = payload(event)?;
    state.phase = data.new_phase;
    state.generation = data.generation;
    Ok(())
}

fn apply_generation_started(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: GenerationStartedData = payload(event)?;
    state.generation = data.generation;
    state.first_player = Some(data.first_player);
    state.current_player = Some(data.first_player);
    Ok(())
}

fn apply_turn_started(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: TurnStartedData = payload(event)?;
    state.current_player = Some(data.player_id);
    Ok(())
}

fn apply_victory_points_awarded(
    event: &GameEvent,
    state: &mut GameState,
) -> Result<(), EventError> {
    let data: VictoryPointsAwardedData = payload(event)?;
    let player = state
        .player_mut(data.player_id)
        .ok_or(EventError::PlayerNotFound(data.player_id))?;
    player.victory_points = player.victory_points.saturating_add(data.points);
    Ok(())
}

fn apply_game_ended(event: &GameEvent, state: &mut GameState) -> Result<(), EventError> {
    let data: GameEndedData = payload(event)?;
    state.ended = true;
    state.winner = data.winner_id;
    state.phase = GamePhase::Ended;
    Ok(())
}
