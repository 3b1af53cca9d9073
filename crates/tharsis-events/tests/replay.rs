//! Replay determinism: identical logs fold to identical states, no
//! matter when or how often they are replayed.

use serde_json::json;
use tharsis_events::{GameAggregate, GameEvent, GameEventType};
use tharsis_types::{GameId, PlayerId};

/// A representative log touching most event types.
fn sample_log(game: GameId, alice: PlayerId, bryn: PlayerId) -> Vec<GameEvent> {
    let mut events = vec![
        GameEvent::new(
            game,
            GameEventType::GameCreated,
            None,
            json!({"createdBy": "alice", "maxPlayers": 2}),
        ),
        GameEvent::new(
            game,
            GameEventType::PlayerJoined,
            Some(alice),
            json!({"playerId": alice, "playerName": "Alice", "joinOrder": 0}),
        ),
        GameEvent::new(
            game,
            GameEventType::PlayerJoined,
            Some(bryn),
            json!({"playerId": bryn, "playerName": "Bryn", "joinOrder": 1}),
        ),
        GameEvent::new(
            game,
            GameEventType::CorporationSelected,
            Some(alice),
            json!({
                "playerId": alice,
                "corporationId": "helios",
                "startingResources": {"credits": 42},
                "startingProduction": {}
            }),
        ),
        GameEvent::new(
            game,
            GameEventType::CardPlayed,
            Some(alice),
            json!({
                "playerId": alice,
                "cardId": "sponsors",
                "cost": 6,
                "resourcesSpent": {"credits": 6}
            }),
        ),
        GameEvent::new(
            game,
            GameEventType::ProductionChanged,
            Some(alice),
            json!({"playerId": alice, "changes": {"credits": 2}}),
        ),
        GameEvent::new(
            game,
            GameEventType::ParameterIncreased,
            Some(bryn),
            json!({
                "parameter": "oxygen",
                "newValue": 1,
                "trIncrease": 1,
                "playerId": bryn
            }),
        ),
        GameEvent::new(
            game,
            GameEventType::TilePlaced,
            Some(bryn),
            json!({
                "playerId": bryn,
                "tileKind": "city",
                "q": 0, "r": 2, "s": -2,
                "spaceBonuses": ["steel"]
            }),
        ),
        GameEvent::new(
            game,
            GameEventType::MilestoneClaimed,
            Some(alice),
            json!({"playerId": alice, "milestoneId": "terraformer", "cost": 8}),
        ),
        GameEvent::new(
            game,
            GameEventType::AwardFunded,
            Some(bryn),
            json!({"playerId": bryn, "awardId": "banker", "cost": 8}),
        ),
        GameEvent::new(
            game,
            GameEventType::GenerationStarted,
            None,
            json!({"generation": 2, "firstPlayer": bryn}),
        ),
        GameEvent::new(
            game,
            GameEventType::TurnStarted,
            Some(bryn),
            json!({"playerId": bryn}),
        ),
        GameEvent::new(
            game,
            GameEventType::VictoryPointsAwarded,
            Some(alice),
            json!({"playerId": alice, "points": 5, "source": "milestone"}),
        ),
        GameEvent::new(
            game,
            GameEventType::GameEnded,
            None,
            json!({"winnerId": alice}),
        ),
    ];
    for (index, event) in events.iter_mut().enumerate() {
        event.version = u64::try_from(index).unwrap_or(0).saturating_add(1);
    }
    events
}

#[test]
fn replaying_the_same_log_twice_yields_identical_states() {
    let game = GameId::new();
    let alice = PlayerId::new();
    let bryn = PlayerId::new();
    let log = sample_log(game, alice, bryn);

    let first = GameAggregate::from_events(game, log.clone()).ok();
    let second = GameAggregate::from_events(game, log).ok();

    assert!(first.is_some());
    assert_eq!(
        first.map(|a| a.state().clone()),
        second.map(|a| a.state().clone())
    );
}

#[test]
fn replay_survives_a_serde_round_trip_of_the_log() {
    let game = GameId::new();
    let alice = PlayerId::new();
    let bryn = PlayerId::new();
    let log = sample_log(game, alice, bryn);

    let serialized = serde_json::to_string(&log).unwrap_or_default();
    let deserialized: Vec<GameEvent> = serde_json::from_str(&serialized).unwrap_or_default();
    assert_eq!(deserialized.len(), log.len());

    let direct = GameAggregate::from_events(game, log).ok();
    let round_tripped = GameAggregate::from_events(game, deserialized).ok();
    assert!(direct.is_some());
    assert_eq!(
        direct.map(|a| a.state().clone()),
        round_tripped.map(|a| a.state().clone())
    );
}

#[test]
fn folded_state_reflects_the_whole_log() {
    let game = GameId::new();
    let alice = PlayerId::new();
    let bryn = PlayerId::new();
    let aggregate = GameAggregate::from_events(game, sample_log(game, alice, bryn)).ok();
    let Some(aggregate) = aggregate else {
        return;
    };
    let state = aggregate.state();

    assert_eq!(state.players.len(), 2);
    assert!(state.ended);
    assert_eq!(state.winner, Some(alice));
    assert_eq!(state.generation, 2);
    assert_eq!(state.oxygen, 1);
    assert_eq!(state.tiles.len(), 1);

    // Alice: 42 (corporation) - 6 (card) - 8 (milestone) = 28 credits,
    // 20 TR, 5 VP.
    let alice_state = state.player(alice).cloned();
    assert_eq!(alice_state.as_ref().map(|p| p.resources.credits), Some(28));
    assert_eq!(alice_state.as_ref().map(|p| p.victory_points), Some(5));
    assert_eq!(
        alice_state.map(|p| p.claimed_milestones.clone()),
        Some(vec!["terraformer".to_owned()])
    );

    // Bryn: 20 (join) - 8 (award) = 12 credits, +1 steel bonus, 21 TR.
    let bryn_state = state.player(bryn).cloned();
    assert_eq!(bryn_state.as_ref().map(|p| p.resources.credits), Some(12));
    assert_eq!(bryn_state.as_ref().map(|p| p.resources.steel), Some(1));
    assert_eq!(bryn_state.map(|p| p.terraform_rating), Some(21));
}

#[test]
fn point_in_time_view_stops_at_the_requested_version() {
    let game = GameId::new();
    let alice = PlayerId::new();
    let bryn = PlayerId::new();
    let aggregate = GameAggregate::from_events(game, sample_log(game, alice, bryn)).ok();
    let Some(aggregate) = aggregate else {
        return;
    };

    // Version 3: both players joined, nothing else has happened.
    let early = aggregate.state_at_version(3).ok();
    assert_eq!(early.as_ref().map(|s| s.players.len()), Some(2));
    assert_eq!(early.as_ref().map(|s| s.ended), Some(false));
    assert_eq!(
        early.and_then(|s| s.player(alice).map(|p| p.resources.credits)),
        Some(20)
    );
}
