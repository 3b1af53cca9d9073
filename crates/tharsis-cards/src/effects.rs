//! The effect processor.
//!
//! Applies a played card's immediately-triggered behaviors (auto trigger,
//! no condition) in a fixed pipeline order:
//!
//! 1. Production deltas
//! 2. Manual action extraction
//! 3. Fixed victory points
//! 4. Resource deltas, card storage, and payment-shaping modifiers
//! 5. Tile placement queueing
//! 6. Card draw / peek / take / buy
//! 7. Global parameters and their terraform rating awards
//!
//! Each stage is all-or-nothing relative to earlier stages already
//! committed; a later-stage failure does not roll earlier stages back.
//! Every precondition is expected to have been validated by the
//! requirement validator and affordability resolver before this runs,
//! making a mid-pipeline failure exceptional rather than steady-state.
//! Stage errors are wrapped with the stage name and propagated
//! uninterpreted.

use tracing::{debug, info, warn};

use tharsis_game::{DeckService, Game, GameError, PendingCardDrawSelection, Player, PlayerAction};
use tharsis_types::{
    BasicResource, Card, CardId, DiscountModifier, PaymentSubstitute, ResourceCondition,
    ResourceSet, ResourceType, StorageTarget, TileKind, VpConditionKind, CARD_BUY_COST,
};

/// A failure while applying card effects.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// An entity mutation failed inside a pipeline stage.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// The pipeline stage that failed.
        stage: &'static str,
        /// The underlying entity error.
        #[source]
        source: GameError,
    },

    /// The card declares a nonsensical effect combination. A content
    /// bug, surfaced rather than silently ignored; state is unchanged
    /// by the offending stage.
    #[error("invalid card definition on {card}: {reason}")]
    InvalidCardDefinition {
        /// The offending card.
        card: CardId,
        /// What is wrong with it.
        reason: String,
    },

    /// An `any-card` storage output named a card the player has not
    /// played.
    #[error("storage target {card} is not among the player's played cards")]
    StorageTargetNotPlayed {
        /// The invalid target.
        card: CardId,
    },
}

/// Apply all of a card's immediate behaviors to the game and player.
///
/// `choice_index` selects among behavior choices where present;
/// `storage_target` receives `any-card` storage outputs.
pub fn apply_card_effects(
    game: &Game,
    player: &Player,
    card: &Card,
    choice_index: Option<usize>,
    storage_target: Option<&CardId>,
) -> Result<(), EffectError> {
    debug!(card = %card.id, player = %player.id(), "applying card effects");

    apply_production(player, card, choice_index)?;
    extract_manual_actions(player, card);
    apply_fixed_victory_points(player, card);
    apply_resources(player, card, choice_index, storage_target)?;
    queue_tiles(game, player, card, choice_index);
    apply_card_draws(game, player, card, choice_index)?;
    apply_global_parameters(game, player, card, choice_index);

    debug!(card = %card.id, "card effects applied");
    Ok(())
}

/// Iterate the immediate outputs of every qualifying behavior.
fn immediate_outputs<'a>(
    card: &'a Card,
    choice_index: Option<usize>,
) -> impl Iterator<Item = &'a ResourceCondition> {
    card.behaviors
        .iter()
        .filter(|b| b.is_immediate())
        .flat_map(move |b| b.outputs_with_choice(choice_index))
}

// ---------------------------------------------------------------------------
// Stage 1: production
// ---------------------------------------------------------------------------

fn apply_production(
    player: &Player,
    card: &Card,
    choice_index: Option<usize>,
) -> Result<(), EffectError> {
    let deltas = crate::affordability::production_deltas(card, choice_index);
    if deltas == ResourceSet::ZERO {
        return Ok(());
    }
    player
        .apply_production_delta(&deltas)
        .map_err(|source| EffectError::Stage {
            stage: "production",
            source,
        })?;
    info!(card = %card.id, ?deltas, "production effects applied");
    Ok(())
}

// ---------------------------------------------------------------------------
// Stage 2: manual action extraction
// ---------------------------------------------------------------------------

/// Behaviors with a manual trigger become standing, repeatable player
/// actions, independent of `choice_index` -- manual actions resolve
/// their own choices when later invoked.
fn extract_manual_actions(player: &Player, card: &Card) {
    let actions: Vec<PlayerAction> = card
        .behaviors
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_manual())
        .map(|(behavior_index, behavior)| PlayerAction {
            card_id: card.id.clone(),
            card_name: card.name.clone(),
            behavior_index,
            behavior: behavior.clone(),
            uses_this_generation: 0,
        })
        .collect();

    if !actions.is_empty() {
        info!(card = %card.id, count = actions.len(), "manual actions added");
        player.add_actions(actions);
    }
}

// ---------------------------------------------------------------------------
// Stage 3: victory points
// ---------------------------------------------------------------------------

/// Fixed VP conditions award immediately. `once` and `per` conditions
/// belong to the on-demand recalculation layer and are skipped here so
/// nothing double-counts.
fn apply_fixed_victory_points(player: &Player, card: &Card) {
    let mut total: i32 = 0;
    for condition in &card.vp_conditions {
        match condition.condition {
            VpConditionKind::Fixed => total = total.saturating_add(condition.amount),
            VpConditionKind::Once | VpConditionKind::Per => {}
        }
    }
    if total != 0 {
        let new_total = player.add_victory_points(total);
        info!(card = %card.id, awarded = total, total = new_total, "victory points awarded");
    }
}

// ---------------------------------------------------------------------------
// Stage 4: resources, storage, and modifiers
// ---------------------------------------------------------------------------

fn apply_resources(
    player: &Player,
    card: &Card,
    choice_index: Option<usize>,
    storage_target: Option<&CardId>,
) -> Result<(), EffectError> {
    let mut pool_delta = ResourceSet::ZERO;
    let mut rating_delta: i32 = 0;

    // Behavior inputs are explicit costs: deducted from the pool, or
    // from the card's own bucket for storage kinds.
    for behavior in card.behaviors.iter().filter(|b| b.is_immediate()) {
        for input in behavior.inputs_with_choice(choice_index) {
            if let Some(basic) = BasicResource::from_pool(&input.resource) {
                let current = pool_delta.amount(basic);
                pool_delta.set_amount(basic, current.saturating_sub(input.amount.max(0)));
            } else if input.resource.is_card_storage() {
                player
                    .add_to_storage(&card.id, input.amount.max(0).saturating_neg())
                    .map_err(|source| EffectError::Stage {
                        stage: "resources",
                        source,
                    })?;
            }
        }
    }

    for output in immediate_outputs(card, choice_index) {
        match &output.resource {
            resource if resource.is_card_storage() => {
                apply_storage_output(player, card, output, storage_target)?;
            }
            ResourceType::Tr => rating_delta = rating_delta.saturating_add(output.amount),
            ResourceType::Discount => {
                player.add_discount_modifier(DiscountModifier {
                    amount: u32::try_from(output.amount.max(0)).unwrap_or(0),
                    tags: output.affected_tags.clone(),
                });
                info!(card = %card.id, amount = output.amount, "discount modifier registered");
            }
            ResourceType::ValueModifier => {
                for affected in &output.affected_resources {
                    if let Some(resource) = BasicResource::from_pool(affected) {
                        player
                            .add_value_modifier(resource, u32::try_from(output.amount.max(0)).unwrap_or(0));
                        info!(card = %card.id, %resource, amount = output.amount, "value modifier registered");
                    }
                }
            }
            ResourceType::PaymentSubstitute => {
                match output
                    .affected_resources
                    .first()
                    .and_then(BasicResource::from_pool)
                {
                    Some(resource) => {
                        player.register_payment_substitute(PaymentSubstitute {
                            resource,
                            conversion_rate: u32::try_from(output.amount.max(0)).unwrap_or(0),
                        });
                        info!(card = %card.id, %resource, rate = output.amount, "payment substitute registered");
                    }
                    None => {
                        warn!(card = %card.id, "payment-substitute output names no resource");
                    }
                }
            }
            resource => {
                if let Some(basic) = BasicResource::from_pool(resource) {
                    let current = pool_delta.amount(basic);
                    pool_delta.set_amount(basic, current.saturating_add(output.amount));
                } else if matches!(resource, ResourceType::Other(_)) {
                    // Unknown vocabulary must never crash the processor.
                    warn!(card = %card.id, resource = %resource, "ignoring unrecognized output type");
                }
                // Production, tiles, draws, and parameters belong to
                // their own stages.
            }
        }
    }

    if pool_delta != ResourceSet::ZERO {
        player
            .apply_resource_delta(&pool_delta)
            .map_err(|source| EffectError::Stage {
                stage: "resources",
                source,
            })?;
        info!(card = %card.id, ?pool_delta, "resource effects applied");
    }

    if rating_delta != 0 {
        let rating = player.add_terraform_rating(rating_delta);
        info!(card = %card.id, delta = rating_delta, rating, "terraform rating changed");
    }

    Ok(())
}

/// Credit a card-storage output to the right bucket: the played card
/// itself, or the supplied `any-card` target (which must be among the
/// player's played cards). A missing `any-card` target discards the
/// resources with a warning.
fn apply_storage_output(
    player: &Player,
    card: &Card,
    output: &ResourceCondition,
    storage_target: Option<&CardId>,
) -> Result<(), EffectError> {
    let bucket = match output.target.as_ref() {
        None | Some(StorageTarget::SelfCard) => card.id.clone(),
        Some(StorageTarget::AnyCard) => match storage_target {
            Some(target) => {
                if !player.has_played(target) {
                    return Err(EffectError::StorageTargetNotPlayed {
                        card: target.clone(),
                    });
                }
                target.clone()
            }
            None => {
                warn!(
                    card = %card.id,
                    resource = %output.resource,
                    amount = output.amount,
                    "no storage target supplied, resources discarded"
                );
                return Ok(());
            }
        },
        Some(StorageTarget::Other(raw)) => {
            warn!(card = %card.id, target = %raw, "ignoring unrecognized storage target");
            return Ok(());
        }
    };

    player
        .add_to_storage(&bucket, output.amount)
        .map_err(|source| EffectError::Stage {
            stage: "resources",
            source,
        })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Stage 5: tiles
// ---------------------------------------------------------------------------

/// Each placement output enqueues one request per unit for the board
/// subsystem to resolve through player interaction. Tile-driven ocean
/// parameter and terraform rating movement happens when the board
/// resolves the placement, not here.
fn queue_tiles(game: &Game, player: &Player, card: &Card, choice_index: Option<usize>) {
    let mut kinds: Vec<TileKind> = Vec::new();
    for output in immediate_outputs(card, choice_index) {
        let kind = match output.resource {
            ResourceType::CityPlacement => TileKind::City,
            ResourceType::OceanPlacement => TileKind::Ocean,
            ResourceType::GreeneryPlacement => TileKind::Greenery,
            _ => continue,
        };
        let units = usize::try_from(output.amount.max(0)).unwrap_or(0);
        for _ in 0..units {
            kinds.push(kind);
        }
    }

    if !kinds.is_empty() {
        info!(card = %card.id, count = kinds.len(), "tile placements queued");
        game.enqueue_tile_placements(player.id(), &card.id, kinds);
    }
}

// ---------------------------------------------------------------------------
// Stage 6: card draw / peek / take / buy
// ---------------------------------------------------------------------------

/// Two mutually exclusive scenarios:
///
/// - pure `draw` (no peek/take/buy): draw N and record a selection the
///   player keeps in full;
/// - any `peek`: reveal `peek` cards, of which `draw + take` are kept
///   for free and up to `buy` more may be purchased.
///
/// `take` or `buy` without `peek` is an invalid card definition.
fn apply_card_draws(
    game: &Game,
    player: &Player,
    card: &Card,
    choice_index: Option<usize>,
) -> Result<(), EffectError> {
    let mut draw: i32 = 0;
    let mut peek: i32 = 0;
    let mut take: i32 = 0;
    let mut buy: i32 = 0;

    for output in immediate_outputs(card, choice_index) {
        match output.resource {
            ResourceType::CardDraw => draw = draw.saturating_add(output.amount),
            ResourceType::CardPeek => peek = peek.saturating_add(output.amount),
            ResourceType::CardTake => take = take.saturating_add(output.amount),
            ResourceType::CardBuy => buy = buy.saturating_add(output.amount),
            _ => {}
        }
    }

    if draw == 0 && peek == 0 && take == 0 && buy == 0 {
        return Ok(());
    }

    let selection = if peek > 0 {
        let revealed = game
            .deck()
            .draw_project_cards(usize::try_from(peek.max(0)).unwrap_or(0))
            .map_err(|source| EffectError::Stage {
                stage: "card-draw",
                source,
            })?;
        // A draw combined with a peek becomes a mandatory keep.
        PendingCardDrawSelection {
            available_cards: revealed,
            free_take_count: u32::try_from(draw.saturating_add(take).max(0)).unwrap_or(0),
            max_buy_count: u32::try_from(buy.max(0)).unwrap_or(0),
            card_buy_cost: CARD_BUY_COST,
            source: card.id.clone(),
        }
    } else if draw > 0 && take == 0 && buy == 0 {
        let drawn = game
            .deck()
            .draw_project_cards(usize::try_from(draw).unwrap_or(0))
            .map_err(|source| EffectError::Stage {
                stage: "card-draw",
                source,
            })?;
        let count = u32::try_from(drawn.len()).unwrap_or(0);
        PendingCardDrawSelection {
            available_cards: drawn,
            free_take_count: count,
            max_buy_count: 0,
            card_buy_cost: CARD_BUY_COST,
            source: card.id.clone(),
        }
    } else {
        return Err(EffectError::InvalidCardDefinition {
            card: card.id.clone(),
            reason: format!(
                "card-take ({take}) or card-buy ({buy}) without card-peek"
            ),
        });
    };

    info!(
        card = %card.id,
        revealed = selection.available_cards.len(),
        free_take = selection.free_take_count,
        max_buy = selection.max_buy_count,
        "pending card draw selection created"
    );
    player.set_pending_card_draw(Some(selection));
    Ok(())
}

// ---------------------------------------------------------------------------
// Stage 7: global parameters
// ---------------------------------------------------------------------------

/// Apply signed parameter deltas, clamped into range, and award the
/// acting player one terraform rating per actual post-clamp step. A
/// delta that clamps to zero net change awards nothing.
fn apply_global_parameters(game: &Game, player: &Player, card: &Card, choice_index: Option<usize>) {
    let mut temperature: i32 = 0;
    let mut oxygen: i32 = 0;
    let mut oceans: i32 = 0;

    for output in immediate_outputs(card, choice_index) {
        match output.resource {
            ResourceType::Temperature => temperature = temperature.saturating_add(output.amount),
            ResourceType::Oxygen => oxygen = oxygen.saturating_add(output.amount),
            ResourceType::Oceans => oceans = oceans.saturating_add(output.amount),
            _ => {}
        }
    }

    let mut steps: i32 = 0;
    if temperature != 0 {
        steps = steps.saturating_add(game.parameters().increase_temperature(temperature).max(0));
    }
    if oxygen != 0 {
        steps = steps.saturating_add(game.parameters().increase_oxygen(oxygen).max(0));
    }
    if oceans != 0 {
        steps = steps.saturating_add(game.parameters().increase_oceans(oceans).max(0));
    }

    if steps > 0 {
        let rating = player.add_terraform_rating(steps);
        info!(card = %card.id, steps, rating, "terraform rating awarded for parameter steps");
    }
}

#[cfg(test)]
mod tests {
    use tharsis_game::Deck;
    use tharsis_types::{
        CardBehavior, CardKind, GameId, PlayerId, Trigger, TriggerKind,
    };

    use super::*;

    fn card_with_outputs(outputs: Vec<ResourceCondition>) -> Card {
        Card {
            id: CardId::from("test-card"),
            name: "Test Card".to_owned(),
            kind: CardKind::Automated,
            cost: 0,
            tags: Vec::new(),
            requirements: Vec::new(),
            behaviors: vec![CardBehavior {
                triggers: vec![Trigger::auto()],
                inputs: Vec::new(),
                outputs,
                choices: Vec::new(),
            }],
            vp_conditions: Vec::new(),
            resource_storage: None,
        }
    }

    fn game_with_deck(cards: &[&str]) -> (Game, std::sync::Arc<Player>) {
        let deck = Deck::new(cards.iter().map(|c| CardId::from(*c)));
        let game = Game::new(GameId::new(), deck);
        let player = game.add_player(PlayerId::new(), "Aria");
        (game, player)
    }

    #[test]
    fn production_and_resources_apply_in_one_pass() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![
            ResourceCondition::new(ResourceType::SteelProduction, 2),
            ResourceCondition::new(ResourceType::Plants, 3),
        ]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.production().steel, 2);
        assert_eq!(player.resources().plants, 3);
    }

    #[test]
    fn manual_behavior_becomes_standing_action() {
        let (game, player) = game_with_deck(&[]);
        let mut card = card_with_outputs(Vec::new());
        card.behaviors.push(CardBehavior {
            triggers: vec![Trigger {
                kind: TriggerKind::Manual,
                condition: None,
            }],
            inputs: Vec::new(),
            outputs: vec![ResourceCondition::new(ResourceType::Heat, 1)],
            choices: Vec::new(),
        });
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        let actions = player.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions.first().map(|a| a.behavior_index), Some(1));
    }

    #[test]
    fn fixed_vp_awards_immediately_and_per_defers() {
        let (game, player) = game_with_deck(&[]);
        let mut card = card_with_outputs(Vec::new());
        card.vp_conditions = vec![
            tharsis_types::VictoryPointCondition {
                amount: 2,
                condition: VpConditionKind::Fixed,
                per: None,
            },
            tharsis_types::VictoryPointCondition {
                amount: 1,
                condition: VpConditionKind::Per,
                per: None,
            },
        ];
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.victory_points(), 2);
    }

    #[test]
    fn storage_defaults_to_self_card() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![ResourceCondition {
            resource: ResourceType::Microbes,
            amount: 2,
            target: None,
            affected_resources: Vec::new(),
            affected_tags: Vec::new(),
        }]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.storage_amount(&CardId::from("test-card")), 2);
    }

    #[test]
    fn any_card_storage_requires_played_target() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![ResourceCondition {
            resource: ResourceType::Animals,
            amount: 1,
            target: Some(StorageTarget::AnyCard),
            affected_resources: Vec::new(),
            affected_tags: Vec::new(),
        }]);

        let target = CardId::from("fish");
        let result = apply_card_effects(&game, &player, &card, None, Some(&target));
        assert!(matches!(
            result,
            Err(EffectError::StorageTargetNotPlayed { .. })
        ));

        player.push_played_card(target.clone());
        assert!(apply_card_effects(&game, &player, &card, None, Some(&target)).is_ok());
        assert_eq!(player.storage_amount(&target), 1);
    }

    #[test]
    fn missing_any_card_target_discards_with_no_error() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![ResourceCondition {
            resource: ResourceType::Floaters,
            amount: 2,
            target: Some(StorageTarget::AnyCard),
            affected_resources: Vec::new(),
            affected_tags: Vec::new(),
        }]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert!(player.resource_storage().is_empty());
    }

    #[test]
    fn tile_outputs_enqueue_one_request_per_unit() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![
            ResourceCondition::new(ResourceType::GreeneryPlacement, 2),
            ResourceCondition::new(ResourceType::OceanPlacement, 1),
        ]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        let pending = game.pending_tile_placements();
        assert_eq!(pending.len(), 3);
        assert_eq!(
            pending.iter().filter(|r| r.kind == TileKind::Greenery).count(),
            2
        );
    }

    #[test]
    fn pure_draw_creates_keep_all_selection() {
        let (game, player) = game_with_deck(&["a", "b", "c"]);
        let card = card_with_outputs(vec![ResourceCondition::new(ResourceType::CardDraw, 2)]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());

        let selection = player.pending_card_draw();
        let selection = selection.as_ref();
        assert_eq!(selection.map(|s| s.available_cards.len()), Some(2));
        assert_eq!(selection.map(|s| s.free_take_count), Some(2));
        assert_eq!(selection.map(|s| s.max_buy_count), Some(0));
        assert_eq!(game.deck().remaining(), 1);
    }

    #[test]
    fn peek_take_buy_selection() {
        let (game, player) = game_with_deck(&["a", "b", "c", "d"]);
        let card = card_with_outputs(vec![
            ResourceCondition::new(ResourceType::CardPeek, 3),
            ResourceCondition::new(ResourceType::CardTake, 1),
            ResourceCondition::new(ResourceType::CardBuy, 2),
        ]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());

        let selection = player.pending_card_draw();
        let selection = selection.as_ref();
        assert_eq!(selection.map(|s| s.available_cards.len()), Some(3));
        assert_eq!(selection.map(|s| s.free_take_count), Some(1));
        assert_eq!(selection.map(|s| s.max_buy_count), Some(2));
        assert_eq!(selection.map(|s| s.card_buy_cost), Some(CARD_BUY_COST));
    }

    #[test]
    fn take_without_peek_is_an_invalid_definition() {
        let (game, player) = game_with_deck(&["a", "b"]);
        let card = card_with_outputs(vec![ResourceCondition::new(ResourceType::CardTake, 1)]);
        let result = apply_card_effects(&game, &player, &card, None, None);
        assert!(matches!(
            result,
            Err(EffectError::InvalidCardDefinition { .. })
        ));
        // The invalid stage touched nothing.
        assert_eq!(game.deck().remaining(), 2);
        assert!(player.pending_card_draw().is_none());
    }

    #[test]
    fn parameter_steps_award_terraform_rating_post_clamp() {
        let (game, player) = game_with_deck(&[]);
        let before = player.terraform_rating();

        // Temperature at the floor: +4 degrees is two steps.
        let card = card_with_outputs(vec![ResourceCondition::new(ResourceType::Temperature, 4)]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.terraform_rating(), before.saturating_add(2));
    }

    #[test]
    fn maxed_parameter_awards_nothing() {
        let (game, player) = game_with_deck(&[]);
        // Drive oxygen to its ceiling.
        game.parameters().increase_oxygen(14);
        let before = player.terraform_rating();

        let card = card_with_outputs(vec![ResourceCondition::new(ResourceType::Oxygen, 1)]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.terraform_rating(), before);
        assert_eq!(game.parameters().oxygen(), 14);
    }

    #[test]
    fn tr_output_changes_rating_directly() {
        let (game, player) = game_with_deck(&[]);
        let before = player.terraform_rating();
        let card = card_with_outputs(vec![ResourceCondition::new(ResourceType::Tr, 2)]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.terraform_rating(), before.saturating_add(2));
    }

    #[test]
    fn unknown_output_type_is_ignored() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![
            ResourceCondition::new(ResourceType::Other("colony-fleet".to_owned()), 3),
            ResourceCondition::new(ResourceType::Credits, 1),
        ]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        assert_eq!(player.resources().credits, 1);
    }

    #[test]
    fn payment_substitute_output_registers_currency() {
        let (game, player) = game_with_deck(&[]);
        let card = card_with_outputs(vec![ResourceCondition {
            resource: ResourceType::PaymentSubstitute,
            amount: 1,
            target: None,
            affected_resources: vec![ResourceType::Heat],
            affected_tags: Vec::new(),
        }]);
        assert!(apply_card_effects(&game, &player, &card, None, None).is_ok());
        let substitutes = player.payment_substitutes();
        assert_eq!(
            substitutes.first().map(|s| (s.resource, s.conversion_rate)),
            Some((BasicResource::Heat, 1))
        );
    }
}
