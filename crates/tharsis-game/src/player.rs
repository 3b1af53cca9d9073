//! The player entity and its accessor surface.
//!
//! A [`Player`] exclusively owns its resources, production, terraform
//! rating, victory points, hand, played cards, manual actions, card
//! storage buckets, and payment-shaping modifiers. All state sits behind
//! one entity-level read/write lock; the accessor methods are the only
//! way in or out, so readers never observe a torn write.
//!
//! Floor invariants are enforced at the accessor: a delta that would push
//! a pool or production value below its floor is rejected before any
//! mutation occurs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tharsis_types::{
    BasicResource, CardBehavior, CardId, DiscountModifier, PaymentSubstitute, PlayerId,
    ResourceSet, STEEL_BASE_VALUE, TITANIUM_BASE_VALUE,
};

use crate::error::GameError;
use crate::sync;

/// Starting terraform rating.
pub const STARTING_TERRAFORM_RATING: i32 = 20;

// ---------------------------------------------------------------------------
// Standing actions and pending selections
// ---------------------------------------------------------------------------

/// A standing, repeatable action extracted from a played card's manual
/// behavior. Usable once per generation, tracked by `uses_this_generation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAction {
    /// The card that granted the action.
    pub card_id: CardId,
    /// Display name of the granting card.
    pub card_name: String,
    /// Index of the behavior on that card.
    pub behavior_index: usize,
    /// The behavior to resolve when the action is invoked; manual
    /// behaviors resolve their own choices at invocation time.
    pub behavior: CardBehavior,
    /// Times invoked since the current generation began.
    pub uses_this_generation: u32,
}

/// A card draw/peek decision awaiting player confirmation.
///
/// The player must keep exactly `free_take_count` of `available_cards`
/// for free and may buy up to `max_buy_count` more at `card_buy_cost`
/// each. The confirmation handler is outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCardDrawSelection {
    /// The cards drawn or revealed.
    pub available_cards: Vec<CardId>,
    /// Cards the player keeps for free (all of them, for a pure draw).
    pub free_take_count: u32,
    /// Additional cards the player may purchase.
    pub max_buy_count: u32,
    /// Megacredits per purchased card.
    pub card_buy_cost: u32,
    /// The card whose effect created the selection.
    pub source: CardId,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Everything a player owns. Kept private behind the entity lock.
#[derive(Debug, Default)]
struct PlayerState {
    name: String,
    resources: ResourceSet,
    production: ResourceSet,
    terraform_rating: i32,
    victory_points: i32,
    hand: Vec<CardId>,
    played_cards: Vec<CardId>,
    corporation: Option<CardId>,
    actions: Vec<PlayerAction>,
    pending_card_draw: Option<PendingCardDrawSelection>,
    resource_storage: BTreeMap<CardId, i32>,
    payment_substitutes: Vec<PaymentSubstitute>,
    value_modifiers: BTreeMap<BasicResource, u32>,
    discount_modifiers: Vec<DiscountModifier>,
}

/// One player in one game.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    state: RwLock<PlayerState>,
}

impl Player {
    /// Create a player with empty pools and the starting terraform
    /// rating.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            state: RwLock::new(PlayerState {
                name: name.into(),
                terraform_rating: STARTING_TERRAFORM_RATING,
                ..PlayerState::default()
            }),
        }
    }

    /// The player's identifier.
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// The player's display name.
    pub fn name(&self) -> String {
        sync::read(&self.state).name.clone()
    }

    // -- Resources and production ------------------------------------------

    /// Snapshot of the resource pools.
    pub fn resources(&self) -> ResourceSet {
        sync::read(&self.state).resources
    }

    /// Overwrite the resource pools (setup and replay only; live
    /// mutation goes through [`Player::apply_resource_delta`]).
    pub fn set_resources(&self, resources: ResourceSet) {
        sync::write(&self.state).resources = resources;
    }

    /// Snapshot of the production vector.
    pub fn production(&self) -> ResourceSet {
        sync::read(&self.state).production
    }

    /// Overwrite the production vector (setup and replay only).
    pub fn set_production(&self, production: ResourceSet) {
        sync::write(&self.state).production = production;
    }

    /// Apply a signed delta to the resource pools, all-or-nothing
    /// against the pool floor of zero.
    pub fn apply_resource_delta(&self, delta: &ResourceSet) -> Result<ResourceSet, GameError> {
        let mut state = sync::write(&self.state);
        match state.resources.checked_apply(delta, ResourceSet::pool_floor) {
            Some(updated) => Ok(updated),
            None => Err(first_floor_violation(&state.resources, delta, false)),
        }
    }

    /// Apply a signed delta to the production vector, all-or-nothing
    /// against the production floors (credits -5, others 0).
    pub fn apply_production_delta(&self, delta: &ResourceSet) -> Result<ResourceSet, GameError> {
        let mut state = sync::write(&self.state);
        match state
            .production
            .checked_apply(delta, ResourceSet::production_floor)
        {
            Some(updated) => Ok(updated),
            None => Err(first_floor_violation(&state.production, delta, true)),
        }
    }

    // -- Rating and score --------------------------------------------------

    /// Current terraform rating.
    pub fn terraform_rating(&self) -> i32 {
        sync::read(&self.state).terraform_rating
    }

    /// Overwrite the terraform rating (replay only).
    pub fn set_terraform_rating(&self, rating: i32) {
        sync::write(&self.state).terraform_rating = rating;
    }

    /// Add to the terraform rating, returning the new value.
    pub fn add_terraform_rating(&self, delta: i32) -> i32 {
        let mut state = sync::write(&self.state);
        state.terraform_rating = state.terraform_rating.saturating_add(delta);
        state.terraform_rating
    }

    /// Current victory points.
    pub fn victory_points(&self) -> i32 {
        sync::read(&self.state).victory_points
    }

    /// Overwrite the victory points (replay only).
    pub fn set_victory_points(&self, points: i32) {
        sync::write(&self.state).victory_points = points;
    }

    /// Add victory points, returning the new total.
    pub fn add_victory_points(&self, delta: i32) -> i32 {
        let mut state = sync::write(&self.state);
        state.victory_points = state.victory_points.saturating_add(delta);
        state.victory_points
    }

    // -- Hand and played cards ---------------------------------------------

    /// Snapshot of the hand.
    pub fn hand(&self) -> Vec<CardId> {
        sync::read(&self.state).hand.clone()
    }

    /// Whether the hand contains a card.
    pub fn holds(&self, card: &CardId) -> bool {
        sync::read(&self.state).hand.contains(card)
    }

    /// Add cards to the hand.
    pub fn add_to_hand(&self, cards: impl IntoIterator<Item = CardId>) {
        sync::write(&self.state).hand.extend(cards);
    }

    /// Remove a card from the hand.
    pub fn remove_from_hand(&self, card: &CardId) -> Result<(), GameError> {
        let mut state = sync::write(&self.state);
        match state.hand.iter().position(|c| c == card) {
            Some(index) => {
                state.hand.remove(index);
                Ok(())
            }
            None => Err(GameError::CardNotInHand { card: card.clone() }),
        }
    }

    /// Snapshot of the played cards, in play order.
    pub fn played_cards(&self) -> Vec<CardId> {
        sync::read(&self.state).played_cards.clone()
    }

    /// Whether the player has played a card.
    pub fn has_played(&self, card: &CardId) -> bool {
        sync::read(&self.state).played_cards.contains(card)
    }

    /// Record a card as played.
    pub fn push_played_card(&self, card: CardId) {
        sync::write(&self.state).played_cards.push(card);
    }

    /// The player's corporation, once selected.
    pub fn corporation(&self) -> Option<CardId> {
        sync::read(&self.state).corporation.clone()
    }

    /// Select the player's corporation.
    pub fn set_corporation(&self, corporation: CardId) {
        sync::write(&self.state).corporation = Some(corporation);
    }

    // -- Manual actions ----------------------------------------------------

    /// Snapshot of the standing manual actions.
    pub fn actions(&self) -> Vec<PlayerAction> {
        sync::read(&self.state).actions.clone()
    }

    /// Append standing actions extracted from a played card.
    pub fn add_actions(&self, actions: impl IntoIterator<Item = PlayerAction>) {
        sync::write(&self.state).actions.extend(actions);
    }

    /// Mark one standing action as used this generation. Out-of-range
    /// indices are ignored.
    pub fn mark_action_used(&self, index: usize) {
        let mut state = sync::write(&self.state);
        if let Some(action) = state.actions.get_mut(index) {
            action.uses_this_generation = action.uses_this_generation.saturating_add(1);
        }
    }

    /// Reset every standing action's use counter (generation start).
    pub fn reset_action_uses(&self) {
        let mut state = sync::write(&self.state);
        for action in &mut state.actions {
            action.uses_this_generation = 0;
        }
    }

    // -- Pending card draw -------------------------------------------------

    /// The pending card draw selection, if one awaits confirmation.
    pub fn pending_card_draw(&self) -> Option<PendingCardDrawSelection> {
        sync::read(&self.state).pending_card_draw.clone()
    }

    /// Set or clear the pending card draw selection.
    pub fn set_pending_card_draw(&self, selection: Option<PendingCardDrawSelection>) {
        sync::write(&self.state).pending_card_draw = selection;
    }

    // -- Card storage buckets ----------------------------------------------

    /// Snapshot of all card-storage buckets.
    pub fn resource_storage(&self) -> BTreeMap<CardId, i32> {
        sync::read(&self.state).resource_storage.clone()
    }

    /// Units stored on one card (zero for absent buckets).
    pub fn storage_amount(&self, card: &CardId) -> i32 {
        sync::read(&self.state)
            .resource_storage
            .get(card)
            .copied()
            .unwrap_or(0)
    }

    /// Initialize a card's bucket to its starting amount.
    pub fn init_storage(&self, card: CardId, starting: i32) {
        sync::write(&self.state)
            .resource_storage
            .insert(card, starting.max(0));
    }

    /// Add a signed delta to a card's bucket, rejecting results below
    /// zero.
    pub fn add_to_storage(&self, card: &CardId, delta: i32) -> Result<i32, GameError> {
        let mut state = sync::write(&self.state);
        let current = state.resource_storage.get(card).copied().unwrap_or(0);
        let next = current.saturating_add(delta);
        if next < 0 {
            return Err(GameError::StorageFloor {
                card: card.clone(),
                delta,
                current,
            });
        }
        state.resource_storage.insert(card.clone(), next);
        debug!(card = %card, delta, next, "card storage updated");
        Ok(next)
    }

    // -- Payment-shaping modifiers -----------------------------------------

    /// The player's registered payment substitutes.
    pub fn payment_substitutes(&self) -> Vec<PaymentSubstitute> {
        sync::read(&self.state).payment_substitutes.clone()
    }

    /// Register an alternate payment currency.
    pub fn register_payment_substitute(&self, substitute: PaymentSubstitute) {
        sync::write(&self.state).payment_substitutes.push(substitute);
    }

    /// Megacredit conversion value of one unit of a payment resource,
    /// after value modifiers (steel base 2, titanium base 3; everything
    /// else pays through substitutes, not conversion).
    pub fn conversion_value(&self, resource: BasicResource) -> u32 {
        let base = match resource {
            BasicResource::Steel => STEEL_BASE_VALUE,
            BasicResource::Titanium => TITANIUM_BASE_VALUE,
            _ => 0,
        };
        let bonus = sync::read(&self.state)
            .value_modifiers
            .get(&resource)
            .copied()
            .unwrap_or(0);
        base.saturating_add(bonus)
    }

    /// Raise the conversion value of a payment resource.
    pub fn add_value_modifier(&self, resource: BasicResource, amount: u32) {
        let mut state = sync::write(&self.state);
        let entry = state.value_modifiers.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// The player's registered card-cost discounts.
    pub fn discount_modifiers(&self) -> Vec<DiscountModifier> {
        sync::read(&self.state).discount_modifiers.clone()
    }

    /// Register a card-cost discount.
    pub fn add_discount_modifier(&self, modifier: DiscountModifier) {
        sync::write(&self.state).discount_modifiers.push(modifier);
    }
}

/// Identify which resource in a rejected delta crossed its floor, for
/// the error message. The set itself was left untouched.
fn first_floor_violation(current: &ResourceSet, delta: &ResourceSet, production: bool) -> GameError {
    for resource in BasicResource::ALL {
        let floor = if production {
            ResourceSet::production_floor(resource)
        } else {
            ResourceSet::pool_floor(resource)
        };
        let have = current.amount(resource);
        let change = delta.amount(resource);
        if have.saturating_add(change) < floor {
            return if production {
                GameError::ProductionFloor {
                    resource,
                    delta: change,
                    current: have,
                    floor,
                }
            } else {
                GameError::ResourceFloor {
                    resource,
                    delta: change,
                    current: have,
                    floor,
                }
            };
        }
    }
    // Unreachable in practice: callers only ask after a rejected apply.
    GameError::ResourceFloor {
        resource: BasicResource::Credits,
        delta: 0,
        current: current.credits,
        floor: 0,
    }
}
