//! The affordability resolver.
//!
//! Computes a card's effective cost (base cost minus discount modifiers,
//! floored at zero), validates that the proposed payment covers it at
//! the player's conversion rates, and separately verifies the behavior
//! costs -- explicit inputs and negative outputs -- are payable from
//! what remains of each resource pool *after* the cash payment. The
//! same pool can never be spent twice, once on the sticker price and
//! once on a behavior cost.
//!
//! Read-only: a failed check changes nothing.

use tracing::debug;

use tharsis_game::Player;
use tharsis_types::{BasicResource, Card, Payment, ResourceSet};

/// A payment that cannot be accepted.
#[derive(Debug, thiserror::Error)]
pub enum AffordabilityError {
    /// Steel or titanium offered for a card without the matching tag.
    #[error("card does not allow paying with {resource}")]
    CurrencyNotAllowed {
        /// The ineligible currency.
        resource: BasicResource,
    },

    /// A substitute currency the player has not registered.
    #[error("player has no payment substitute for {resource}")]
    UnregisteredSubstitute {
        /// The unregistered resource.
        resource: BasicResource,
    },

    /// The payment's total value does not cover the effective cost.
    ///
    /// `min_steel`/`min_titanium` are the smallest number of additional
    /// units (at the player's conversion rates) that would close the
    /// gap; zero when that currency is not allowed for this card.
    #[error(
        "payment insufficient: effective cost {effective_cost} M€, payment provides {provided} M€ \
         (hint: minSteel:{min_steel}, minTitanium:{min_titanium})"
    )]
    InsufficientPayment {
        /// Cost after discounts.
        effective_cost: u32,
        /// Total megacredit value of the payment.
        provided: u32,
        /// Minimum extra steel that would close the gap.
        min_steel: u32,
        /// Minimum extra titanium that would close the gap.
        min_titanium: u32,
    },

    /// The payment spends more of a resource than the player holds.
    #[error("payment spends {committed} {resource}, player holds {held}")]
    PaymentExceedsHoldings {
        /// The overdrawn resource.
        resource: BasicResource,
        /// Units the payment commits.
        committed: u32,
        /// Units the player holds.
        held: i32,
    },

    /// After the payment, too little of a resource remains for the
    /// card's behavior costs.
    #[error(
        "insufficient {resource} for card effects: need {needed} after payment, \
         have {held} total (payment uses {committed})"
    )]
    InsufficientForEffects {
        /// The overdrawn resource.
        resource: BasicResource,
        /// Units the behaviors consume.
        needed: i32,
        /// Units the player holds in total.
        held: i32,
        /// Units already committed to the payment.
        committed: u32,
    },

    /// A storage-kind behavior input exceeds what the card's bucket
    /// holds.
    #[error("card {card} stores {available} {resource}, behavior consumes {needed}")]
    InsufficientStorage {
        /// The bucket's card.
        card: tharsis_types::CardId,
        /// The consumed resource kind.
        resource: tharsis_types::ResourceType,
        /// Units the behavior consumes.
        needed: i32,
        /// Units currently stored.
        available: i32,
    },

    /// A negative production effect would cross the production floor.
    #[error(
        "insufficient {resource} production: card would reduce production to {resulting}, \
         floor is {floor}"
    )]
    ProductionBelowFloor {
        /// The affected production.
        resource: BasicResource,
        /// Production after the card's deltas.
        resulting: i32,
        /// The floor that would be crossed.
        floor: i32,
    },
}

/// Cost of the card after the player's discount modifiers, floored at
/// zero.
pub fn effective_cost(card: &Card, player: &Player) -> u32 {
    let mut cost = card.cost;
    for modifier in player.discount_modifiers() {
        if modifier.applies_to(&card.tags) {
            cost = cost.saturating_sub(modifier.amount);
        }
    }
    cost
}

/// Validate that `payment` pays for `card` and that the card's behavior
/// costs remain payable afterwards.
pub fn validate_affordability(
    player: &Player,
    card: &Card,
    payment: &Payment,
    choice_index: Option<usize>,
) -> Result<(), AffordabilityError> {
    let resources = player.resources();
    let substitutes = player.payment_substitutes();
    let steel_value = player.conversion_value(BasicResource::Steel);
    let titanium_value = player.conversion_value(BasicResource::Titanium);

    // Currency eligibility is a property of the card's tags.
    if payment.steel > 0 && !card.allows_steel() {
        return Err(AffordabilityError::CurrencyNotAllowed {
            resource: BasicResource::Steel,
        });
    }
    if payment.titanium > 0 && !card.allows_titanium() {
        return Err(AffordabilityError::CurrencyNotAllowed {
            resource: BasicResource::Titanium,
        });
    }
    for resource in payment.substitutes.keys() {
        if !substitutes.iter().any(|s| s.resource == *resource) {
            return Err(AffordabilityError::UnregisteredSubstitute {
                resource: *resource,
            });
        }
    }

    // Coverage of the effective cost. Overpayment is allowed; steel and
    // titanium do not make change.
    let cost = effective_cost(card, player);
    if cost > 0 {
        let provided = payment.total_value(steel_value, titanium_value, &substitutes);
        if provided < cost {
            let shortfall = cost.saturating_sub(provided);
            let min_steel = if card.allows_steel() && steel_value > 0 {
                shortfall.div_ceil(steel_value)
            } else {
                0
            };
            let min_titanium = if card.allows_titanium() && titanium_value > 0 {
                shortfall.div_ceil(titanium_value)
            } else {
                0
            };
            return Err(AffordabilityError::InsufficientPayment {
                effective_cost: cost,
                provided,
                min_steel,
                min_titanium,
            });
        }
    }

    // The player must actually hold everything the payment spends.
    for resource in BasicResource::ALL {
        let committed = payment.committed(resource);
        let held = resources.amount(resource);
        if i64::from(committed) > i64::from(held) {
            return Err(AffordabilityError::PaymentExceedsHoldings {
                resource,
                committed,
                held,
            });
        }
    }

    // Behavior costs are paid from whatever the payment left behind.
    let costs = behavior_costs(card, choice_index);
    for resource in BasicResource::ALL {
        let needed = costs.amount(resource);
        if needed <= 0 {
            continue;
        }
        let held = resources.amount(resource);
        let committed = payment.committed(resource);
        let remaining = i64::from(held).saturating_sub(i64::from(committed));
        if remaining < i64::from(needed) {
            return Err(AffordabilityError::InsufficientForEffects {
                resource,
                needed,
                held,
                committed,
            });
        }
    }

    // Storage-kind inputs consume from the card's own bucket.
    for behavior in card.behaviors.iter().filter(|b| b.is_immediate()) {
        for input in behavior.inputs_with_choice(choice_index) {
            if !input.resource.is_card_storage() {
                continue;
            }
            let needed = input.amount.max(0);
            let available = player.storage_amount(&card.id);
            if available < needed {
                return Err(AffordabilityError::InsufficientStorage {
                    card: card.id.clone(),
                    resource: input.resource.clone(),
                    needed,
                    available,
                });
            }
        }
    }

    // Negative production effects must stay above the floors.
    let production = player.production();
    let deltas = production_deltas(card, choice_index);
    for resource in BasicResource::ALL {
        let delta = deltas.amount(resource);
        if delta >= 0 {
            continue;
        }
        let floor = ResourceSet::production_floor(resource);
        let resulting = production.amount(resource).saturating_add(delta);
        if resulting < floor {
            return Err(AffordabilityError::ProductionBelowFloor {
                resource,
                resulting,
                floor,
            });
        }
    }

    debug!(card = %card.id, cost, "affordability validated");
    Ok(())
}

/// Sum the resource costs of the card's immediately-triggered behaviors:
/// explicit inputs plus negative outputs (costs disguised as outputs),
/// including the selected choice's sets.
pub fn behavior_costs(card: &Card, choice_index: Option<usize>) -> ResourceSet {
    let mut costs = ResourceSet::ZERO;
    for behavior in card.behaviors.iter().filter(|b| b.is_immediate()) {
        for input in behavior.inputs_with_choice(choice_index) {
            if let Some(resource) = BasicResource::from_pool(&input.resource) {
                let current = costs.amount(resource);
                costs.set_amount(resource, current.saturating_add(input.amount.max(0)));
            }
        }
        for output in behavior.outputs_with_choice(choice_index) {
            if output.amount < 0 {
                if let Some(resource) = BasicResource::from_pool(&output.resource) {
                    let current = costs.amount(resource);
                    costs.set_amount(
                        resource,
                        current.saturating_add(output.amount.saturating_neg()),
                    );
                }
            }
        }
    }
    costs
}

/// Sum the production deltas of the card's immediately-triggered
/// behaviors, including the selected choice's outputs.
pub fn production_deltas(card: &Card, choice_index: Option<usize>) -> ResourceSet {
    let mut deltas = ResourceSet::ZERO;
    for behavior in card.behaviors.iter().filter(|b| b.is_immediate()) {
        for output in behavior.outputs_with_choice(choice_index) {
            if let Some(resource) = BasicResource::from_production(&output.resource) {
                let current = deltas.amount(resource);
                deltas.set_amount(resource, current.saturating_add(output.amount));
            }
        }
    }
    deltas
}
