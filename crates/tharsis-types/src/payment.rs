//! Payment breakdowns and payment-shaping modifiers.
//!
//! A [`Payment`] says how a player proposes to cover a card's credit
//! cost: credits at 1:1, steel/titanium at their (possibly boosted)
//! conversion values when the card's tags allow them, and any registered
//! substitute currency at its own rate. Overpayment is allowed -- excess
//! value is wasted, because steel and titanium do not make change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BasicResource, CardTag};

/// Megacredit value of one steel, before value modifiers.
pub const STEEL_BASE_VALUE: u32 = 2;

/// Megacredit value of one titanium, before value modifiers.
pub const TITANIUM_BASE_VALUE: u32 = 3;

/// Cost of buying one revealed card during a draw selection.
pub const CARD_BUY_COST: u32 = 3;

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// An alternate currency a card ability grants (e.g. heat usable as
/// megacredits at a fixed rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PaymentSubstitute {
    /// The resource usable as payment.
    pub resource: BasicResource,
    /// Megacredits each unit is worth.
    pub conversion_rate: u32,
}

/// A credit discount on qualifying cards.
///
/// An empty tag list applies to every card; otherwise the discount
/// applies when the card carries at least one listed tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DiscountModifier {
    /// Megacredits subtracted from the card's cost.
    pub amount: u32,
    /// Tags that qualify for the discount; empty means all cards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<CardTag>,
}

impl DiscountModifier {
    /// Whether this discount applies to a card with the given tags.
    pub fn applies_to(&self, card_tags: &[CardTag]) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| card_tags.contains(t))
    }
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// How a player proposes to pay a card's credit cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Payment {
    /// Megacredits spent.
    pub credits: u32,
    /// Steel spent; only valid when the card carries the building tag.
    pub steel: u32,
    /// Titanium spent; only valid when the card carries the space tag.
    pub titanium: u32,
    /// Substitute currency spent, keyed by resource. Only resources the
    /// player has a registered [`PaymentSubstitute`] for are valid.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub substitutes: BTreeMap<BasicResource, u32>,
}

impl Payment {
    /// A credits-only payment.
    pub fn credits(amount: u32) -> Self {
        Self {
            credits: amount,
            ..Self::default()
        }
    }

    /// Total megacredit value of this payment.
    ///
    /// `steel_value` and `titanium_value` are the per-unit conversion
    /// values after value modifiers. Substitute units not present in
    /// `registered` contribute nothing (they are rejected separately by
    /// the affordability resolver).
    pub fn total_value(
        &self,
        steel_value: u32,
        titanium_value: u32,
        registered: &[PaymentSubstitute],
    ) -> u32 {
        let mut total = self
            .credits
            .saturating_add(self.steel.saturating_mul(steel_value))
            .saturating_add(self.titanium.saturating_mul(titanium_value));
        for (resource, amount) in &self.substitutes {
            if let Some(sub) = registered.iter().find(|s| s.resource == *resource) {
                total = total.saturating_add(amount.saturating_mul(sub.conversion_rate));
            }
        }
        total
    }

    /// Units of one pool resource this payment commits, across the
    /// direct steel/titanium/credits fields and the substitutes map.
    ///
    /// This is what the double-spend rule subtracts before checking
    /// behavior costs against the pool.
    pub fn committed(&self, resource: BasicResource) -> u32 {
        let direct = match resource {
            BasicResource::Credits => self.credits,
            BasicResource::Steel => self.steel,
            BasicResource::Titanium => self.titanium,
            BasicResource::Plants | BasicResource::Energy | BasicResource::Heat => 0,
        };
        direct.saturating_add(self.substitutes.get(&resource).copied().unwrap_or(0))
    }
}
