//! Card definitions and behaviors.
//!
//! A card is a set of independent *behaviors*; each behavior is gated by
//! its own triggers, consumes `inputs`, grants `outputs`, and may offer
//! `choices` between alternative input/output sets (exactly one choice is
//! selected by index at play time). These structures deserialize directly
//! from the card-definition JSON format.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    CardKind, CardTag, RequirementType, ResourceType, StorageTarget, TriggerKind, VpConditionKind,
};
use crate::ids::CardId;

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// A single resource input or output on a behavior.
///
/// A negative `amount` on an output is a cost disguised as an output.
/// `target` only matters for card-storage resource types, where it
/// distinguishes the played card's own bucket from a player-chosen card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceCondition {
    /// What the condition produces or consumes.
    #[serde(rename = "type")]
    pub resource: ResourceType,
    /// Signed quantity.
    pub amount: i32,
    /// Destination for card-storage outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<StorageTarget>,
    /// Resources a `value-modifier` or `payment-substitute` output
    /// applies to (e.g. heat for a heat-as-credits corporation).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_resources: Vec<ResourceType>,
    /// Card tags a `discount` output applies to; empty means all cards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_tags: Vec<CardTag>,
}

impl ResourceCondition {
    /// Shorthand constructor for an unconditional amount of a resource.
    pub const fn new(resource: ResourceType, amount: i32) -> Self {
        Self {
            resource,
            amount,
            target: None,
            affected_resources: Vec::new(),
            affected_tags: Vec::new(),
        }
    }
}

/// When a behavior fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Trigger {
    /// Auto (fires on play) or manual (standing action).
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Passive condition; an auto trigger with a condition is evaluated
    /// by the passive layer, never by the immediate pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Trigger {
    /// An unconditioned auto trigger.
    pub const fn auto() -> Self {
        Self {
            kind: TriggerKind::Auto,
            condition: None,
        }
    }

    /// A manual trigger.
    pub const fn manual() -> Self {
        Self {
            kind: TriggerKind::Manual,
            condition: None,
        }
    }
}

/// One alternative input/output set on a behavior with choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Choice {
    /// Resources this choice consumes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ResourceCondition>,
    /// Resources this choice grants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ResourceCondition>,
}

// ---------------------------------------------------------------------------
// Behaviors
// ---------------------------------------------------------------------------

/// One independent effect unit on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CardBehavior {
    /// Ordered triggers gating the behavior.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
    /// Explicit resource costs beyond the card's base cost.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ResourceCondition>,
    /// Resource/production/tile/VP/parameter deltas the behavior grants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ResourceCondition>,
    /// Alternative input/output sets; one is selected by index at play
    /// time when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl CardBehavior {
    /// Whether this behavior applies immediately when the card is played:
    /// its first trigger is `auto` with no condition attached.
    pub fn is_immediate(&self) -> bool {
        self.triggers
            .first()
            .is_some_and(|t| t.kind == TriggerKind::Auto && t.condition.is_none())
    }

    /// Whether any trigger makes this behavior a standing manual action.
    pub fn is_manual(&self) -> bool {
        self.triggers.iter().any(|t| t.kind == TriggerKind::Manual)
    }

    /// Iterate the behavior's inputs plus the selected choice's inputs.
    ///
    /// An out-of-range or absent `choice_index` yields the base inputs
    /// only.
    pub fn inputs_with_choice(
        &self,
        choice_index: Option<usize>,
    ) -> impl Iterator<Item = &ResourceCondition> {
        let chosen = choice_index
            .and_then(|i| self.choices.get(i))
            .map(|c| c.inputs.as_slice())
            .unwrap_or_default();
        self.inputs.iter().chain(chosen.iter())
    }

    /// Iterate the behavior's outputs plus the selected choice's outputs.
    pub fn outputs_with_choice(
        &self,
        choice_index: Option<usize>,
    ) -> impl Iterator<Item = &ResourceCondition> {
        let chosen = choice_index
            .and_then(|i| self.choices.get(i))
            .map(|c| c.outputs.as_slice())
            .unwrap_or_default();
        self.outputs.iter().chain(chosen.iter())
    }
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

/// A play requirement on a card. `min`/`max` are inclusive bounds on the
/// quantity named by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Requirement {
    /// The quantity this requirement constrains.
    #[serde(rename = "type")]
    pub kind: RequirementType,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
    /// For tag requirements: which tag to count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<CardTag>,
    /// For production/resource requirements: which resource to read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceType>,
}

// ---------------------------------------------------------------------------
// Victory points
// ---------------------------------------------------------------------------

/// Counting basis for a `per` victory point condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PerCondition {
    /// Count units of this resource (card storage on the scoring card).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceType>,
    /// Count this tag across the player's cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<CardTag>,
    /// Units required per point awarded (e.g. 1 VP per *2* animals).
    /// Zero or absent means one unit per point.
    #[serde(default)]
    pub amount: u32,
}

/// A victory point condition on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct VictoryPointCondition {
    /// Points awarded (per unit, for `per` conditions).
    pub amount: i32,
    /// How the condition resolves.
    pub condition: VpConditionKind,
    /// Counting basis for `per` conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<PerCondition>,
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A card's ability to hold resources in its own bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStorageSpec {
    /// The resource kind this card stores.
    #[serde(rename = "type")]
    pub resource: ResourceType,
    /// Units present when the card enters play.
    #[serde(default)]
    pub starting: i32,
}

/// A card definition from the card-definition JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Card {
    /// Stable string identifier.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Printed card kind.
    #[serde(rename = "type", default)]
    pub kind: CardKind,
    /// Base cost in megacredits, before discounts.
    #[serde(default)]
    pub cost: u32,
    /// Printed tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<CardTag>,
    /// Play requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<Requirement>,
    /// Independent behaviors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<CardBehavior>,
    /// Victory point conditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vp_conditions: Vec<VictoryPointCondition>,
    /// Card-storage capability, if the card holds resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_storage: Option<ResourceStorageSpec>,
}

impl Card {
    /// Whether the card carries the exact tag given.
    ///
    /// Exact matching only: wild tags count toward requirement *counts*
    /// but never unlock payment currencies.
    pub fn has_tag(&self, tag: &CardTag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether steel is a valid payment currency for this card.
    pub fn allows_steel(&self) -> bool {
        self.has_tag(&CardTag::Building)
    }

    /// Whether titanium is a valid payment currency for this card.
    pub fn allows_titanium(&self) -> bool {
        self.has_tag(&CardTag::Space)
    }

    /// Whether any immediately-triggered behavior carries choices, in
    /// which case playing the card requires a choice index.
    pub fn has_immediate_choices(&self) -> bool {
        self.behaviors
            .iter()
            .any(|b| b.is_immediate() && !b.choices.is_empty())
    }
}
