//! Derived availability views.
//!
//! Availability is never a stored flag: it is recomputed on demand from
//! a game and player snapshot, and `available()` is always derived from
//! the current error set -- an entity with issues is unavailable, an
//! entity without issues is available, and no third state exists.
//!
//! The command layer calls these before rendering choices to a client;
//! the strict gates at play time remain the requirement validator and
//! the affordability resolver.

use serde::{Deserialize, Serialize};

use tharsis_game::{Game, Player, PlayerAction};
use tharsis_types::{BasicResource, Card, Payment, ResourceSet, StandardProjectKind};

use crate::affordability::{self, behavior_costs, production_deltas};
use crate::catalog::CardLookup;
use crate::requirements;
use crate::standard_projects::StandardProject;

/// What kind of problem makes an entity unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// A play requirement is not met.
    Requirement,
    /// The player cannot cover the cost.
    Cost,
    /// A behavior cost exceeds the player's pools.
    Resource,
    /// A global parameter blocks the action (e.g. already maxed).
    GlobalParameter,
    /// The standing action was already used this generation.
    ActionUsed,
}

/// One reason an entity is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// The category of problem.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

/// The derived availability of one card, project, or action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityResult {
    /// Everything preventing the entity from being used right now.
    pub errors: Vec<ValidationIssue>,
}

impl PlayabilityResult {
    /// Availability is derived from the error set, never stored.
    pub fn available(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an issue.
    pub fn add(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            kind,
            message: message.into(),
        });
    }
}

/// Availability of a standing manual action, including which of its
/// choices are individually affordable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlayability {
    /// The overall result; `available()` derives from its errors.
    pub result: PlayabilityResult,
    /// Indices of affordable choices, when the behavior has choices.
    pub playable_choices: Vec<usize>,
}

/// Compute a card's availability for a player.
///
/// This is an upper-bound view: it checks requirements, whether any
/// combination of the player's currencies could cover the effective
/// cost, and whether the behavior costs and production floors are
/// satisfiable for at least one choice. The exact payment split is
/// validated at play time.
pub fn card_playability(
    card: &Card,
    game: &Game,
    player: &Player,
    lookup: &dyn CardLookup,
) -> PlayabilityResult {
    let mut result = PlayabilityResult::default();

    if let Err(err) = requirements::validate(card, game, player, lookup) {
        result.add(IssueKind::Requirement, err.to_string());
    }

    let cost = affordability::effective_cost(card, player);
    let capacity = payment_capacity(card, player);
    if u64::from(cost) > capacity {
        result.add(
            IssueKind::Cost,
            format!("cannot cover cost {cost} M€, payment capacity is {capacity} M€"),
        );
    }

    // A card with immediate choices is playable if any single choice
    // works; one without is checked directly.
    let choice_count = immediate_choice_count(card);
    if choice_count == 0 {
        if let Some(issue) = behavior_issue(card, player, None) {
            result.errors.push(issue);
        }
    } else if !(0..choice_count).any(|i| behavior_issue(card, player, Some(i)).is_none()) {
        result.add(
            IssueKind::Resource,
            "no choice is affordable with current resources",
        );
    }

    result
}

/// Compute a standard project's availability for a player.
pub fn standard_project_playability(
    project: &StandardProject,
    game: &Game,
    player: &Player,
) -> PlayabilityResult {
    let mut result = PlayabilityResult::default();

    let credits = player.resources().credits;
    if i64::from(project.cost) > i64::from(credits) {
        result.add(
            IssueKind::Cost,
            format!("costs {} M€, player holds {credits} M€", project.cost),
        );
    }

    let card = project.to_card();
    if let Some(issue) = behavior_issue(&card, player, None) {
        result.errors.push(issue);
    }

    match project.kind {
        StandardProjectKind::Asteroid | StandardProjectKind::ConvertHeat => {
            if game.parameters().temperature() >= tharsis_game::global_parameters::MAX_TEMPERATURE {
                result.add(IssueKind::GlobalParameter, "temperature is already at maximum");
            }
        }
        StandardProjectKind::Aquifer => {
            if game.parameters().oceans() >= tharsis_game::global_parameters::MAX_OCEANS {
                result.add(IssueKind::GlobalParameter, "all oceans are already placed");
            }
        }
        _ => {}
    }

    result
}

/// Compute a standing manual action's availability for a player.
pub fn action_playability(action: &PlayerAction, player: &Player) -> ActionPlayability {
    let mut playability = ActionPlayability::default();

    if action.uses_this_generation > 0 {
        playability
            .result
            .add(IssueKind::ActionUsed, "already used this generation");
    }

    // Wrap the single behavior as an immediate card so the shared cost
    // machinery applies; the bucket keeps the source card's identity.
    let card = behavior_card(action);

    if action.behavior.choices.is_empty() {
        if let Some(issue) = behavior_issue(&card, player, None) {
            playability.result.errors.push(issue);
        }
    } else {
        for index in 0..action.behavior.choices.len() {
            if behavior_issue(&card, player, Some(index)).is_none() {
                playability.playable_choices.push(index);
            }
        }
        if playability.playable_choices.is_empty() {
            playability
                .result
                .add(IssueKind::Resource, "no choice is affordable with current resources");
        }
    }

    playability
}

/// Most megacredit value the player could possibly assemble for a card.
fn payment_capacity(card: &Card, player: &Player) -> u64 {
    let resources = player.resources();
    let mut capacity = u64::try_from(resources.credits.max(0)).unwrap_or(0);
    if card.allows_steel() {
        let value = u64::from(player.conversion_value(BasicResource::Steel));
        capacity =
            capacity.saturating_add(u64::try_from(resources.steel.max(0)).unwrap_or(0) * value);
    }
    if card.allows_titanium() {
        let value = u64::from(player.conversion_value(BasicResource::Titanium));
        capacity =
            capacity.saturating_add(u64::try_from(resources.titanium.max(0)).unwrap_or(0) * value);
    }
    for substitute in player.payment_substitutes() {
        let held = u64::try_from(resources.amount(substitute.resource).max(0)).unwrap_or(0);
        capacity = capacity.saturating_add(held.saturating_mul(u64::from(substitute.conversion_rate)));
    }
    capacity
}

/// Check one choice's behavior costs and production floors against the
/// player's current pools, payment interplay aside.
fn behavior_issue(card: &Card, player: &Player, choice: Option<usize>) -> Option<ValidationIssue> {
    let costs = behavior_costs(card, choice);
    let resources = player.resources();
    for resource in BasicResource::ALL {
        let needed = costs.amount(resource);
        if needed > 0 && resources.amount(resource) < needed {
            return Some(ValidationIssue {
                kind: IssueKind::Resource,
                message: format!(
                    "needs {needed} {resource}, player holds {}",
                    resources.amount(resource)
                ),
            });
        }
    }

    let production = player.production();
    let deltas = production_deltas(card, choice);
    for resource in BasicResource::ALL {
        let delta = deltas.amount(resource);
        if delta < 0 {
            let floor = ResourceSet::production_floor(resource);
            if production.amount(resource).saturating_add(delta) < floor {
                return Some(ValidationIssue {
                    kind: IssueKind::Resource,
                    message: format!("{resource} production would fall below {floor}"),
                });
            }
        }
    }
    None
}

/// Number of choices on the first immediate behavior that has any.
fn immediate_choice_count(card: &Card) -> usize {
    card.behaviors
        .iter()
        .find(|b| b.is_immediate() && !b.choices.is_empty())
        .map_or(0, |b| b.choices.len())
}

/// Wrap a manual action's behavior as a one-behavior immediate card so
/// the shared validators can reason about it.
pub(crate) fn behavior_card(action: &PlayerAction) -> Card {
    let mut behavior = action.behavior.clone();
    behavior.triggers = vec![tharsis_types::Trigger::auto()];
    Card {
        id: action.card_id.clone(),
        name: action.card_name.clone(),
        kind: tharsis_types::CardKind::Active,
        cost: 0,
        tags: Vec::new(),
        requirements: Vec::new(),
        behaviors: vec![behavior],
        vp_conditions: Vec::new(),
        resource_storage: None,
    }
}

/// Convenience: validate a full payment the way the play command will.
///
/// Exposed so clients can pre-check a concrete payment split without
/// mutating anything.
pub fn payment_playability(card: &Card, player: &Player, payment: &Payment) -> PlayabilityResult {
    let mut result = PlayabilityResult::default();
    if let Err(err) = affordability::validate_affordability(player, card, payment, None) {
        result.add(IssueKind::Cost, err.to_string());
    }
    result
}
