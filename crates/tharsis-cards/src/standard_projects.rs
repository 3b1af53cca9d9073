//! Standard projects, expressed through the behavior machine.
//!
//! Every standard project is a fixed cost plus a [`CardBehavior`], so
//! the same affordability and effect machinery that interprets cards
//! interprets these. Selling patents is the one special case (the
//! player chooses how many cards to discard) and gets its own entry
//! point.

use tracing::info;

use tharsis_game::{Game, Player};
use tharsis_types::{
    Card, CardBehavior, CardId, CardKind, Payment, ResourceCondition, ResourceType,
    StandardProjectKind, Trigger,
};

use crate::affordability;
use crate::effects;
use crate::play::PlayError;

/// Megacredits gained per card sold with the sell-patents project.
pub const SELL_PATENT_VALUE: i32 = 1;

/// One standard project definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardProject {
    /// Which project this is.
    pub kind: StandardProjectKind,
    /// Display name.
    pub name: &'static str,
    /// Credit cost (conversions cost resources via behavior inputs
    /// instead).
    pub cost: u32,
    /// The effect applied on purchase.
    pub behavior: CardBehavior,
}

impl StandardProject {
    /// Wrap the project as a one-behavior card so the shared machinery
    /// can validate and apply it.
    pub fn to_card(&self) -> Card {
        Card {
            id: CardId::from(format!("standard-project/{}", self.name)),
            name: self.name.to_owned(),
            kind: CardKind::Automated,
            cost: self.cost,
            tags: Vec::new(),
            requirements: Vec::new(),
            behaviors: vec![self.behavior.clone()],
            vp_conditions: Vec::new(),
            resource_storage: None,
        }
    }
}

/// The eight standard projects, in rulebook order.
pub fn standard_projects() -> Vec<StandardProject> {
    let auto = |inputs: Vec<ResourceCondition>, outputs: Vec<ResourceCondition>| CardBehavior {
        triggers: vec![Trigger::auto()],
        inputs,
        outputs,
        choices: Vec::new(),
    };

    vec![
        StandardProject {
            kind: StandardProjectKind::SellPatents,
            name: "Sell Patents",
            cost: 0,
            behavior: CardBehavior::default(),
        },
        StandardProject {
            kind: StandardProjectKind::PowerPlant,
            name: "Power Plant",
            cost: 11,
            behavior: auto(
                Vec::new(),
                vec![ResourceCondition::new(ResourceType::EnergyProduction, 1)],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::Asteroid,
            name: "Asteroid",
            cost: 14,
            behavior: auto(
                Vec::new(),
                vec![ResourceCondition::new(ResourceType::Temperature, 2)],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::Aquifer,
            name: "Aquifer",
            cost: 18,
            behavior: auto(
                Vec::new(),
                vec![ResourceCondition::new(ResourceType::OceanPlacement, 1)],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::Greenery,
            name: "Greenery",
            cost: 23,
            behavior: auto(
                Vec::new(),
                vec![ResourceCondition::new(ResourceType::GreeneryPlacement, 1)],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::City,
            name: "City",
            cost: 25,
            behavior: auto(
                Vec::new(),
                vec![
                    ResourceCondition::new(ResourceType::CityPlacement, 1),
                    ResourceCondition::new(ResourceType::CreditsProduction, 1),
                ],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::ConvertPlants,
            name: "Convert Plants",
            cost: 0,
            behavior: auto(
                vec![ResourceCondition::new(ResourceType::Plants, 8)],
                vec![ResourceCondition::new(ResourceType::GreeneryPlacement, 1)],
            ),
        },
        StandardProject {
            kind: StandardProjectKind::ConvertHeat,
            name: "Convert Heat",
            cost: 0,
            behavior: auto(
                vec![ResourceCondition::new(ResourceType::Heat, 8)],
                vec![ResourceCondition::new(ResourceType::Temperature, 2)],
            ),
        },
    ]
}

/// Look up one standard project definition.
pub fn standard_project(kind: StandardProjectKind) -> Option<StandardProject> {
    standard_projects().into_iter().find(|p| p.kind == kind)
}

/// Run a standard project for a player: validate affordability, pay the
/// credit cost, and apply the behavior.
///
/// Sell patents goes through [`sell_patents`] instead, since it needs
/// the list of cards to discard.
pub fn execute_standard_project(
    game: &Game,
    player: &Player,
    kind: StandardProjectKind,
) -> Result<(), PlayError> {
    let Some(project) = standard_project(kind) else {
        return Err(PlayError::UnknownStandardProject(kind));
    };
    if project.kind == StandardProjectKind::SellPatents {
        return Err(PlayError::SellPatentsNeedsCards);
    }

    let card = project.to_card();
    let payment = Payment::credits(project.cost);
    affordability::validate_affordability(player, &card, &payment, None)?;

    crate::play::deduct_payment(player, &payment)?;
    effects::apply_card_effects(game, player, &card, None, None)?;

    info!(project = project.name, player = %player.id(), "standard project executed");
    Ok(())
}

/// Sell patents: discard the given cards from hand for 1 M€ each.
pub fn sell_patents(game: &Game, player: &Player, cards: &[CardId]) -> Result<(), PlayError> {
    // Ownership is checked for the whole batch before anything moves.
    for card in cards {
        if !player.holds(card) {
            return Err(PlayError::Game(tharsis_game::GameError::CardNotInHand {
                card: card.clone(),
            }));
        }
    }

    for card in cards {
        player.remove_from_hand(card)?;
    }
    game.deck().discard(cards.iter().cloned());

    let proceeds = i32::try_from(cards.len()).unwrap_or(i32::MAX).saturating_mul(SELL_PATENT_VALUE);
    player.apply_resource_delta(&tharsis_types::ResourceSet {
        credits: proceeds,
        ..tharsis_types::ResourceSet::ZERO
    })?;

    info!(player = %player.id(), sold = cards.len(), proceeds, "patents sold");
    Ok(())
}
