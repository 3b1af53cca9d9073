//! The atomic play-a-card and invoke-an-action commands.
//!
//! Orchestration order is strict: every check (ownership, choice
//! validity, requirements, affordability) runs before the first
//! mutation, so a rejected command leaves game state byte-for-byte
//! unchanged. Only then are the payment deducted, the card moved from
//! hand to played, its storage bucket initialized, and the effect
//! pipeline applied.

use tracing::info;

use tharsis_game::{Game, GameError, Player};
use tharsis_types::{BasicResource, Card, CardId, Payment, ResourceSet, StandardProjectKind};

use crate::affordability::{self, AffordabilityError};
use crate::catalog::CardLookup;
use crate::effects::{self, EffectError};
use crate::playability;
use crate::requirements::{self, RequirementError};

/// A rejected or failed play command.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    /// The card ID has no definition in the catalog.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// The card's immediate behaviors carry choices but no choice index
    /// was provided.
    #[error("card has choices but no choice index was provided")]
    ChoiceRequired,

    /// The provided choice index is out of range.
    #[error("choice index {index} out of range ({available} choices)")]
    InvalidChoice {
        /// The rejected index.
        index: usize,
        /// How many choices exist.
        available: usize,
    },

    /// The standing action was already used this generation.
    #[error("action already used this generation")]
    ActionAlreadyUsed,

    /// No standing action exists at the given index.
    #[error("no standing action at index {0}")]
    ActionNotFound(usize),

    /// No such standard project.
    #[error("unknown standard project: {0:?}")]
    UnknownStandardProject(StandardProjectKind),

    /// Sell patents requires the list of cards to discard.
    #[error("sell patents requires the cards to sell")]
    SellPatentsNeedsCards,

    /// A play requirement is not met.
    #[error("requirement not met: {0}")]
    Requirement(#[from] RequirementError),

    /// The payment or behavior costs cannot be covered.
    #[error("cannot afford to play card: {0}")]
    Affordability(#[from] AffordabilityError),

    /// The effect pipeline failed.
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// An entity operation failed.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Play a card from the player's hand.
///
/// `choice_index` selects among immediate behavior choices;
/// `storage_target` receives `any-card` storage outputs.
pub fn play_card(
    game: &Game,
    player: &Player,
    card_id: &CardId,
    payment: &Payment,
    choice_index: Option<usize>,
    storage_target: Option<&CardId>,
    lookup: &dyn CardLookup,
) -> Result<(), PlayError> {
    let card = lookup
        .get(card_id)
        .ok_or_else(|| PlayError::CardNotFound(card_id.clone()))?;

    if !player.holds(card_id) {
        return Err(PlayError::Game(GameError::CardNotInHand {
            card: card_id.clone(),
        }));
    }

    validate_choice_index(card, choice_index)?;
    requirements::validate(card, game, player, lookup)?;
    affordability::validate_affordability(player, card, payment, choice_index)?;

    // All checks passed; mutation begins here.
    deduct_payment(player, payment)?;
    player.remove_from_hand(card_id)?;
    player.push_played_card(card_id.clone());
    if let Some(storage) = &card.resource_storage {
        player.init_storage(card_id.clone(), storage.starting);
    }
    effects::apply_card_effects(game, player, card, choice_index, storage_target)?;

    info!(card = %card_id, player = %player.id(), "card played");
    Ok(())
}

/// Invoke a standing manual action by its index in the player's action
/// list. The action's behavior resolves its own choices here, not at
/// card play time.
pub fn invoke_card_action(
    game: &Game,
    player: &Player,
    action_index: usize,
    choice_index: Option<usize>,
    storage_target: Option<&CardId>,
) -> Result<(), PlayError> {
    let actions = player.actions();
    let action = actions
        .get(action_index)
        .ok_or(PlayError::ActionNotFound(action_index))?;

    if action.uses_this_generation > 0 {
        return Err(PlayError::ActionAlreadyUsed);
    }

    // The behavior re-enters the shared machinery as a free immediate
    // card whose ID keeps pointing at the granting card's bucket.
    let card = playability::behavior_card(action);
    validate_choice_index(&card, choice_index)?;
    affordability::validate_affordability(player, &card, &Payment::default(), choice_index)?;

    effects::apply_card_effects(game, player, &card, choice_index, storage_target)?;
    player.mark_action_used(action_index);

    info!(
        card = %action.card_id,
        behavior = action.behavior_index,
        player = %player.id(),
        "card action invoked"
    );
    Ok(())
}

/// Require a valid choice index when (and only when) the card's
/// immediate behaviors carry choices.
fn validate_choice_index(card: &Card, choice_index: Option<usize>) -> Result<(), PlayError> {
    let available = card
        .behaviors
        .iter()
        .find(|b| b.is_immediate() && !b.choices.is_empty())
        .map(|b| b.choices.len());
    let Some(available) = available else {
        return Ok(());
    };
    match choice_index {
        None => Err(PlayError::ChoiceRequired),
        Some(index) if index >= available => Err(PlayError::InvalidChoice { index, available }),
        Some(_) => Ok(()),
    }
}

/// Deduct a validated payment from the player's pools.
pub(crate) fn deduct_payment(player: &Player, payment: &Payment) -> Result<(), PlayError> {
    let mut delta = ResourceSet::ZERO;
    for resource in BasicResource::ALL {
        let committed = i32::try_from(payment.committed(resource)).unwrap_or(i32::MAX);
        delta.set_amount(resource, committed.saturating_neg());
    }
    if delta != ResourceSet::ZERO {
        player.apply_resource_delta(&delta)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tharsis_game::Deck;
    use tharsis_types::{GameId, PlayerId};

    use super::*;
    use crate::catalog::CardCatalog;

    const CATALOG: &str = r#"[
        {"id": "sponsors", "name": "Sponsors", "type": "automated", "cost": 6,
         "tags": ["earth"],
         "behaviors": [{"triggers": [{"type": "auto"}],
                        "outputs": [{"type": "credits-production", "amount": 2}]}]},
        {"id": "symbionts", "name": "Symbionts", "type": "active", "cost": 4,
         "behaviors": [{"triggers": [{"type": "auto"}],
                        "choices": [
                          {"outputs": [{"type": "plants", "amount": 2}]},
                          {"outputs": [{"type": "microbes", "amount": 1, "target": "self-card"}]}
                        ]}],
         "resourceStorage": {"type": "microbes", "starting": 1}},
        {"id": "nitrite-eaters", "name": "Nitrite Eaters", "type": "active", "cost": 3,
         "behaviors": [{"triggers": [{"type": "manual"}],
                        "inputs": [{"type": "microbes", "amount": 2}],
                        "outputs": [{"type": "oxygen", "amount": 1}]}],
         "resourceStorage": {"type": "microbes", "starting": 2}}
    ]"#;

    fn setup(credits: i32) -> (Game, std::sync::Arc<Player>, CardCatalog) {
        let game = Game::new(GameId::new(), Deck::default());
        let player = game.add_player(PlayerId::new(), "Aria");
        player.set_resources(tharsis_types::ResourceSet {
            credits,
            ..tharsis_types::ResourceSet::ZERO
        });
        let catalog = CardCatalog::from_json(CATALOG).unwrap_or_default();
        (game, player, catalog)
    }

    #[test]
    fn plays_a_card_end_to_end() {
        let (game, player, catalog) = setup(10);
        player.add_to_hand([CardId::from("sponsors")]);

        let result = play_card(
            &game,
            &player,
            &CardId::from("sponsors"),
            &Payment::credits(6),
            None,
            None,
            &catalog,
        );
        assert!(result.is_ok());
        assert_eq!(player.resources().credits, 4);
        assert_eq!(player.production().credits, 2);
        assert!(player.hand().is_empty());
        assert!(player.has_played(&CardId::from("sponsors")));
    }

    #[test]
    fn rejected_command_changes_nothing() {
        let (game, player, catalog) = setup(3);
        player.add_to_hand([CardId::from("sponsors")]);

        let result = play_card(
            &game,
            &player,
            &CardId::from("sponsors"),
            &Payment::credits(3),
            None,
            None,
            &catalog,
        );
        assert!(matches!(result, Err(PlayError::Affordability(_))));
        assert_eq!(player.resources().credits, 3);
        assert_eq!(player.hand().len(), 1);
        assert!(player.played_cards().is_empty());
        assert_eq!(player.production().credits, 0);
    }

    #[test]
    fn card_must_be_in_hand() {
        let (game, player, catalog) = setup(10);
        let result = play_card(
            &game,
            &player,
            &CardId::from("sponsors"),
            &Payment::credits(6),
            None,
            None,
            &catalog,
        );
        assert!(matches!(
            result,
            Err(PlayError::Game(GameError::CardNotInHand { .. }))
        ));
    }

    #[test]
    fn unknown_card_is_rejected() {
        let (game, player, catalog) = setup(10);
        let result = play_card(
            &game,
            &player,
            &CardId::from("ghost"),
            &Payment::default(),
            None,
            None,
            &catalog,
        );
        assert!(matches!(result, Err(PlayError::CardNotFound(_))));
    }

    #[test]
    fn choice_cards_demand_a_valid_index() {
        let (game, player, catalog) = setup(10);
        player.add_to_hand([CardId::from("symbionts")]);

        let missing = play_card(
            &game,
            &player,
            &CardId::from("symbionts"),
            &Payment::credits(4),
            None,
            None,
            &catalog,
        );
        assert!(matches!(missing, Err(PlayError::ChoiceRequired)));

        let out_of_range = play_card(
            &game,
            &player,
            &CardId::from("symbionts"),
            &Payment::credits(4),
            Some(5),
            None,
            &catalog,
        );
        assert!(matches!(
            out_of_range,
            Err(PlayError::InvalidChoice { index: 5, available: 2 })
        ));

        let ok = play_card(
            &game,
            &player,
            &CardId::from("symbionts"),
            &Payment::credits(4),
            Some(0),
            None,
            &catalog,
        );
        assert!(ok.is_ok());
        assert_eq!(player.resources().plants, 2);
    }

    #[test]
    fn storage_starting_amount_is_initialized() {
        let (game, player, catalog) = setup(10);
        player.add_to_hand([CardId::from("symbionts")]);
        let _ = play_card(
            &game,
            &player,
            &CardId::from("symbionts"),
            &Payment::credits(4),
            Some(1),
            None,
            &catalog,
        );
        // Starting 1 from the storage spec plus 1 from the chosen output.
        assert_eq!(player.storage_amount(&CardId::from("symbionts")), 2);
    }

    #[test]
    fn manual_action_invocation_spends_storage_and_raises_oxygen() {
        let (game, player, catalog) = setup(10);
        player.add_to_hand([CardId::from("nitrite-eaters")]);
        let played = play_card(
            &game,
            &player,
            &CardId::from("nitrite-eaters"),
            &Payment::credits(3),
            None,
            None,
            &catalog,
        );
        assert!(played.is_ok());
        assert_eq!(player.actions().len(), 1);
        assert_eq!(player.storage_amount(&CardId::from("nitrite-eaters")), 2);

        let before_tr = player.terraform_rating();
        assert!(invoke_card_action(&game, &player, 0, None, None).is_ok());
        assert_eq!(player.storage_amount(&CardId::from("nitrite-eaters")), 0);
        assert_eq!(game.parameters().oxygen(), 1);
        assert_eq!(player.terraform_rating(), before_tr.saturating_add(1));

        // One use per generation.
        assert!(matches!(
            invoke_card_action(&game, &player, 0, None, None),
            Err(PlayError::ActionAlreadyUsed)
        ));
        game.begin_generation();
        // Storage is exhausted now, so the action fails affordability.
        assert!(matches!(
            invoke_card_action(&game, &player, 0, None, None),
            Err(PlayError::Affordability(
                AffordabilityError::InsufficientStorage { .. }
            ))
        ));
    }
}
