//! The requirement validator.
//!
//! Checks a card or project's play requirements against current game and
//! player state. Read-only: validation never mutates anything. A card
//! with zero requirements passes without a single state read, and
//! unrecognized requirement types pass as a forward-compatible no-op.

use tracing::debug;

use tharsis_game::{Game, Player};
use tharsis_types::{BasicResource, Card, CardTag, Requirement, RequirementType, ResourceType};

use crate::catalog::CardLookup;

/// A requirement that the current state does not meet.
///
/// Always recoverable: the player simply cannot act, and no state has
/// changed.
#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    /// The named quantity sits below the requirement's minimum.
    #[error("{quantity} is {current}, need at least {required}")]
    BelowMinimum {
        /// What was measured.
        quantity: String,
        /// The inclusive minimum.
        required: i32,
        /// The value observed.
        current: i32,
    },

    /// The named quantity sits above the requirement's maximum.
    #[error("{quantity} is {current}, need at most {required}")]
    AboveMaximum {
        /// What was measured.
        quantity: String,
        /// The inclusive maximum.
        required: i32,
        /// The value observed.
        current: i32,
    },

    /// A tags requirement did not name a tag.
    #[error("tags requirement is missing its tag")]
    MissingTag,

    /// A production or resource requirement did not name a resource.
    #[error("{0} requirement is missing its resource")]
    MissingResource(String),
}

/// Validate every requirement on a card against the current state.
///
/// Returns the first violated requirement, or `Ok(())` when all pass.
pub fn validate(
    card: &Card,
    game: &Game,
    player: &Player,
    lookup: &dyn CardLookup,
) -> Result<(), RequirementError> {
    // Fast path: no requirements, no lookups, no state reads.
    if card.requirements.is_empty() {
        return Ok(());
    }

    debug!(card = %card.id, count = card.requirements.len(), "validating requirements");

    for requirement in &card.requirements {
        check_requirement(requirement, game, player, lookup)?;
    }

    Ok(())
}

/// Check one requirement, dispatching on its type.
fn check_requirement(
    requirement: &Requirement,
    game: &Game,
    player: &Player,
    lookup: &dyn CardLookup,
) -> Result<(), RequirementError> {
    match &requirement.kind {
        RequirementType::Temperature => check_bounds(
            "temperature",
            game.parameters().temperature(),
            requirement,
        ),
        RequirementType::Oxygen => {
            check_bounds("oxygen", game.parameters().oxygen(), requirement)
        }
        RequirementType::Oceans => {
            check_bounds("oceans", game.parameters().oceans(), requirement)
        }
        RequirementType::TerraformRating => check_bounds(
            "terraform rating",
            player.terraform_rating(),
            requirement,
        ),
        RequirementType::Tags => {
            let tag = requirement.tag.as_ref().ok_or(RequirementError::MissingTag)?;
            let count = count_tags(player, tag, lookup);
            check_bounds(&format!("{tag} tag count"), count, requirement)
        }
        RequirementType::Production => {
            let resource = requirement
                .resource
                .as_ref()
                .and_then(production_resource)
                .ok_or_else(|| RequirementError::MissingResource("production".to_owned()))?;
            check_bounds(
                &format!("{resource} production"),
                player.production().amount(resource),
                requirement,
            )
        }
        RequirementType::Resource => {
            let resource = requirement
                .resource
                .as_ref()
                .ok_or_else(|| RequirementError::MissingResource("resource".to_owned()))?;
            let current = resource_amount(player, resource, lookup);
            check_bounds(&format!("{resource} amount"), current, requirement)
        }
        // Forward-compatible no-op for future content.
        RequirementType::Other(kind) => {
            debug!(kind, "unrecognized requirement type, passing");
            Ok(())
        }
    }
}

/// Compare a value against a requirement's inclusive bounds.
fn check_bounds(
    quantity: &str,
    current: i32,
    requirement: &Requirement,
) -> Result<(), RequirementError> {
    if let Some(min) = requirement.min {
        if current < min {
            return Err(RequirementError::BelowMinimum {
                quantity: quantity.to_owned(),
                required: min,
                current,
            });
        }
    }
    if let Some(max) = requirement.max {
        if current > max {
            return Err(RequirementError::AboveMaximum {
                quantity: quantity.to_owned(),
                required: max,
                current,
            });
        }
    }
    Ok(())
}

/// Count a tag across the player's played cards and corporation.
///
/// Wild tags count toward any requested tag. Played cards whose
/// definition is missing from the lookup are skipped.
pub fn count_tags(player: &Player, tag: &CardTag, lookup: &dyn CardLookup) -> i32 {
    let mut count: i32 = 0;
    for card_id in player.played_cards() {
        if let Some(card) = lookup.get(&card_id) {
            count = count.saturating_add(matching_tags(card, tag));
        }
    }
    if let Some(corporation) = player.corporation() {
        if let Some(card) = lookup.get(&corporation) {
            count = count.saturating_add(matching_tags(card, tag));
        }
    }
    count
}

/// Tags on one card matching the requested tag (wild matches anything).
fn matching_tags(card: &Card, tag: &CardTag) -> i32 {
    let mut count: i32 = 0;
    for card_tag in &card.tags {
        if card_tag == tag || *card_tag == CardTag::Wild {
            count = count.saturating_add(1);
        }
    }
    count
}

/// Map a requirement's resource field to a production value. Both the
/// plain and `-production` spellings appear in card data.
fn production_resource(resource: &ResourceType) -> Option<BasicResource> {
    BasicResource::from_production(resource).or_else(|| BasicResource::from_pool(resource))
}

/// Read the quantity a resource requirement names: a basic pool value,
/// or for card-storage types the total stored across the player's cards
/// that hold that resource kind.
fn resource_amount(player: &Player, resource: &ResourceType, lookup: &dyn CardLookup) -> i32 {
    if let Some(basic) = BasicResource::from_pool(resource) {
        return player.resources().amount(basic);
    }
    if resource.is_card_storage() {
        let mut total: i32 = 0;
        for card_id in player.played_cards() {
            let stores_kind = lookup
                .get(&card_id)
                .and_then(|c| c.resource_storage.as_ref())
                .is_some_and(|s| s.resource == *resource);
            if stores_kind {
                total = total.saturating_add(player.storage_amount(&card_id));
            }
        }
        return total;
    }
    0
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tharsis_game::Deck;
    use tharsis_types::{CardId, CardKind, GameId, PlayerId, ResourceSet};

    use super::*;

    /// A lookup that counts how often it is consulted.
    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicUsize,
        cards: Vec<Card>,
    }

    impl CardLookup for CountingLookup {
        fn get(&self, id: &CardId) -> Option<&Card> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.cards.iter().find(|c| c.id == *id)
        }
    }

    fn bare_card(id: &str) -> Card {
        Card {
            id: CardId::from(id),
            name: id.to_owned(),
            kind: CardKind::Automated,
            cost: 0,
            tags: Vec::new(),
            requirements: Vec::new(),
            behaviors: Vec::new(),
            vp_conditions: Vec::new(),
            resource_storage: None,
        }
    }

    fn requirement(kind: RequirementType, min: Option<i32>, max: Option<i32>) -> Requirement {
        Requirement {
            kind,
            min,
            max,
            tag: None,
            resource: None,
        }
    }

    fn setup() -> (Game, std::sync::Arc<Player>) {
        let game = Game::new(GameId::new(), Deck::default());
        let player = game.add_player(PlayerId::new(), "Aria");
        (game, player)
    }

    #[test]
    fn zero_requirements_pass_with_zero_lookups() {
        let (game, player) = setup();
        let lookup = CountingLookup::default();
        let card = bare_card("solar-wind");
        assert!(validate(&card, &game, &player, &lookup).is_ok());
        assert_eq!(lookup.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn temperature_minimum_enforced() {
        let (game, player) = setup();
        let lookup = CountingLookup::default();
        let mut card = bare_card("lichen");
        card.requirements
            .push(requirement(RequirementType::Temperature, Some(-24), None));

        let result = validate(&card, &game, &player, &lookup);
        assert!(matches!(
            result,
            Err(RequirementError::BelowMinimum { required: -24, current: -30, .. })
        ));

        assert_eq!(game.parameters().increase_temperature(6), 3);
        assert!(validate(&card, &game, &player, &lookup).is_ok());
    }

    #[test]
    fn maximum_bound_enforced() {
        let (game, player) = setup();
        let lookup = CountingLookup::default();
        let mut card = bare_card("early-settlement");
        card.requirements
            .push(requirement(RequirementType::Oxygen, None, Some(5)));
        assert!(validate(&card, &game, &player, &lookup).is_ok());
        game.parameters().increase_oxygen(6);
        assert!(matches!(
            validate(&card, &game, &player, &lookup),
            Err(RequirementError::AboveMaximum { required: 5, current: 6, .. })
        ));
    }

    #[test]
    fn tag_counting_includes_corporation_and_wild() {
        let (game, player) = setup();

        let mut played = bare_card("research-outpost");
        played.tags = vec![CardTag::Science, CardTag::Wild];
        let mut corp = bare_card("thorgate");
        corp.tags = vec![CardTag::Science];
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            cards: vec![played, corp],
        };

        player.push_played_card(CardId::from("research-outpost"));
        player.set_corporation(CardId::from("thorgate"));

        // science + wild on the played card, science on the corporation.
        assert_eq!(count_tags(&player, &CardTag::Science, &lookup), 3);

        let mut card = bare_card("gene-repair");
        card.requirements.push(Requirement {
            kind: RequirementType::Tags,
            min: Some(3),
            max: None,
            tag: Some(CardTag::Science),
            resource: None,
        });
        assert!(validate(&card, &game, &player, &lookup).is_ok());
    }

    #[test]
    fn production_requirement_reads_player_production() {
        let (game, player) = setup();
        let lookup = CountingLookup::default();
        player.set_production(ResourceSet {
            energy: 2,
            ..ResourceSet::ZERO
        });

        let mut card = bare_card("energy-hog");
        card.requirements.push(Requirement {
            kind: RequirementType::Production,
            min: Some(3),
            max: None,
            tag: None,
            resource: Some(ResourceType::EnergyProduction),
        });
        assert!(matches!(
            validate(&card, &game, &player, &lookup),
            Err(RequirementError::BelowMinimum { required: 3, current: 2, .. })
        ));
    }

    #[test]
    fn unknown_requirement_type_passes() {
        let (game, player) = setup();
        let lookup = CountingLookup::default();
        let mut card = bare_card("venus-probe");
        card.requirements
            .push(requirement(RequirementType::Other("venus".to_owned()), Some(10), None));
        assert!(validate(&card, &game, &player, &lookup).is_ok());
    }

    #[test]
    fn storage_resource_requirement_sums_matching_buckets() {
        let (game, player) = setup();

        let mut fish = bare_card("fish");
        fish.resource_storage = Some(tharsis_types::ResourceStorageSpec {
            resource: ResourceType::Animals,
            starting: 0,
        });
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            cards: vec![fish],
        };

        player.push_played_card(CardId::from("fish"));
        let _ = player.add_to_storage(&CardId::from("fish"), 2);

        let mut card = bare_card("predators");
        card.requirements.push(Requirement {
            kind: RequirementType::Resource,
            min: Some(2),
            max: None,
            tag: None,
            resource: Some(ResourceType::Animals),
        });
        assert!(validate(&card, &game, &player, &lookup).is_ok());
    }
}
