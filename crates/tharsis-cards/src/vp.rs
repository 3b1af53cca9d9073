//! On-demand victory point calculation.
//!
//! Fixed VP conditions are awarded by the effect pipeline when a card is
//! played. `per` conditions are never applied immediately; this module
//! recomputes them as a pure function of the current snapshot, so they
//! can be evaluated at final scoring (or any time a client wants a
//! projection) without ever double-counting.

use tharsis_game::Player;
use tharsis_types::{Card, VpConditionKind};

use crate::catalog::CardLookup;
use crate::requirements;

/// Victory points a card's `per` conditions are currently worth for a
/// player: per stored unit on the card itself, or per counted tag.
pub fn per_condition_vp(card: &Card, player: &Player, lookup: &dyn CardLookup) -> i32 {
    let mut total: i32 = 0;
    for condition in &card.vp_conditions {
        if condition.condition != VpConditionKind::Per {
            continue;
        }
        let Some(per) = &condition.per else { continue };

        let count: i32 = if per.resource.as_ref().is_some_and(|r| r.is_card_storage()) {
            player.storage_amount(&card.id)
        } else if let Some(tag) = &per.tag {
            requirements::count_tags(player, tag, lookup)
        } else {
            0
        };

        let divisor = i32::try_from(per.amount.max(1)).unwrap_or(1);
        total = total.saturating_add(condition.amount.saturating_mul(count / divisor));
    }
    total
}

/// A player's full score: banked victory points (fixed awards and any
/// event-sourced awards), terraform rating, and the current value of
/// every played card's `per` conditions.
pub fn final_score(player: &Player, lookup: &dyn CardLookup) -> i32 {
    let mut score = player.victory_points().saturating_add(player.terraform_rating());
    for card_id in player.played_cards() {
        if let Some(card) = lookup.get(&card_id) {
            score = score.saturating_add(per_condition_vp(card, player, lookup));
        }
    }
    score
}
