//! Resource vectors and their floors.
//!
//! A [`ResourceSet`] holds one signed quantity per basic resource and is
//! used both for resource pools and for production vectors. Floors differ
//! between the two uses: every pool floors at 0, and every production
//! value floors at 0 except credits production, which may fall to -5.
//!
//! All mutation goes through checked helpers -- a prospective change that
//! would cross the floor is rejected before anything is written.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::BasicResource;

/// Lowest allowed credits production.
pub const CREDITS_PRODUCTION_FLOOR: i32 = -5;

/// One signed quantity per basic resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceSet {
    /// Megacredits.
    pub credits: i32,
    /// Steel.
    pub steel: i32,
    /// Titanium.
    pub titanium: i32,
    /// Plants.
    pub plants: i32,
    /// Energy.
    pub energy: i32,
    /// Heat.
    pub heat: i32,
}

impl ResourceSet {
    /// An all-zero set.
    pub const ZERO: Self = Self {
        credits: 0,
        steel: 0,
        titanium: 0,
        plants: 0,
        energy: 0,
        heat: 0,
    };

    /// Read the quantity for one resource.
    pub const fn amount(&self, resource: BasicResource) -> i32 {
        match resource {
            BasicResource::Credits => self.credits,
            BasicResource::Steel => self.steel,
            BasicResource::Titanium => self.titanium,
            BasicResource::Plants => self.plants,
            BasicResource::Energy => self.energy,
            BasicResource::Heat => self.heat,
        }
    }

    /// Overwrite the quantity for one resource.
    pub const fn set_amount(&mut self, resource: BasicResource, value: i32) {
        match resource {
            BasicResource::Credits => self.credits = value,
            BasicResource::Steel => self.steel = value,
            BasicResource::Titanium => self.titanium = value,
            BasicResource::Plants => self.plants = value,
            BasicResource::Energy => self.energy = value,
            BasicResource::Heat => self.heat = value,
        }
    }

    /// Add a signed delta to one resource, refusing to cross `floor`.
    ///
    /// Returns the new value, or `None` (leaving `self` untouched) if the
    /// result would fall below the floor.
    pub fn checked_add(
        &mut self,
        resource: BasicResource,
        delta: i32,
        floor: i32,
    ) -> Option<i32> {
        let next = self.amount(resource).saturating_add(delta);
        if next < floor {
            return None;
        }
        self.set_amount(resource, next);
        Some(next)
    }

    /// Apply a whole-set delta against per-resource floors, all-or-nothing.
    ///
    /// Returns the updated set, or `None` (leaving `self` untouched) if
    /// any resource would fall below its floor.
    pub fn checked_apply(
        &mut self,
        delta: &Self,
        floor_for: impl Fn(BasicResource) -> i32,
    ) -> Option<Self> {
        let mut next = *self;
        for resource in BasicResource::ALL {
            next.checked_add(resource, delta.amount(resource), floor_for(resource))?;
        }
        *self = next;
        Some(next)
    }

    /// The floor for a resource pool: nothing goes negative.
    pub const fn pool_floor(_resource: BasicResource) -> i32 {
        0
    }

    /// The floor for a production value: credits may fall to -5, all
    /// other production floors at 0.
    pub const fn production_floor(resource: BasicResource) -> i32 {
        match resource {
            BasicResource::Credits => CREDITS_PRODUCTION_FLOOR,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_applies_within_floor() {
        let mut set = ResourceSet::ZERO;
        assert_eq!(set.checked_add(BasicResource::Steel, 4, 0), Some(4));
        assert_eq!(set.steel, 4);
        assert_eq!(set.checked_add(BasicResource::Steel, -4, 0), Some(0));
        assert_eq!(set.steel, 0);
    }

    #[test]
    fn checked_add_rejects_below_floor_without_mutation() {
        let mut set = ResourceSet {
            plants: 2,
            ..ResourceSet::ZERO
        };
        assert_eq!(set.checked_add(BasicResource::Plants, -3, 0), None);
        assert_eq!(set.plants, 2);
    }

    #[test]
    fn credits_production_may_go_to_minus_five() {
        let mut production = ResourceSet::ZERO;
        assert_eq!(
            production.checked_add(
                BasicResource::Credits,
                -5,
                ResourceSet::production_floor(BasicResource::Credits)
            ),
            Some(-5)
        );
        assert_eq!(
            production.checked_add(
                BasicResource::Credits,
                -1,
                ResourceSet::production_floor(BasicResource::Credits)
            ),
            None
        );
    }

    #[test]
    fn other_production_floors_at_zero() {
        let mut production = ResourceSet {
            energy: 1,
            ..ResourceSet::ZERO
        };
        assert_eq!(
            production.checked_add(
                BasicResource::Energy,
                -2,
                ResourceSet::production_floor(BasicResource::Energy)
            ),
            None
        );
        assert_eq!(production.energy, 1);
    }

    #[test]
    fn checked_apply_is_all_or_nothing() {
        let mut pool = ResourceSet {
            credits: 10,
            plants: 1,
            ..ResourceSet::ZERO
        };
        let delta = ResourceSet {
            credits: -4,
            plants: -2,
            ..ResourceSet::ZERO
        };
        assert_eq!(pool.checked_apply(&delta, ResourceSet::pool_floor), None);
        // Nothing moved, including the affordable credits part.
        assert_eq!(pool.credits, 10);
        assert_eq!(pool.plants, 1);

        let affordable = ResourceSet {
            credits: -4,
            plants: -1,
            ..ResourceSet::ZERO
        };
        assert!(pool.checked_apply(&affordable, ResourceSet::pool_floor).is_some());
        assert_eq!(pool.credits, 6);
        assert_eq!(pool.plants, 0);
    }
}
