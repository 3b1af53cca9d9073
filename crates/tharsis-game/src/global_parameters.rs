//! Terraforming parameter state with clamped step arithmetic.
//!
//! The three global parameters move only in their defined step sizes and
//! are clamped into range. A change that would overshoot a bound is
//! silently truncated to the bound, and every `increase_*` method returns
//! the number of *actual* post-clamp steps so callers can award exactly
//! that much terraform rating -- a delta that clamps to zero net change
//! is a no-op worth nothing.

use std::sync::RwLock;

use tracing::debug;

use crate::sync;

/// Lowest temperature, in degrees Celsius.
pub const MIN_TEMPERATURE: i32 = -30;
/// Highest temperature, in degrees Celsius.
pub const MAX_TEMPERATURE: i32 = 8;
/// Degrees per temperature step.
pub const TEMPERATURE_STEP: i32 = 2;
/// Lowest oxygen, in percent.
pub const MIN_OXYGEN: i32 = 0;
/// Highest oxygen, in percent.
pub const MAX_OXYGEN: i32 = 14;
/// Lowest ocean count.
pub const MIN_OCEANS: i32 = 0;
/// Highest ocean count.
pub const MAX_OCEANS: i32 = 9;

/// The raw parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Values {
    temperature: i32,
    oxygen: i32,
    oceans: i32,
}

/// Terraforming progress for one game.
#[derive(Debug)]
pub struct GlobalParameters {
    values: RwLock<Values>,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalParameters {
    /// Parameters at their starting floor (-30 degrees, 0%, 0 oceans).
    pub fn new() -> Self {
        Self {
            values: RwLock::new(Values {
                temperature: MIN_TEMPERATURE,
                oxygen: MIN_OXYGEN,
                oceans: MIN_OCEANS,
            }),
        }
    }

    /// Parameters at specific values, clamped into range (for replay
    /// and tests).
    pub fn with_values(temperature: i32, oxygen: i32, oceans: i32) -> Self {
        Self {
            values: RwLock::new(Values {
                temperature: temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE),
                oxygen: oxygen.clamp(MIN_OXYGEN, MAX_OXYGEN),
                oceans: oceans.clamp(MIN_OCEANS, MAX_OCEANS),
            }),
        }
    }

    /// Current temperature in degrees Celsius.
    pub fn temperature(&self) -> i32 {
        sync::read(&self.values).temperature
    }

    /// Current oxygen in percent.
    pub fn oxygen(&self) -> i32 {
        sync::read(&self.values).oxygen
    }

    /// Current ocean count.
    pub fn oceans(&self) -> i32 {
        sync::read(&self.values).oceans
    }

    /// Whether every parameter has reached its maximum.
    pub fn is_maxed(&self) -> bool {
        let values = sync::read(&self.values);
        values.temperature >= MAX_TEMPERATURE
            && values.oxygen >= MAX_OXYGEN
            && values.oceans >= MAX_OCEANS
    }

    /// Apply a signed temperature delta in degrees, clamped into range.
    ///
    /// Returns the number of actual 2-degree steps moved after clamping
    /// (negative when the temperature fell). Terraform rating is awarded
    /// by the caller for positive steps only.
    pub fn increase_temperature(&self, delta_degrees: i32) -> i32 {
        let mut values = sync::write(&self.values);
        let old = values.temperature;
        let new = old
            .saturating_add(delta_degrees)
            .clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        values.temperature = new;
        let steps = new.saturating_sub(old) / TEMPERATURE_STEP;
        debug!(old, new, requested = delta_degrees, steps, "temperature changed");
        steps
    }

    /// Apply a signed oxygen delta in percent, clamped into range.
    ///
    /// Returns the actual post-clamp change (one step per percent).
    pub fn increase_oxygen(&self, delta: i32) -> i32 {
        let mut values = sync::write(&self.values);
        let old = values.oxygen;
        let new = old.saturating_add(delta).clamp(MIN_OXYGEN, MAX_OXYGEN);
        values.oxygen = new;
        let steps = new.saturating_sub(old);
        debug!(old, new, requested = delta, steps, "oxygen changed");
        steps
    }

    /// Apply a signed ocean-count delta, clamped into range.
    ///
    /// Returns the actual post-clamp change (one step per ocean).
    pub fn increase_oceans(&self, delta: i32) -> i32 {
        let mut values = sync::write(&self.values);
        let old = values.oceans;
        let new = old.saturating_add(delta).clamp(MIN_OCEANS, MAX_OCEANS);
        values.oceans = new;
        let steps = new.saturating_sub(old);
        debug!(old, new, requested = delta, steps, "oceans changed");
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_floor() {
        let params = GlobalParameters::new();
        assert_eq!(params.temperature(), MIN_TEMPERATURE);
        assert_eq!(params.oxygen(), MIN_OXYGEN);
        assert_eq!(params.oceans(), MIN_OCEANS);
        assert!(!params.is_maxed());
    }

    #[test]
    fn temperature_steps_are_two_degrees() {
        let params = GlobalParameters::new();
        assert_eq!(params.increase_temperature(4), 2);
        assert_eq!(params.temperature(), -26);
    }

    #[test]
    fn temperature_clamps_at_max_and_reports_actual_steps() {
        let params = GlobalParameters::with_values(6, 0, 0);
        // One step of headroom; a 2-degree raise lands exactly on max.
        assert_eq!(params.increase_temperature(2), 1);
        assert_eq!(params.temperature(), MAX_TEMPERATURE);
        // Raising an already-maxed parameter is a no-op worth zero steps.
        assert_eq!(params.increase_temperature(2), 0);
        assert_eq!(params.temperature(), MAX_TEMPERATURE);
    }

    #[test]
    fn overshooting_delta_truncates_to_bound() {
        let params = GlobalParameters::with_values(4, 0, 0);
        // Requested 3 steps, only 2 fit below the bound.
        assert_eq!(params.increase_temperature(6), 2);
        assert_eq!(params.temperature(), MAX_TEMPERATURE);
    }

    #[test]
    fn oxygen_and_oceans_single_unit_steps() {
        let params = GlobalParameters::with_values(MIN_TEMPERATURE, 13, 8);
        assert_eq!(params.increase_oxygen(3), 1);
        assert_eq!(params.oxygen(), MAX_OXYGEN);
        assert_eq!(params.increase_oceans(1), 1);
        assert_eq!(params.oceans(), MAX_OCEANS);
        assert_eq!(params.increase_oceans(1), 0);
    }

    #[test]
    fn negative_deltas_clamp_at_floor() {
        let params = GlobalParameters::with_values(-28, 1, 0);
        assert_eq!(params.increase_temperature(-6), -1);
        assert_eq!(params.temperature(), MIN_TEMPERATURE);
        assert_eq!(params.increase_oxygen(-4), -1);
        assert_eq!(params.oxygen(), MIN_OXYGEN);
    }

    #[test]
    fn maxed_detection() {
        let params = GlobalParameters::with_values(MAX_TEMPERATURE, MAX_OXYGEN, MAX_OCEANS);
        assert!(params.is_maxed());
    }
}
