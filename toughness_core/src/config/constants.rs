//! Tunable combat constants

use serde::{Deserialize, Serialize};

/// Pipeline tunables, loaded from the `[combat]` config table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Multiplier assumed to be baked into critical hits (1.5 = 150%)
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f32,
    /// Flat damage each strength stack adds to a hit
    #[serde(default = "default_strength_bonus")]
    pub strength_bonus_per_stack: f32,
    /// Lower bound of chip damage from non-qualifying weapons
    #[serde(default = "default_chip_min")]
    pub chip_min: f32,
    /// Upper bound of chip damage from non-qualifying weapons
    #[serde(default = "default_chip_max")]
    pub chip_max: f32,
    /// Share of base damage that reaches health while toughness holds
    #[serde(default = "default_absorbed_ratio")]
    pub absorbed_health_ratio: f32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            crit_multiplier: default_crit_multiplier(),
            strength_bonus_per_stack: default_strength_bonus(),
            chip_min: default_chip_min(),
            chip_max: default_chip_max(),
            absorbed_health_ratio: default_absorbed_ratio(),
        }
    }
}

impl CombatConstants {
    /// Describe the first invalid value, if any
    pub fn validate(&self) -> Result<(), String> {
        if !(self.crit_multiplier.is_finite() && self.crit_multiplier > 0.0) {
            return Err(format!(
                "crit_multiplier must be positive, got {}",
                self.crit_multiplier
            ));
        }
        if !(self.strength_bonus_per_stack.is_finite() && self.strength_bonus_per_stack >= 0.0) {
            return Err(format!(
                "strength_bonus_per_stack must be non-negative, got {}",
                self.strength_bonus_per_stack
            ));
        }
        if !(self.chip_min.is_finite() && self.chip_max.is_finite())
            || self.chip_min < 0.0
            || self.chip_min > self.chip_max
        {
            return Err(format!(
                "chip range must satisfy 0 <= chip_min <= chip_max, got {}..{}",
                self.chip_min, self.chip_max
            ));
        }
        if !(0.0..=1.0).contains(&self.absorbed_health_ratio) {
            return Err(format!(
                "absorbed_health_ratio must lie in [0, 1], got {}",
                self.absorbed_health_ratio
            ));
        }
        Ok(())
    }
}

fn default_crit_multiplier() -> f32 {
    1.5
}
fn default_strength_bonus() -> f32 {
    3.0
}
fn default_chip_min() -> f32 {
    0.02
}
fn default_chip_max() -> f32 {
    0.05
}
fn default_absorbed_ratio() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.crit_multiplier - 1.5).abs() < f32::EPSILON);
        assert!((constants.strength_bonus_per_stack - 3.0).abs() < f32::EPSILON);
        assert!((constants.absorbed_health_ratio - 0.5).abs() < f32::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let constants: CombatConstants = toml::from_str("chip_max = 0.1").unwrap();
        assert!((constants.chip_max - 0.1).abs() < f32::EPSILON);
        assert!((constants.chip_min - 0.02).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_chip_range() {
        let constants = CombatConstants {
            chip_min: 0.5,
            chip_max: 0.1,
            ..Default::default()
        };
        assert!(constants.validate().is_err());
    }
}
