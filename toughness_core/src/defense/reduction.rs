//! Reduction policy - Defense to toughness-damage percentage
//!
//! Defense is normalized against [`DEFENSE_CAP`] and used to interpolate
//! between the configured minimum and maximum percentages:
//!
//! `pct = min + (max - min) * clamp(defense / DEFENSE_CAP, 0, 1)`
//!
//! Examples (min 0.10, max 0.35):
//! - 0 defense: 10% of base damage reaches toughness
//! - 10 defense: 22.5%
//! - 20+ defense: 35%

use super::constants::{DEFAULT_MAX_PCT, DEFAULT_MIN_PCT, DEFENSE_CAP};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid reduction bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("reduction bounds must lie in [0, 1], got min={min} max={max}")]
    OutOfRange { min: f32, max: f32 },
    #[error("minimum reduction {min} exceeds maximum {max}")]
    Inverted { min: f32, max: f32 },
}

/// Calculate the share of base damage that reaches toughness
///
/// Pure function. Missing or non-finite defense counts as 0, and the result
/// is clamped to `[min_pct, max_pct]` whatever `defense` is.
pub fn reduction_pct(defense: f32, min_pct: f32, max_pct: f32) -> f32 {
    let defense = match defense {
        d if d.is_finite() => d,
        d if d > 0.0 => DEFENSE_CAP,
        _ => 0.0,
    };
    let t = (defense / DEFENSE_CAP).clamp(0.0, 1.0);
    let pct = min_pct + (max_pct - min_pct) * t;
    pct.clamp(min_pct, max_pct)
}

/// Validated `[min_pct, max_pct]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionPolicy {
    min_pct: f32,
    max_pct: f32,
}

impl ReductionPolicy {
    /// Create a policy, rejecting bounds outside `[0, 1]` or `min > max`
    pub fn new(min_pct: f32, max_pct: f32) -> Result<Self, PolicyError> {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        if !in_range(min_pct) || !in_range(max_pct) {
            return Err(PolicyError::OutOfRange {
                min: min_pct,
                max: max_pct,
            });
        }
        if min_pct > max_pct {
            return Err(PolicyError::Inverted {
                min: min_pct,
                max: max_pct,
            });
        }
        Ok(ReductionPolicy { min_pct, max_pct })
    }

    pub fn min_pct(&self) -> f32 {
        self.min_pct
    }

    pub fn max_pct(&self) -> f32 {
        self.max_pct
    }

    /// Percentage for a defense value; `None` (attribute unavailable) is 0
    pub fn percentage(&self, defense: Option<f32>) -> f32 {
        reduction_pct(defense.unwrap_or(0.0), self.min_pct, self.max_pct)
    }
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        ReductionPolicy {
            min_pct: DEFAULT_MIN_PCT,
            max_pct: DEFAULT_MAX_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_defense_gives_min() {
        assert!((reduction_pct(0.0, 0.1, 0.35) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_capped_defense_gives_max() {
        assert!((reduction_pct(20.0, 0.1, 0.35) - 0.35).abs() < f32::EPSILON);
        assert!((reduction_pct(1e9, 0.1, 0.35) - 0.35).abs() < f32::EPSILON);
        assert!((reduction_pct(f32::INFINITY, 0.1, 0.35) - 0.35).abs() < f32::EPSILON);
    }

    #[test]
    fn test_midpoint() {
        // 10 / 20 = 0.5 → 0.1 + 0.25 * 0.5 = 0.225
        assert!((reduction_pct(10.0, 0.1, 0.35) - 0.225).abs() < 1e-6);
    }

    #[test]
    fn test_negative_and_nan_defense() {
        assert!((reduction_pct(-50.0, 0.1, 0.35) - 0.1).abs() < f32::EPSILON);
        assert!((reduction_pct(f32::NAN, 0.1, 0.35) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_defense_is_zero() {
        let policy = ReductionPolicy::default();
        assert!((policy.percentage(None) - policy.min_pct()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_policy_validation() {
        assert!(ReductionPolicy::new(0.1, 0.35).is_ok());
        assert!(ReductionPolicy::new(0.2, 0.2).is_ok());
        assert_eq!(
            ReductionPolicy::new(0.5, 0.2),
            Err(PolicyError::Inverted { min: 0.5, max: 0.2 })
        );
        assert!(matches!(
            ReductionPolicy::new(-0.1, 0.2),
            Err(PolicyError::OutOfRange { .. })
        ));
        assert!(matches!(
            ReductionPolicy::new(0.1, 1.5),
            Err(PolicyError::OutOfRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_bounded(defense in proptest::num::f32::ANY, min in 0.0f32..=1.0, span in 0.0f32..=1.0) {
            let max = (min + span).min(1.0);
            let pct = reduction_pct(defense, min, max);
            prop_assert!(pct >= min && pct <= max);
        }

        #[test]
        fn prop_monotonic(a in -1e6f32..1e6, b in -1e6f32..1e6) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(reduction_pct(lo, 0.1, 0.35) <= reduction_pct(hi, 0.1, 0.35));
        }
    }
}
