//! DamageOutcome - What the pipeline did with one hit

use crate::bypass::BypassReason;
use crate::damage::BaseDamage;
use serde::{Deserialize, Serialize};

/// Why a hit was left to the default damage logic untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PassthroughReason {
    /// Player, dead actor or a type with no toughness
    Ineligible,
    /// Bypass classifier matched
    Exempt(BypassReason),
    /// Toughness already broken or empty
    NoToughness,
    /// Event addressed to another actor
    TargetMismatch,
}

/// Branch the pipeline took
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// Default damage applies in full
    Passthrough(PassthroughReason),
    /// Qualifying hit emptied the pool; default damage applies in full
    Broke { toughness_damage: f32 },
    /// Qualifying hit drained toughness, a share reached health directly
    Absorbed { toughness_damage: f32, health_damage: f32 },
    /// Non-qualifying weapon, only chip damage reached health
    Chipped { health_damage: f32 },
}

/// Result of resolving one [`DamageEvent`](crate::damage::DamageEvent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub resolution: Resolution,
    /// Damage as it arrived
    pub raw_amount: f32,
    /// Base damage estimate, when the pipeline got that far
    pub base_damage: Option<BaseDamage>,

    // === State Changes ===
    pub health_before: f32,
    pub health_after: f32,
    /// 0 for actors without a pool
    pub toughness_before: f32,
    pub toughness_after: f32,
}

impl DamageOutcome {
    pub(crate) fn passthrough(reason: PassthroughReason, raw_amount: f32, health: f32, toughness: f32) -> Self {
        DamageOutcome {
            resolution: Resolution::Passthrough(reason),
            raw_amount,
            base_damage: None,
            health_before: health,
            health_after: health,
            toughness_before: toughness,
            toughness_after: toughness,
        }
    }

    /// Whether the host must skip its own health subtraction
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self.resolution,
            Resolution::Absorbed { .. } | Resolution::Chipped { .. }
        )
    }

    /// Damage the default logic still has to apply (0 when suppressed)
    pub fn default_damage(&self) -> f32 {
        if self.suppresses_default() {
            0.0
        } else {
            self.raw_amount.max(0.0)
        }
    }

    /// Toughness removed by this hit
    pub fn toughness_damage(&self) -> f32 {
        match self.resolution {
            Resolution::Broke { toughness_damage } | Resolution::Absorbed { toughness_damage, .. } => toughness_damage,
            _ => 0.0,
        }
    }

    /// Health removed directly by the pipeline (excludes default damage)
    pub fn direct_health_damage(&self) -> f32 {
        match self.resolution {
            Resolution::Absorbed { health_damage, .. } | Resolution::Chipped { health_damage } => health_damage,
            _ => 0.0,
        }
    }

    pub fn broke_toughness(&self) -> bool {
        matches!(self.resolution, Resolution::Broke { .. })
    }

    pub fn is_killing_blow(&self) -> bool {
        self.health_before > 0.0 && self.health_after <= 0.0
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        match &self.resolution {
            Resolution::Passthrough(PassthroughReason::Exempt(reason)) => {
                parts.push(format!("bypassed: {reason}"));
            }
            Resolution::Passthrough(PassthroughReason::NoToughness) => {
                parts.push("no toughness".to_string());
            }
            Resolution::Passthrough(PassthroughReason::Ineligible) => {
                parts.push("no toughness system".to_string());
            }
            Resolution::Passthrough(PassthroughReason::TargetMismatch) => {
                parts.push("wrong target".to_string());
            }
            Resolution::Broke { toughness_damage } => {
                parts.push(format!("{:.1} toughness, BROKEN", toughness_damage));
            }
            Resolution::Absorbed {
                toughness_damage,
                health_damage,
            } => {
                parts.push(format!("{:.1} toughness", toughness_damage));
                parts.push(format!("{:.1} health", health_damage));
            }
            Resolution::Chipped { health_damage } => {
                parts.push(format!("chipped {:.2} health", health_damage));
            }
        }

        let default = self.default_damage();
        if default > 0.0 {
            parts.push(format!("{:.1} damage taken", default));
        }

        if self.is_killing_blow() {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(resolution: Resolution) -> DamageOutcome {
        DamageOutcome {
            resolution,
            raw_amount: 10.0,
            base_damage: None,
            health_before: 20.0,
            health_after: 20.0,
            toughness_before: 100.0,
            toughness_after: 100.0,
        }
    }

    #[test]
    fn test_suppression_by_branch() {
        assert!(outcome(Resolution::Chipped { health_damage: 0.03 }).suppresses_default());
        assert!(outcome(Resolution::Absorbed {
            toughness_damage: 1.0,
            health_damage: 5.0
        })
        .suppresses_default());
        assert!(!outcome(Resolution::Broke { toughness_damage: 1.0 }).suppresses_default());
        assert!(!outcome(Resolution::Passthrough(PassthroughReason::NoToughness)).suppresses_default());
    }

    #[test]
    fn test_default_damage() {
        assert!((outcome(Resolution::Broke { toughness_damage: 1.0 }).default_damage() - 10.0).abs() < f32::EPSILON);
        assert!((outcome(Resolution::Chipped { health_damage: 0.03 }).default_damage() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_summary() {
        let s = outcome(Resolution::Absorbed {
            toughness_damage: 1.0,
            health_damage: 5.0,
        })
        .summary();
        assert_eq!(s, "1.0 toughness, 5.0 health");

        let s = outcome(Resolution::Broke { toughness_damage: 1.0 }).summary();
        assert!(s.contains("BROKEN"));
        assert!(s.contains("10.0 damage taken"));
    }
}
