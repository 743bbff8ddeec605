//! Base damage estimation
//!
//! Incoming damage arrives with crit and strength bonuses already baked in.
//! Toughness is drained by the weapon's own damage, so the pipeline backs
//! those modifiers out again:
//!
//! 1. Critical hit (falling attacker, or an origin tag containing
//!    "critical"): divide by the crit multiplier
//! 2. Strength buff: subtract the flat per-stack bonus, floored at 0
//! 3. Clamp to the weapon's nominal attack damage when it is smaller
//!
//! This is a heuristic. Stacked modifiers the chain does not know about
//! make the estimate drift from the true weapon damage.

use super::DamageEvent;
use crate::config::CombatConstants;
use serde::{Deserialize, Serialize};

/// Origin-tag marker that flags a critical hit
pub const CRITICAL_MARKER: &str = "critical";

/// Result of backing modifiers out of a raw damage value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseDamage {
    /// Estimated unmodified weapon damage
    pub amount: f32,
    /// Whether a critical multiplier was removed
    pub critical: bool,
    /// Flat strength bonus subtracted
    pub strength_bonus: f32,
    /// Whether the weapon's nominal damage capped the estimate
    pub capped_by_weapon: bool,
}

/// Whether the hit looks like a critical strike
pub fn is_critical(event: &DamageEvent) -> bool {
    let falling = event.attacker.as_ref().map(|a| a.falling).unwrap_or(false);
    falling || event.has_tag_containing(CRITICAL_MARKER)
}

/// Estimate the unmodified weapon damage behind `event.raw_amount`
pub fn estimate_base_damage(event: &DamageEvent, constants: &CombatConstants) -> BaseDamage {
    let mut amount = if event.raw_amount.is_finite() {
        event.raw_amount.max(0.0)
    } else {
        0.0
    };

    let critical = is_critical(event);
    if critical && constants.crit_multiplier > 0.0 {
        amount /= constants.crit_multiplier;
    }

    let stacks = event.attacker.as_ref().map(|a| a.strength_stacks).unwrap_or(0);
    let strength_bonus = constants.strength_bonus_per_stack * stacks as f32;
    amount = (amount - strength_bonus).max(0.0);

    let mut capped_by_weapon = false;
    if let Some(nominal) = event.weapon().and_then(|w| w.attack_damage) {
        if nominal.is_finite() && nominal >= 0.0 && nominal < amount {
            amount = nominal;
            capped_by_weapon = true;
        }
    }

    BaseDamage {
        amount,
        critical,
        strength_bonus,
        capped_by_weapon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::SourceActor;
    use crate::types::ActorId;
    use crate::weapon::Weapon;

    fn event(raw: f32) -> DamageEvent {
        DamageEvent::new(ActorId(1), raw)
    }

    #[test]
    fn test_plain_hit_unchanged() {
        let base = estimate_base_damage(&event(10.0), &CombatConstants::default());
        assert!((base.amount - 10.0).abs() < f32::EPSILON);
        assert!(!base.critical);
        assert!(!base.capped_by_weapon);
    }

    #[test]
    fn test_falling_crit_divided() {
        let mut attacker = SourceActor::new("minecraft:player");
        attacker.falling = true;
        let e = event(15.0).with_attacker(attacker);

        let base = estimate_base_damage(&e, &CombatConstants::default());
        assert!(base.critical);
        assert!((base.amount - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_tagged_crit_divided() {
        let e = event(15.0).with_tag("combat:critical_hit");
        let base = estimate_base_damage(&e, &CombatConstants::default());
        assert!((base.amount - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_strength_subtracted_and_floored() {
        let mut attacker = SourceActor::new("minecraft:player");
        attacker.strength_stacks = 2;
        let base = estimate_base_damage(&event(10.0).with_attacker(attacker.clone()), &CombatConstants::default());
        assert!((base.amount - 4.0).abs() < 1e-5);
        assert!((base.strength_bonus - 6.0).abs() < 1e-5);

        let base = estimate_base_damage(&event(5.0).with_attacker(attacker), &CombatConstants::default());
        assert!((base.amount - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamped_to_weapon_damage() {
        let attacker = SourceActor::new("minecraft:player")
            .with_weapon(Weapon::new("minecraft:iron_sword").with_attack_damage(6.0));
        let base = estimate_base_damage(&event(9.0).with_attacker(attacker.clone()), &CombatConstants::default());
        assert!((base.amount - 6.0).abs() < f32::EPSILON);
        assert!(base.capped_by_weapon);

        // Never raised up to the weapon value
        let base = estimate_base_damage(&event(3.0).with_attacker(attacker), &CombatConstants::default());
        assert!((base.amount - 3.0).abs() < f32::EPSILON);
        assert!(!base.capped_by_weapon);
    }

    #[test]
    fn test_garbage_raw_amount() {
        let base = estimate_base_damage(&event(f32::NAN), &CombatConstants::default());
        assert!((base.amount - 0.0).abs() < f32::EPSILON);
        let base = estimate_base_damage(&event(-4.0), &CombatConstants::default());
        assert!((base.amount - 0.0).abs() < f32::EPSILON);
    }
}
