//! Break simulation utilities

use rand::Rng;
use std::sync::Arc;
use toughness_core::{damage::DamageEvent, Actor, Combatant, DamageResolver, Resolution};

/// Swing one weapon at a target until it dies or the hit budget runs out
pub struct BreakSimulation {
    pub hit_count: u32,
    /// Hit number that broke the toughness
    pub hits_to_break: Option<u32>,
    pub chip_hits: u32,
    pub bypassed_hits: u32,
    pub toughness_dealt: f32,
    pub health_lost: f32,
    /// Hit number that killed the target
    pub kill_hit: Option<u32>,
}

impl BreakSimulation {
    /// Simulate against a scratch copy of `target`
    ///
    /// Uses a throwaway store over the same registries, so the live
    /// toughness of `target` is left untouched.
    pub fn run(
        resolver: &DamageResolver,
        target: &Actor,
        attacker: &Actor,
        raw_damage: f32,
        max_hits: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut result = BreakSimulation {
            hit_count: 0,
            hits_to_break: None,
            chip_hits: 0,
            bypassed_hits: 0,
            toughness_dealt: 0.0,
            health_lost: 0.0,
            kill_hit: None,
        };

        let mut scratch = DamageResolver::new(
            Arc::clone(resolver.overrides()),
            Arc::clone(resolver.bypass()),
            resolver.store().policy(),
            *resolver.constants(),
        );
        let mut target = target.clone();
        scratch.on_actor_joined(&mut target);
        let initial_health = target.health;

        while result.hit_count < max_hits && target.is_alive() {
            let event = DamageEvent::melee(attacker, &target, raw_damage);
            let outcome = scratch.strike_with_rng(&mut target, &event, rng);
            result.hit_count += 1;
            result.toughness_dealt += outcome.toughness_damage();

            match outcome.resolution {
                Resolution::Broke { .. } => result.hits_to_break = Some(result.hit_count),
                Resolution::Chipped { .. } => result.chip_hits += 1,
                Resolution::Passthrough(_) => result.bypassed_hits += 1,
                Resolution::Absorbed { .. } => {}
            }

            if !target.is_alive() {
                result.kill_hit = Some(result.hit_count);
            }
        }

        result.health_lost = initial_health - target.health;
        result
    }

    /// Average health lost per hit
    pub fn avg_health_per_hit(&self) -> f32 {
        if self.hit_count > 0 {
            self.health_lost / self.hit_count as f32
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} hits", self.hit_count)];
        match self.hits_to_break {
            Some(hit) => parts.push(format!("broke on hit {}", hit)),
            None => parts.push("never broke".to_string()),
        }
        if self.chip_hits > 0 {
            parts.push(format!("{} chip hits", self.chip_hits));
        }
        parts.push(format!("{:.1} health lost", self.health_lost));
        if let Some(hit) = self.kill_hit {
            parts.push(format!("killed on hit {}", hit));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use toughness_core::{ActorCategory, ToughnessColor, ToughnessConfig, Weapon};

    fn resolver() -> DamageResolver {
        let resolver = DamageResolver::from_config(&ToughnessConfig::default()).unwrap();
        resolver.overrides().set_max_toughness("minecraft:zombie", 10.0);
        resolver
    }

    #[test]
    fn test_qualifying_weapon_breaks() {
        let resolver = resolver();
        let zombie = Actor::new(2, "minecraft:zombie", ActorCategory::Hostile).with_health(1000.0);
        let player = Actor::player(1).with_weapon(
            Weapon::new("minecraft:iron_sword")
                .with_attack_damage(10.0)
                .with_breaker(&[ToughnessColor::White]),
        );
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        // 10 damage at 0 defense drains 1 toughness per hit
        let result = BreakSimulation::run(&resolver, &zombie, &player, 10.0, 50, &mut rng);
        assert_eq!(result.hits_to_break, Some(10));
        assert_eq!(result.chip_hits, 0);
        assert!((result.toughness_dealt - 10.0).abs() < 1e-3);
        assert!(result.health_lost > 0.0);

        // The live store never saw the scratch actor
        assert!(!resolver.store().contains(zombie.id));
    }

    #[test]
    fn test_non_qualifying_weapon_only_chips() {
        let resolver = resolver();
        let zombie = Actor::new(2, "minecraft:zombie", ActorCategory::Hostile);
        let player = Actor::player(1).with_weapon(Weapon::new("minecraft:stick"));
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let result = BreakSimulation::run(&resolver, &zombie, &player, 5.0, 20, &mut rng);
        assert_eq!(result.hit_count, 20);
        assert_eq!(result.hits_to_break, None);
        assert_eq!(result.chip_hits, 20);
        assert!(result.health_lost <= 20.0 * 0.05 + 1e-4);
        assert!(result.summary().contains("never broke"));
    }
}
