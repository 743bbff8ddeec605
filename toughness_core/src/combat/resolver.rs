//! Damage resolution - Run one hit through the toughness pipeline

use super::outcome::{DamageOutcome, PassthroughReason, Resolution};
use crate::actor::Combatant;
use crate::bypass::{BypassClassifier, BypassRegistry};
use crate::config::{CombatConstants, ConfigError, ToughnessConfig};
use crate::damage::{estimate_base_damage, DamageEvent};
use crate::defense::ReductionPolicy;
use crate::toughness::{OverrideRegistry, ReduceOutcome, ToughnessStore};
use crate::types::ActorId;
use crate::weapon::ToughnessCapability;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates classifier, store and weapon checks for every hit
///
/// Runs before the host's own health subtraction. The returned outcome
/// says whether that default logic must be suppressed. Health and
/// toughness are mutated directly; no new damage event is ever raised.
pub struct DamageResolver {
    store: ToughnessStore,
    classifier: BypassClassifier,
    overrides: Arc<OverrideRegistry>,
    bypass: Arc<BypassRegistry>,
    constants: CombatConstants,
}

impl DamageResolver {
    pub fn new(
        overrides: Arc<OverrideRegistry>,
        bypass: Arc<BypassRegistry>,
        policy: ReductionPolicy,
        constants: CombatConstants,
    ) -> Self {
        DamageResolver {
            store: ToughnessStore::new(Arc::clone(&overrides), policy),
            classifier: BypassClassifier::new(Arc::clone(&bypass)),
            overrides,
            bypass,
            constants,
        }
    }

    /// Build fresh registries from a config
    pub fn from_config(config: &ToughnessConfig) -> Result<Self, ConfigError> {
        let mut resolver = DamageResolver::new(
            Arc::new(OverrideRegistry::new()),
            Arc::new(BypassRegistry::new()),
            ReductionPolicy::default(),
            CombatConstants::default(),
        );
        resolver.reload(config)?;
        Ok(resolver)
    }

    /// Full reload: clear registries and every pool, then re-apply
    ///
    /// The config is validated first; on error nothing changes.
    pub fn reload(&mut self, config: &ToughnessConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let policy = config.reduction_policy()?;

        self.overrides.clear();
        self.bypass.clear();
        self.store.clear_all();
        self.store.set_policy(policy);
        self.constants = config.combat;
        config.apply(&self.overrides, &self.bypass);

        info!(
            min_pct = policy.min_pct(),
            max_pct = policy.max_pct(),
            "reloaded toughness config"
        );
        Ok(())
    }

    pub fn store(&self) -> &ToughnessStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ToughnessStore {
        &mut self.store
    }

    pub fn classifier(&self) -> &BypassClassifier {
        &self.classifier
    }

    pub fn overrides(&self) -> &Arc<OverrideRegistry> {
        &self.overrides
    }

    pub fn bypass(&self) -> &Arc<BypassRegistry> {
        &self.bypass
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Actor entered the world
    ///
    /// Applies the type's max-health override (keeping the health fraction)
    /// and initializes or refreshes its toughness.
    pub fn on_actor_joined<C: Combatant + ?Sized>(&mut self, actor: &mut C) {
        if !actor.is_player() {
            if let Some(max_health) = self.overrides.max_health(actor.type_id()) {
                apply_max_health(actor, max_health);
            }
        }
        self.store.initialize(&*actor);
    }

    /// Actor left the world
    pub fn on_actor_removed(&mut self, id: ActorId) {
        if self.store.remove(id).is_some() {
            debug!(actor = %id, "dropped toughness state");
        }
    }

    /// Re-arm a broken actor with a fresh pool
    pub fn reset<C: Combatant + ?Sized>(&mut self, actor: &C) {
        self.store.reset(actor);
    }

    /// Resolve a hit against `target`
    pub fn resolve<C: Combatant + ?Sized>(&mut self, target: &mut C, event: &DamageEvent) -> DamageOutcome {
        let mut rng = rand::thread_rng();
        self.resolve_with_rng(target, event, &mut rng)
    }

    /// Resolve with a provided RNG (for deterministic testing)
    ///
    /// 1. Ineligible targets and exempt events pass through untouched
    /// 2. Broken or empty toughness passes through untouched
    /// 3. Base damage is estimated from the raw amount
    /// 4. Non-qualifying weapons deal chip damage to health only
    /// 5. Qualifying weapons drain toughness; a break lets the raw hit
    ///    through, otherwise a share of base damage reaches health
    pub fn resolve_with_rng<C: Combatant + ?Sized>(
        &mut self,
        target: &mut C,
        event: &DamageEvent,
        rng: &mut impl Rng,
    ) -> DamageOutcome {
        let id = target.id();
        let health = target.health();

        if id != event.target {
            warn!(actor = %id, event_target = %event.target, "damage event addressed to another actor");
            return DamageOutcome::passthrough(PassthroughReason::TargetMismatch, event.raw_amount, health, 0.0);
        }

        if !self.store.is_eligible(&*target) {
            return DamageOutcome::passthrough(PassthroughReason::Ineligible, event.raw_amount, health, 0.0);
        }

        if !self.store.contains(id) {
            self.store.initialize(&*target);
        }
        let toughness_before = self.current_toughness(id);

        if let Some(reason) = self.classifier.classify(event) {
            return DamageOutcome::passthrough(
                PassthroughReason::Exempt(reason),
                event.raw_amount,
                health,
                toughness_before,
            );
        }

        if self.store.is_broken(&*target) || self.store.percentage(&*target) <= 0.0 {
            return DamageOutcome::passthrough(
                PassthroughReason::NoToughness,
                event.raw_amount,
                health,
                toughness_before,
            );
        }

        let base = estimate_base_damage(event, &self.constants);
        let qualifies = match (event.weapon(), self.store.distribution(id)) {
            (Some(weapon), Some(distribution)) => weapon.qualifies_against(distribution),
            _ => false,
        };

        let resolution = if qualifies {
            let defense = target.defense().unwrap_or(0.0);
            match self.store.reduce(&*target, base.amount, defense) {
                ReduceOutcome::Broke { amount } => Resolution::Broke {
                    toughness_damage: amount,
                },
                ReduceOutcome::Reduced { amount, .. } => {
                    let share = base.amount * self.constants.absorbed_health_ratio;
                    Resolution::Absorbed {
                        toughness_damage: amount,
                        health_damage: damage_health(target, share),
                    }
                }
                ReduceOutcome::Skipped => Resolution::Absorbed {
                    toughness_damage: 0.0,
                    health_damage: 0.0,
                },
            }
        } else {
            let chip = self.roll_chip(rng);
            Resolution::Chipped {
                health_damage: damage_health(target, chip),
            }
        };

        let outcome = DamageOutcome {
            resolution,
            raw_amount: event.raw_amount,
            base_damage: Some(base),
            health_before: health,
            health_after: target.health(),
            toughness_before,
            toughness_after: self.current_toughness(id),
        };
        debug!(actor = %id, qualifies, summary = %outcome.summary(), "resolved hit");
        outcome
    }

    /// Resolve, then run the default health subtraction when it is not
    /// suppressed, the way a host without its own damage logic would
    pub fn strike<C: Combatant + ?Sized>(&mut self, target: &mut C, event: &DamageEvent) -> DamageOutcome {
        let mut rng = rand::thread_rng();
        self.strike_with_rng(target, event, &mut rng)
    }

    pub fn strike_with_rng<C: Combatant + ?Sized>(
        &mut self,
        target: &mut C,
        event: &DamageEvent,
        rng: &mut impl Rng,
    ) -> DamageOutcome {
        let mut outcome = self.resolve_with_rng(target, event, rng);
        let default = outcome.default_damage();
        if default > 0.0 {
            damage_health(target, default);
            outcome.health_after = target.health();
        }
        outcome
    }

    fn current_toughness(&self, id: ActorId) -> f32 {
        self.store.get(id).map(|s| s.current()).unwrap_or(0.0)
    }

    fn roll_chip(&self, rng: &mut impl Rng) -> f32 {
        let lo = self.constants.chip_min.min(self.constants.chip_max);
        let hi = self.constants.chip_min.max(self.constants.chip_max);
        if lo < hi {
            rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }
}

/// Subtract health, clamped to `[0, current]`; returns what was dealt
fn damage_health<C: Combatant + ?Sized>(target: &mut C, amount: f32) -> f32 {
    let health = target.health();
    let dealt = if amount.is_finite() {
        amount.clamp(0.0, health.max(0.0))
    } else {
        0.0
    };
    if dealt > 0.0 {
        target.set_health(health - dealt);
    }
    dealt
}

fn apply_max_health<C: Combatant + ?Sized>(actor: &mut C, max_health: f32) {
    let old_max = actor.max_health();
    if (old_max - max_health).abs() < f32::EPSILON {
        return;
    }
    let fraction = if old_max > 0.0 {
        (actor.health() / old_max).clamp(0.0, 1.0)
    } else {
        1.0
    };
    actor.set_max_health(max_health);
    actor.set_health(max_health * fraction);
    debug!(actor = %actor.id(), old_max, max_health, "applied max health override");
}
