//! ToughnessStore - Toughness pools of every eligible actor

use super::constants::{BOSS_TOUGHNESS, HOSTILE_TOUGHNESS};
use super::hud::ToughnessBar;
use super::overrides::OverrideRegistry;
use super::state::ToughnessState;
use crate::actor::Combatant;
use crate::defense::ReductionPolicy;
use crate::distribution::ColorDistribution;
use crate::types::{ActorCategory, ActorId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// What a call to [`ToughnessStore::reduce`] did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReduceOutcome {
    /// Ineligible actor, missing or broken pool, or nothing to reduce
    Skipped,
    /// Pool drained but still standing
    Reduced { amount: f32, remaining: f32 },
    /// This call emptied the pool and broke it; `amount` is what was left
    Broke { amount: f32 },
}

impl ReduceOutcome {
    pub fn broke(&self) -> bool {
        matches!(self, ReduceOutcome::Broke { .. })
    }
}

/// Per-actor toughness pools, keyed by actor identity
pub struct ToughnessStore {
    states: HashMap<ActorId, ToughnessState>,
    overrides: Arc<OverrideRegistry>,
    policy: ReductionPolicy,
}

impl ToughnessStore {
    /// Create an empty store reading from `overrides`
    pub fn new(overrides: Arc<OverrideRegistry>, policy: ReductionPolicy) -> Self {
        ToughnessStore {
            states: HashMap::new(),
            overrides,
            policy,
        }
    }

    pub fn overrides(&self) -> &Arc<OverrideRegistry> {
        &self.overrides
    }

    pub fn policy(&self) -> ReductionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ReductionPolicy) {
        self.policy = policy;
    }

    /// Whether the actor takes part in the toughness system at all
    ///
    /// Players and dead actors never do. Otherwise a positive toughness
    /// override, a hostile/neutral category or a boss-like type qualifies.
    pub fn is_eligible<C: Combatant + ?Sized>(&self, actor: &C) -> bool {
        if actor.is_player() || !actor.is_alive() {
            return false;
        }
        self.overrides.has_toughness_override(actor.type_id())
            || actor.category().has_default_toughness()
            || actor.is_boss()
    }

    /// Max toughness the actor should have under the current overrides
    pub fn configured_max<C: Combatant + ?Sized>(&self, actor: &C) -> f32 {
        if let Some(max) = self.overrides.max_toughness(actor.type_id()) {
            return max;
        }
        if actor.is_boss() {
            BOSS_TOUGHNESS
        } else if actor.category() == ActorCategory::Hostile {
            HOSTILE_TOUGHNESS
        } else {
            0.0
        }
    }

    /// Create or refresh the actor's pool from the current overrides
    ///
    /// An intact pool keeps its fill percentage across max changes, so
    /// calling this repeatedly with unchanged config does nothing. A broken
    /// pool with a positive configured max is re-armed to full.
    pub fn initialize<C: Combatant + ?Sized>(&mut self, actor: &C) {
        if !self.is_eligible(actor) {
            return;
        }

        let max = self.configured_max(actor);
        let configured = self.overrides.distribution(actor.type_id());

        match self.states.get_mut(&actor.id()) {
            Some(state) => {
                if state.is_broken() {
                    if state.rearm(max) {
                        info!(actor = %actor.id(), type_id = %actor.type_id(), max, "toughness re-armed");
                    }
                } else {
                    state.rescale(max);
                }
                if let Some(distribution) = configured {
                    state.set_distribution(distribution);
                }
                debug!(
                    actor = %actor.id(),
                    type_id = %actor.type_id(),
                    max,
                    current = state.current(),
                    "refreshed toughness"
                );
            }
            None => {
                let distribution = configured.unwrap_or_default();
                debug!(
                    actor = %actor.id(),
                    type_id = %actor.type_id(),
                    max,
                    colors = distribution.len(),
                    "initialized toughness"
                );
                self.states
                    .insert(actor.id(), ToughnessState::new(max, distribution));
            }
        }
    }

    /// Discard the actor's pool and initialize a fresh one
    ///
    /// Unlike [`ToughnessStore::initialize`] this also refills a drained
    /// intact pool and drops any previously recorded distribution.
    pub fn reset<C: Combatant + ?Sized>(&mut self, actor: &C) {
        if self.states.remove(&actor.id()).is_some() {
            debug!(actor = %actor.id(), "reset toughness");
        }
        self.initialize(actor);
    }

    pub fn get(&self, id: ActorId) -> Option<&ToughnessState> {
        self.states.get(&id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.states.contains_key(&id)
    }

    /// Fill fraction in [0, 1]; 0 for ineligible or pool-less actors
    pub fn percentage<C: Combatant + ?Sized>(&self, actor: &C) -> f32 {
        if !self.is_eligible(actor) {
            return 0.0;
        }
        self.states
            .get(&actor.id())
            .map(ToughnessState::percentage)
            .unwrap_or(0.0)
    }

    /// Color bands of the actor's bar, if it has one
    pub fn distribution(&self, id: ActorId) -> Option<&ColorDistribution> {
        self.states.get(&id).map(ToughnessState::distribution)
    }

    /// Drain toughness by `base_damage` scaled with the reduction policy
    pub fn reduce<C: Combatant + ?Sized>(&mut self, actor: &C, base_damage: f32, defense: f32) -> ReduceOutcome {
        if !self.is_eligible(actor) || base_damage.is_nan() || base_damage <= 0.0 {
            return ReduceOutcome::Skipped;
        }
        let pct = self.policy.percentage(Some(defense));
        let Some(state) = self.states.get_mut(&actor.id()) else {
            return ReduceOutcome::Skipped;
        };
        if state.is_broken() {
            return ReduceOutcome::Skipped;
        }

        let amount = base_damage * pct;
        let before = state.current();
        if state.drain(amount) {
            let amount = amount.min(before);
            info!(
                actor = %actor.id(),
                type_id = %actor.type_id(),
                amount,
                "toughness broken"
            );
            return ReduceOutcome::Broke { amount };
        }
        ReduceOutcome::Reduced {
            amount,
            remaining: state.current(),
        }
    }

    /// Broken flag; ineligible actors count as having no active defense
    pub fn is_broken<C: Combatant + ?Sized>(&self, actor: &C) -> bool {
        if !self.is_eligible(actor) {
            return true;
        }
        self.states
            .get(&actor.id())
            .map(ToughnessState::is_broken)
            .unwrap_or(false)
    }

    /// HUD view of an actor's bar
    pub fn hud(&self, id: ActorId) -> Option<ToughnessBar> {
        self.states.get(&id).map(ToughnessBar::from_state)
    }

    /// Forget an actor that left the world
    pub fn remove(&mut self, id: ActorId) -> Option<ToughnessState> {
        self.states.remove(&id)
    }

    /// Wipe every pool (full config reload)
    pub fn clear_all(&mut self) {
        let count = self.states.len();
        self.states.clear();
        debug!(count, "cleared toughness store");
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
