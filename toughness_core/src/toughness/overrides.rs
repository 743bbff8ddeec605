//! OverrideRegistry - Per-type max health, max toughness and colors
//!
//! Written by the config loader and the scripting surface, read on every
//! toughness (re)initialization. Each key is independent, so plain
//! read/write locks per table are enough.

use crate::distribution::ColorDistribution;
use crate::locks;
use crate::types::ActorTypeId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-wide table of actor-type overrides
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    max_health: RwLock<HashMap<ActorTypeId, f32>>,
    max_toughness: RwLock<HashMap<ActorTypeId, f32>>,
    distributions: RwLock<HashMap<ActorTypeId, ColorDistribution>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // === Max health ===

    /// Set max health for a type; non-positive values remove the override
    pub fn set_max_health(&self, type_id: impl Into<ActorTypeId>, value: f32) {
        set_positive(&self.max_health, type_id.into(), value);
    }

    pub fn max_health(&self, type_id: &ActorTypeId) -> Option<f32> {
        locks::read(&self.max_health).get(type_id).copied()
    }

    pub fn remove_max_health(&self, type_id: &ActorTypeId) -> Option<f32> {
        locks::write(&self.max_health).remove(type_id)
    }

    pub fn clear_max_health(&self) {
        locks::write(&self.max_health).clear();
    }

    // === Max toughness ===

    /// Set max toughness for a type; non-positive values remove the override
    pub fn set_max_toughness(&self, type_id: impl Into<ActorTypeId>, value: f32) {
        set_positive(&self.max_toughness, type_id.into(), value);
    }

    pub fn max_toughness(&self, type_id: &ActorTypeId) -> Option<f32> {
        locks::read(&self.max_toughness).get(type_id).copied()
    }

    pub fn remove_max_toughness(&self, type_id: &ActorTypeId) -> Option<f32> {
        locks::write(&self.max_toughness).remove(type_id)
    }

    pub fn clear_max_toughness(&self) {
        locks::write(&self.max_toughness).clear();
    }

    /// Whether a positive toughness override exists for the type
    pub fn has_toughness_override(&self, type_id: &ActorTypeId) -> bool {
        self.max_toughness(type_id).map(|v| v > 0.0).unwrap_or(false)
    }

    // === Distributions ===

    pub fn set_distribution(&self, type_id: impl Into<ActorTypeId>, distribution: ColorDistribution) {
        locks::write(&self.distributions).insert(type_id.into(), distribution);
    }

    pub fn distribution(&self, type_id: &ActorTypeId) -> Option<ColorDistribution> {
        locks::read(&self.distributions).get(type_id).cloned()
    }

    pub fn remove_distribution(&self, type_id: &ActorTypeId) -> Option<ColorDistribution> {
        locks::write(&self.distributions).remove(type_id)
    }

    pub fn clear_distributions(&self) {
        locks::write(&self.distributions).clear();
    }

    // === Whole registry ===

    /// Drop every override of every kind
    pub fn clear(&self) {
        self.clear_max_health();
        self.clear_max_toughness();
        self.clear_distributions();
    }

    /// Every type with at least one override, sorted
    pub fn types(&self) -> Vec<ActorTypeId> {
        let mut types: Vec<ActorTypeId> = locks::read(&self.max_health).keys().cloned().collect();
        types.extend(locks::read(&self.max_toughness).keys().cloned());
        types.extend(locks::read(&self.distributions).keys().cloned());
        types.sort();
        types.dedup();
        types
    }

    pub fn is_empty(&self) -> bool {
        locks::read(&self.max_health).is_empty()
            && locks::read(&self.max_toughness).is_empty()
            && locks::read(&self.distributions).is_empty()
    }
}

fn set_positive(table: &RwLock<HashMap<ActorTypeId, f32>>, type_id: ActorTypeId, value: f32) {
    let mut table = locks::write(table);
    if value.is_finite() && value > 0.0 {
        table.insert(type_id, value);
    } else {
        table.remove(&type_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ToughnessColor;

    #[test]
    fn test_set_get_remove() {
        let registry = OverrideRegistry::new();
        let zombie = ActorTypeId::new("minecraft:zombie");

        registry.set_max_toughness("minecraft:zombie", 120.0);
        assert_eq!(registry.max_toughness(&zombie), Some(120.0));
        assert!(registry.has_toughness_override(&zombie));

        assert_eq!(registry.remove_max_toughness(&zombie), Some(120.0));
        assert_eq!(registry.max_toughness(&zombie), None);
    }

    #[test]
    fn test_non_positive_removes() {
        let registry = OverrideRegistry::new();
        let zombie = ActorTypeId::new("minecraft:zombie");

        registry.set_max_health("minecraft:zombie", 40.0);
        registry.set_max_health("minecraft:zombie", 0.0);
        assert_eq!(registry.max_health(&zombie), None);

        registry.set_max_toughness("minecraft:zombie", f32::NAN);
        assert_eq!(registry.max_toughness(&zombie), None);
    }

    #[test]
    fn test_type_ids_normalized() {
        let registry = OverrideRegistry::new();
        registry.set_max_toughness("Minecraft:Zombie ", 50.0);
        assert_eq!(
            registry.max_toughness(&ActorTypeId::new("minecraft:zombie")),
            Some(50.0)
        );
    }

    #[test]
    fn test_clear_by_category() {
        let registry = OverrideRegistry::new();
        registry.set_max_health("a:x", 10.0);
        registry.set_max_toughness("a:y", 10.0);
        registry.set_distribution("a:z", ColorDistribution::single(ToughnessColor::Red));
        assert_eq!(registry.types().len(), 3);

        registry.clear_max_health();
        assert_eq!(registry.types().len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}
