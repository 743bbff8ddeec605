//! BypassRegistry - Configurable exemption lists

use crate::locks;
use std::collections::BTreeSet;
use std::sync::RwLock;

/// Exempt damage-type ids, actor namespaces and item-id prefixes
///
/// Damage-type ids match verbatim. Namespaces and prefixes are stored
/// lowercased and matched against lowercased ids.
#[derive(Debug, Default)]
pub struct BypassRegistry {
    damage_types: RwLock<BTreeSet<String>>,
    mod_ids: RwLock<BTreeSet<String>>,
    item_prefixes: RwLock<BTreeSet<String>>,
}

impl BypassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // === Damage types ===

    /// Returns false if the id was empty or already registered
    pub fn add_damage_type(&self, id: &str) -> bool {
        insert(&self.damage_types, id.trim().to_string())
    }

    pub fn remove_damage_type(&self, id: &str) -> bool {
        locks::write(&self.damage_types).remove(id.trim())
    }

    pub fn contains_damage_type(&self, id: &str) -> bool {
        locks::read(&self.damage_types).contains(id)
    }

    pub fn damage_types(&self) -> Vec<String> {
        locks::read(&self.damage_types).iter().cloned().collect()
    }

    // === Mod ids (actor-type namespaces) ===

    pub fn add_mod_id(&self, namespace: &str) -> bool {
        insert(&self.mod_ids, normalize(namespace))
    }

    pub fn remove_mod_id(&self, namespace: &str) -> bool {
        locks::write(&self.mod_ids).remove(&normalize(namespace))
    }

    pub fn contains_mod_id(&self, namespace: &str) -> bool {
        locks::read(&self.mod_ids).contains(&normalize(namespace))
    }

    pub fn mod_ids(&self) -> Vec<String> {
        locks::read(&self.mod_ids).iter().cloned().collect()
    }

    // === Item prefixes ===

    pub fn add_item_prefix(&self, prefix: &str) -> bool {
        insert(&self.item_prefixes, normalize(prefix))
    }

    pub fn remove_item_prefix(&self, prefix: &str) -> bool {
        locks::write(&self.item_prefixes).remove(&normalize(prefix))
    }

    pub fn contains_item_prefix(&self, prefix: &str) -> bool {
        locks::read(&self.item_prefixes).contains(&normalize(prefix))
    }

    pub fn item_prefixes(&self) -> Vec<String> {
        locks::read(&self.item_prefixes).iter().cloned().collect()
    }

    /// First registered prefix `item_id` starts with
    pub fn matching_item_prefix(&self, item_id: &str) -> Option<String> {
        let item_id = normalize(item_id);
        locks::read(&self.item_prefixes)
            .iter()
            .find(|prefix| item_id.starts_with(prefix.as_str()))
            .cloned()
    }

    // === Whole registry ===

    pub fn clear(&self) {
        locks::write(&self.damage_types).clear();
        locks::write(&self.mod_ids).clear();
        locks::write(&self.item_prefixes).clear();
    }

    pub fn is_empty(&self) -> bool {
        locks::read(&self.damage_types).is_empty()
            && locks::read(&self.mod_ids).is_empty()
            && locks::read(&self.item_prefixes).is_empty()
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn insert(set: &RwLock<BTreeSet<String>>, value: String) -> bool {
    if value.is_empty() {
        return false;
    }
    locks::write(set).insert(value)
}
