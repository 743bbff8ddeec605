//! Weapons and their toughness-breaking capability
//!
//! Capability data lives in an opaque key/value attachment on the weapon
//! instance ([`TagMap`]) so it survives serialization of the item without
//! the weapon type knowing anything about toughness. [`ToughnessCapability`]
//! is the typed read/write view over those tags.

use crate::color::ToughnessColor;
use crate::distribution::ColorDistribution;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attachment key of the break-toughness marker
pub const CAN_BREAK_KEY: &str = "toughness:can_break";
/// Attachment key of the weapon's color list
pub const COLORS_KEY: &str = "toughness:colors";

/// A single value stored in a weapon attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Opaque key/value storage attached to an item instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagMap(BTreeMap<String, TagValue>);

impl TagMap {
    pub fn new() -> Self {
        TagMap(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: TagValue) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A weapon instance as held by an attacker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Namespaced item id, e.g. `minecraft:iron_sword`
    pub item_id: String,
    /// Nominal attack-damage attribute, when the item exposes one
    #[serde(default)]
    pub attack_damage: Option<f32>,
    /// Custom data attached to this instance
    #[serde(default, skip_serializing_if = "TagMap::is_empty")]
    pub tags: TagMap,
}

impl Weapon {
    /// Create a weapon with no capability data
    pub fn new(item_id: impl Into<String>) -> Self {
        Weapon {
            item_id: item_id.into(),
            attack_damage: None,
            tags: TagMap::new(),
        }
    }

    /// Set the nominal attack damage
    pub fn with_attack_damage(mut self, damage: f32) -> Self {
        self.attack_damage = Some(damage);
        self
    }

    /// Mark the weapon able to break toughness of the given colors
    pub fn with_breaker(mut self, colors: &[ToughnessColor]) -> Self {
        self.set_can_break_toughness(true);
        for color in colors {
            self.add_color(*color);
        }
        self
    }
}

/// Read/write view of a weapon's toughness-breaking capability
///
/// Missing or malformed attachment data reads as "no capability".
pub trait ToughnessCapability {
    /// Stored break-toughness flag
    fn can_break_toughness(&self) -> bool;

    /// Set or clear the break-toughness flag
    fn set_can_break_toughness(&mut self, can_break: bool);

    /// Colors this weapon is tagged with
    fn toughness_colors(&self) -> BTreeSet<ToughnessColor>;

    /// Tag the weapon with a color (no-op if already present)
    fn add_color(&mut self, color: ToughnessColor);

    /// Remove a color tag (no-op if absent)
    fn remove_color(&mut self, color: ToughnessColor);

    /// Whether the weapon's colors cover every band of `distribution`
    fn can_break_distribution(&self, distribution: &ColorDistribution) -> bool {
        let colors = self.toughness_colors();
        if colors.is_empty() {
            return distribution.is_empty();
        }
        distribution.colors().is_subset(&colors)
    }

    /// Full qualification check: flag set and colors cover the bar
    fn qualifies_against(&self, distribution: &ColorDistribution) -> bool {
        self.can_break_toughness() && self.can_break_distribution(distribution)
    }
}

impl ToughnessCapability for TagMap {
    fn can_break_toughness(&self) -> bool {
        matches!(self.get(CAN_BREAK_KEY), Some(TagValue::Bool(true)))
    }

    fn set_can_break_toughness(&mut self, can_break: bool) {
        if can_break {
            self.set(CAN_BREAK_KEY, TagValue::Bool(true));
        } else {
            self.remove(CAN_BREAK_KEY);
        }
    }

    fn toughness_colors(&self) -> BTreeSet<ToughnessColor> {
        match self.get(COLORS_KEY) {
            Some(TagValue::List(names)) => names
                .iter()
                .filter_map(|name| ToughnessColor::parse(name))
                .collect(),
            Some(TagValue::Text(name)) => ToughnessColor::parse(name).into_iter().collect(),
            _ => BTreeSet::new(),
        }
    }

    fn add_color(&mut self, color: ToughnessColor) {
        let mut colors = self.toughness_colors();
        if colors.insert(color) {
            store_colors(self, &colors);
        }
    }

    fn remove_color(&mut self, color: ToughnessColor) {
        let mut colors = self.toughness_colors();
        if colors.remove(&color) {
            store_colors(self, &colors);
        }
    }
}

fn store_colors(tags: &mut TagMap, colors: &BTreeSet<ToughnessColor>) {
    if colors.is_empty() {
        tags.remove(COLORS_KEY);
    } else {
        let names = colors.iter().map(|c| c.name().to_string()).collect();
        tags.set(COLORS_KEY, TagValue::List(names));
    }
}

impl ToughnessCapability for Weapon {
    fn can_break_toughness(&self) -> bool {
        self.tags.can_break_toughness()
    }

    fn set_can_break_toughness(&mut self, can_break: bool) {
        self.tags.set_can_break_toughness(can_break)
    }

    fn toughness_colors(&self) -> BTreeSet<ToughnessColor> {
        self.tags.toughness_colors()
    }

    fn add_color(&mut self, color: ToughnessColor) {
        self.tags.add_color(color)
    }

    fn remove_color(&mut self, color: ToughnessColor) {
        self.tags.remove_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weapon_has_no_capability() {
        let sword = Weapon::new("minecraft:iron_sword");
        assert!(!sword.can_break_toughness());
        assert!(sword.toughness_colors().is_empty());
        assert!(!sword.qualifies_against(&ColorDistribution::default()));
    }

    #[test]
    fn test_add_remove_color_idempotent() {
        let mut sword = Weapon::new("minecraft:iron_sword");
        sword.add_color(ToughnessColor::Red);
        sword.add_color(ToughnessColor::Red);
        assert_eq!(sword.toughness_colors().len(), 1);

        sword.remove_color(ToughnessColor::Blue);
        assert_eq!(sword.toughness_colors().len(), 1);

        sword.remove_color(ToughnessColor::Red);
        assert!(sword.toughness_colors().is_empty());
        assert!(!sword.tags.contains(COLORS_KEY));
    }

    #[test]
    fn test_superset_coverage() {
        let sword = Weapon::new("minecraft:iron_sword")
            .with_breaker(&[ToughnessColor::Red, ToughnessColor::Blue]);

        let red = ColorDistribution::single(ToughnessColor::Red);
        let red_blue = ColorDistribution::multi(vec![
            (ToughnessColor::Red, 1.0),
            (ToughnessColor::Blue, 1.0),
        ]);
        let red_green = ColorDistribution::multi(vec![
            (ToughnessColor::Red, 1.0),
            (ToughnessColor::Green, 1.0),
        ]);

        assert!(sword.can_break_distribution(&red));
        assert!(sword.can_break_distribution(&red_blue));
        assert!(!sword.can_break_distribution(&red_green));
    }

    #[test]
    fn test_flag_required_to_qualify() {
        let mut sword = Weapon::new("minecraft:iron_sword");
        sword.add_color(ToughnessColor::Red);
        let red = ColorDistribution::single(ToughnessColor::Red);
        assert!(sword.can_break_distribution(&red));
        assert!(!sword.qualifies_against(&red));

        sword.set_can_break_toughness(true);
        assert!(sword.qualifies_against(&red));
    }

    #[test]
    fn test_malformed_tags_read_as_no_capability() {
        let mut sword = Weapon::new("minecraft:iron_sword");
        sword.tags.set(CAN_BREAK_KEY, TagValue::Text("yes".to_string()));
        sword.tags.set(COLORS_KEY, TagValue::Number(3.0));
        assert!(!sword.can_break_toughness());
        assert!(sword.toughness_colors().is_empty());

        sword.tags.set(
            COLORS_KEY,
            TagValue::List(vec!["red".to_string(), "???".to_string()]),
        );
        assert_eq!(sword.toughness_colors().len(), 1);
    }

    #[test]
    fn test_tags_survive_json() {
        let sword = Weapon::new("minecraft:iron_sword")
            .with_attack_damage(6.0)
            .with_breaker(&[ToughnessColor::White]);
        let json = serde_json::to_string(&sword).unwrap();
        let back: Weapon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sword);
        assert!(back.can_break_toughness());
    }
}
