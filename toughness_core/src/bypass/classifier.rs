//! BypassClassifier - Decide whether a hit skips the toughness system
//!
//! Evaluation order, first match wins:
//! 1. Environmental / void damage (built in, cannot be disabled)
//! 2. Registered damage-type ids
//! 3. Registered mod ids, checked against attacker and cause namespaces
//! 4. Projectile-like causes (bullets, ammo, shots)
//! 5. Registered item-id prefixes on the attacker's weapon
//!
//! Signals from foreign content are unreliable, so anything that matches
//! none of the above stays toughness-gated.

use super::BypassRegistry;
use crate::damage::{DamageEvent, SourceActor, PROJECTILE_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Damage-type paths of world and environment damage
pub const ENVIRONMENTAL_PATHS: &[&str] = &[
    "out_of_world",
    "fell_out_of_world",
    "outside_border",
    "generic_kill",
    "starve",
    "drown",
    "in_wall",
    "cramming",
    "fall",
    "fly_into_wall",
    "lava",
    "in_fire",
    "on_fire",
    "hot_floor",
    "freeze",
    "dry_out",
];

/// Word of a damage-type path that marks void damage
pub const VOID_MARKER: &str = "void";

/// Words that mark a source as projectile-like
pub const PROJECTILE_KEYWORDS: &[&str] = &["bullet", "projectile", "ammo", "shot"];

/// Which classification step exempted an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BypassReason {
    /// Environmental or void origin tag
    Environmental(String),
    /// Origin tag registered as an exempt damage type
    DamageType(String),
    /// Attacker or cause namespace registered as exempt
    ModId(String),
    /// Source looks like a projectile
    Projectile(String),
    /// Attacker weapon id starts with a registered prefix
    ItemPrefix(String),
}

impl fmt::Display for BypassReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BypassReason::Environmental(tag) => write!(f, "environmental ({tag})"),
            BypassReason::DamageType(id) => write!(f, "exempt damage type {id}"),
            BypassReason::ModId(namespace) => write!(f, "exempt mod {namespace}"),
            BypassReason::Projectile(hint) => write!(f, "projectile ({hint})"),
            BypassReason::ItemPrefix(prefix) => write!(f, "exempt item prefix {prefix}"),
        }
    }
}

/// Classifier over a shared [`BypassRegistry`]
#[derive(Debug, Clone)]
pub struct BypassClassifier {
    registry: Arc<BypassRegistry>,
}

impl BypassClassifier {
    pub fn new(registry: Arc<BypassRegistry>) -> Self {
        BypassClassifier { registry }
    }

    pub fn registry(&self) -> &Arc<BypassRegistry> {
        &self.registry
    }

    /// Whether the event skips the toughness system entirely
    pub fn is_exempt(&self, event: &DamageEvent) -> bool {
        self.classify(event).is_some()
    }

    /// The first matching exemption, if any
    pub fn classify(&self, event: &DamageEvent) -> Option<BypassReason> {
        let reason = environmental(event)
            .or_else(|| self.damage_type(event))
            .or_else(|| self.mod_id(event))
            .or_else(|| projectile(event))
            .or_else(|| self.item_prefix(event));

        if let Some(reason) = &reason {
            debug!(actor = %event.target, %reason, "damage bypasses toughness");
        }
        reason
    }

    fn damage_type(&self, event: &DamageEvent) -> Option<BypassReason> {
        event
            .origin_tags
            .iter()
            .find(|tag| self.registry.contains_damage_type(tag))
            .map(|tag| BypassReason::DamageType(tag.clone()))
    }

    fn mod_id(&self, event: &DamageEvent) -> Option<BypassReason> {
        event
            .sources()
            .map(|source| source.type_id.namespace())
            .find(|namespace| self.registry.contains_mod_id(namespace))
            .map(|namespace| BypassReason::ModId(namespace.to_string()))
    }

    fn item_prefix(&self, event: &DamageEvent) -> Option<BypassReason> {
        let weapon = event.weapon()?;
        self.registry
            .matching_item_prefix(&weapon.item_id)
            .map(BypassReason::ItemPrefix)
    }
}

fn environmental(event: &DamageEvent) -> Option<BypassReason> {
    event
        .origin_tags
        .iter()
        .find(|tag| is_environmental_tag(tag))
        .map(|tag| BypassReason::Environmental(tag.clone()))
}

fn is_environmental_tag(tag: &str) -> bool {
    let lower = tag.trim().to_ascii_lowercase();
    let path = lower.split_once(':').map(|(_, path)| path).unwrap_or(&lower);
    ENVIRONMENTAL_PATHS.contains(&path) || words(path).any(|word| word == VOID_MARKER)
}

/// Alphanumeric runs of an id path (`void_rift` -> `void`, `rift`)
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn projectile(event: &DamageEvent) -> Option<BypassReason> {
    if event.origin_tags.contains(PROJECTILE_TAG) {
        return Some(BypassReason::Projectile(PROJECTILE_TAG.to_string()));
    }
    // A melee attacker struck in person; only a separate cause can be a projectile
    let attacker = event.attacker.iter().filter(|_| !event.is_melee());
    event
        .cause
        .iter()
        .chain(attacker)
        .find_map(projectile_hint)
        .map(BypassReason::Projectile)
}

/// The first type path, class name or tag of `source` naming a projectile
fn projectile_hint(source: &SourceActor) -> Option<String> {
    let ids = std::iter::once(source.type_id.path()).chain(source.tags.iter().map(String::as_str));
    for id in ids {
        let lower = id.to_ascii_lowercase();
        if words(&lower).any(|word| PROJECTILE_KEYWORDS.contains(&word)) {
            return Some(id.to_string());
        }
    }

    let class_name = source.class_name.as_deref()?;
    let lower = class_name.to_ascii_lowercase();
    PROJECTILE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
        .then(|| class_name.to_string())
}
