//! Core identity types shared by every toughness subsystem

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace assumed for type ids written without one (`"zombie"`)
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Unique identity of a live actor in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        ActorId(id)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Namespaced actor type identifier, e.g. `minecraft:zombie`
///
/// Registry lookups key on this value, so it is normalized on construction:
/// surrounding whitespace is trimmed and the whole id is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ActorTypeId(String);

impl ActorTypeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        ActorTypeId(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The mod namespace (`minecraft` for `minecraft:zombie`)
    pub fn namespace(&self) -> &str {
        match self.0.split_once(':') {
            Some((namespace, _)) => namespace,
            None => DEFAULT_NAMESPACE,
        }
    }

    /// The path after the namespace (`zombie` for `minecraft:zombie`)
    pub fn path(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, path)) => path,
            None => &self.0,
        }
    }
}

impl From<&str> for ActorTypeId {
    fn from(s: &str) -> Self {
        ActorTypeId::new(s)
    }
}

impl From<String> for ActorTypeId {
    fn from(s: String) -> Self {
        ActorTypeId::new(s)
    }
}

impl From<ActorTypeId> for String {
    fn from(id: ActorTypeId) -> Self {
        id.0
    }
}

impl fmt::Display for ActorTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spawn category of an actor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorCategory {
    /// Monsters that attack on sight
    Hostile,
    /// Creatures that only retaliate
    Neutral,
    /// Farm animals and other harmless creatures
    Passive,
    /// Bats, fish and other decorative life
    Ambient,
    /// Anything that is not a creature (armor stands, minecarts, ...)
    Misc,
}

impl ActorCategory {
    /// Whether actors of this category carry toughness without an override
    pub fn has_default_toughness(&self) -> bool {
        matches!(self, ActorCategory::Hostile | ActorCategory::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_namespace_and_path() {
        let id = ActorTypeId::new("Minecraft:Zombie");
        assert_eq!(id.as_str(), "minecraft:zombie");
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "zombie");
    }

    #[test]
    fn test_type_id_without_namespace() {
        let id = ActorTypeId::new("  skeleton ");
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(id.path(), "skeleton");
    }

    #[test]
    fn test_default_toughness_categories() {
        assert!(ActorCategory::Hostile.has_default_toughness());
        assert!(ActorCategory::Neutral.has_default_toughness());
        assert!(!ActorCategory::Passive.has_default_toughness());
        assert!(!ActorCategory::Misc.has_default_toughness());
    }
}
