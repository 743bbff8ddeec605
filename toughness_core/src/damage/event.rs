//! DamageEvent - One incoming hit as seen by the toughness engine

use crate::actor::Combatant;
use crate::types::{ActorId, ActorTypeId};
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Origin tag added when the damage came through a projectile
pub const PROJECTILE_TAG: &str = "is_projectile";
/// Damage type id of player melee hits
pub const PLAYER_ATTACK: &str = "minecraft:player_attack";
/// Damage type id of mob melee hits
pub const MOB_ATTACK: &str = "minecraft:mob_attack";

/// Snapshot of an actor involved in causing damage
///
/// Taken by the event-producing layer so the classifier and the pipeline
/// never have to probe live entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceActor {
    pub id: Option<ActorId>,
    pub type_id: ActorTypeId,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub strength_stacks: u32,
    #[serde(default)]
    pub falling: bool,
}

impl SourceActor {
    /// Source known only by its type (projectiles, area effects, ...)
    pub fn new(type_id: impl Into<ActorTypeId>) -> Self {
        SourceActor {
            id: None,
            type_id: type_id.into(),
            class_name: None,
            tags: BTreeSet::new(),
            weapon: None,
            strength_stacks: 0,
            falling: false,
        }
    }

    /// Snapshot a live combatant
    pub fn from_combatant<C: Combatant + ?Sized>(actor: &C) -> Self {
        SourceActor {
            id: Some(actor.id()),
            type_id: actor.type_id().clone(),
            class_name: actor.class_name().map(str::to_string),
            tags: actor.tags(),
            weapon: actor.main_hand().cloned(),
            strength_stacks: actor.strength_stacks(),
            falling: actor.is_falling(),
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }
}

/// A single incoming damage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Damage after the host applied its own multipliers
    pub raw_amount: f32,
    /// Actor being hit
    pub target: ActorId,
    /// Actor credited with the hit (the shooter for projectiles)
    #[serde(default)]
    pub attacker: Option<SourceActor>,
    /// Immediate cause when it differs from the attacker (the projectile)
    #[serde(default)]
    pub cause: Option<SourceActor>,
    /// Classification hints: damage type id, namespaces, item ids, markers
    #[serde(default)]
    pub origin_tags: BTreeSet<String>,
}

impl DamageEvent {
    /// Event with no known source
    pub fn new(target: ActorId, raw_amount: f32) -> Self {
        DamageEvent {
            raw_amount,
            target,
            attacker: None,
            cause: None,
            origin_tags: BTreeSet::new(),
        }
    }

    /// Melee hit from `attacker` with whatever it holds
    ///
    /// Only the melee damage type goes into `origin_tags`; the attacker and
    /// its weapon travel as typed data on the attacker snapshot.
    pub fn melee<A, T>(attacker: &A, target: &T, raw_amount: f32) -> Self
    where
        A: Combatant + ?Sized,
        T: Combatant + ?Sized,
    {
        let damage_type = if attacker.is_player() {
            PLAYER_ATTACK
        } else {
            MOB_ATTACK
        };
        DamageEvent::new(target.id(), raw_amount)
            .with_tag(damage_type)
            .with_attacker(SourceActor::from_combatant(attacker))
    }

    pub fn with_attacker(mut self, attacker: SourceActor) -> Self {
        self.attacker = Some(attacker);
        self
    }

    pub fn with_cause(mut self, cause: SourceActor) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.origin_tags.insert(tag.into());
        self
    }

    /// Attacker then cause, skipping missing ones
    pub fn sources(&self) -> impl Iterator<Item = &SourceActor> {
        self.attacker.iter().chain(self.cause.iter())
    }

    /// Weapon held by the credited attacker
    pub fn weapon(&self) -> Option<&Weapon> {
        self.attacker.as_ref().and_then(|a| a.weapon.as_ref())
    }

    /// Direct melee hit from the attacker itself
    pub fn is_melee(&self) -> bool {
        self.origin_tags.contains(PLAYER_ATTACK) || self.origin_tags.contains(MOB_ATTACK)
    }

    /// Whether any origin tag contains `needle`, ignoring ASCII case
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.origin_tags
            .iter()
            .any(|tag| tag.to_ascii_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::types::ActorCategory;

    #[test]
    fn test_melee_tags() {
        let player = Actor::player(1).with_weapon(Weapon::new("minecraft:iron_sword"));
        let zombie = Actor::new(2, "minecraft:zombie", ActorCategory::Hostile);

        let event = DamageEvent::melee(&player, &zombie, 6.0);
        assert_eq!(event.target, ActorId(2));
        assert!(event.is_melee());
        assert_eq!(event.origin_tags.len(), 1);
        assert!(event.origin_tags.contains(PLAYER_ATTACK));
        assert_eq!(
            event.weapon().map(|w| w.item_id.as_str()),
            Some("minecraft:iron_sword")
        );
    }

    #[test]
    fn test_mob_melee_tagged() {
        let skeleton = Actor::new(3, "minecraft:skeleton", ActorCategory::Hostile);
        let player = Actor::player(1);
        let event = DamageEvent::melee(&skeleton, &player, 2.0);
        assert!(event.origin_tags.contains(MOB_ATTACK));
        assert!(!event.origin_tags.contains("minecraft:skeleton"));
        assert!(!DamageEvent::new(ActorId(1), 2.0).is_melee());
    }

    #[test]
    fn test_sources_order() {
        let event = DamageEvent::new(ActorId(1), 4.0)
            .with_attacker(SourceActor::new("minecraft:skeleton"))
            .with_cause(SourceActor::new("minecraft:arrow"));
        let types: Vec<&str> = event.sources().map(|s| s.type_id.as_str()).collect();
        assert_eq!(types, vec!["minecraft:skeleton", "minecraft:arrow"]);
    }

    #[test]
    fn test_tag_search_ignores_case() {
        let event = DamageEvent::new(ActorId(1), 4.0).with_tag("epicfight:CRITICAL_hit");
        assert!(event.has_tag_containing("critical"));
        assert!(!event.has_tag_containing("void"));
    }
}
