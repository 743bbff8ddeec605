//! Combatant - The facts the toughness engine needs from a world actor

use crate::types::{ActorCategory, ActorId, ActorTypeId};
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Anything that can take part in a fight
///
/// Implemented by the host's entity type. The engine only reads these facts
/// and writes health back through `set_health` / `set_max_health`; it never
/// raises new damage events through this trait.
pub trait Combatant {
    fn id(&self) -> ActorId;

    fn type_id(&self) -> &ActorTypeId;

    fn category(&self) -> ActorCategory;

    /// Player-controlled actors never carry toughness
    fn is_player(&self) -> bool;

    /// Whether the actor's type is tagged boss-like
    fn is_boss(&self) -> bool;

    fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Defense attribute, `None` if the actor has no such attribute
    fn defense(&self) -> Option<f32>;

    fn health(&self) -> f32;

    fn set_health(&mut self, health: f32);

    fn max_health(&self) -> f32;

    fn set_max_health(&mut self, max_health: f32);

    /// Weapon held in the main hand
    fn main_hand(&self) -> Option<&Weapon>;

    /// Stack count of the active strength-like buff (0 if none)
    fn strength_stacks(&self) -> u32 {
        0
    }

    /// Falling/airborne posture, used to detect critical hits
    fn is_falling(&self) -> bool {
        false
    }

    /// Implementation class name, when the host exposes one
    fn class_name(&self) -> Option<&str> {
        None
    }

    /// Free-form entity tags
    fn tags(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Plain-data actor used by tests, simulations and the TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub type_id: ActorTypeId,
    pub category: ActorCategory,
    pub is_player: bool,
    pub is_boss: bool,
    pub health: f32,
    pub max_health: f32,
    pub defense: Option<f32>,
    pub weapon: Option<Weapon>,
    pub strength_stacks: u32,
    pub falling: bool,
    pub class_name: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Actor {
    /// Create a full-health actor with 20 max health
    pub fn new(id: impl Into<ActorId>, type_id: impl Into<ActorTypeId>, category: ActorCategory) -> Self {
        Actor {
            id: id.into(),
            type_id: type_id.into(),
            category,
            is_player: false,
            is_boss: false,
            health: 20.0,
            max_health: 20.0,
            defense: None,
            weapon: None,
            strength_stacks: 0,
            falling: false,
            class_name: None,
            tags: BTreeSet::new(),
        }
    }

    /// Create a player actor
    pub fn player(id: impl Into<ActorId>) -> Self {
        let mut actor = Actor::new(id, "minecraft:player", ActorCategory::Misc);
        actor.is_player = true;
        actor
    }

    /// Set max and current health
    pub fn with_health(mut self, health: f32) -> Self {
        self.max_health = health.max(0.0);
        self.health = self.max_health;
        self
    }

    pub fn with_defense(mut self, defense: f32) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_strength(mut self, stacks: u32) -> Self {
        self.strength_stacks = stacks;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Mark the type as boss-like
    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    /// Health as a fraction of max health
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

impl Combatant for Actor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn type_id(&self) -> &ActorTypeId {
        &self.type_id
    }

    fn category(&self) -> ActorCategory {
        self.category
    }

    fn is_player(&self) -> bool {
        self.is_player
    }

    fn is_boss(&self) -> bool {
        self.is_boss
    }

    fn defense(&self) -> Option<f32> {
        self.defense
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn set_max_health(&mut self, max_health: f32) {
        self.max_health = max_health.max(0.0);
        self.health = self.health.min(self.max_health);
    }

    fn main_hand(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    fn strength_stacks(&self) -> u32 {
        self.strength_stacks
    }

    fn is_falling(&self) -> bool {
        self.falling
    }

    fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    fn tags(&self) -> BTreeSet<String> {
        self.tags.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamped() {
        let mut zombie = Actor::new(1, "minecraft:zombie", ActorCategory::Hostile).with_health(20.0);
        zombie.set_health(50.0);
        assert!((zombie.health() - 20.0).abs() < f32::EPSILON);
        zombie.set_health(-5.0);
        assert!((zombie.health() - 0.0).abs() < f32::EPSILON);
        assert!(!zombie.is_alive());
    }

    #[test]
    fn test_lower_max_health_caps_current() {
        let mut zombie = Actor::new(1, "minecraft:zombie", ActorCategory::Hostile).with_health(40.0);
        zombie.set_max_health(10.0);
        assert!((zombie.health() - 10.0).abs() < f32::EPSILON);
        assert!((zombie.health_fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_player_constructor() {
        let player = Actor::player(7);
        assert!(player.is_player());
        assert_eq!(player.type_id().as_str(), "minecraft:player");
    }
}
