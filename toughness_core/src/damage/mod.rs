//! Damage events and base damage estimation

mod estimate;
mod event;

pub use estimate::{estimate_base_damage, is_critical, BaseDamage, CRITICAL_MARKER};
pub use event::{DamageEvent, SourceActor, MOB_ATTACK, PLAYER_ATTACK, PROJECTILE_TAG};
