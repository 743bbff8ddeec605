//! toughness_core - Secondary defense pools for game actors
//!
//! This library provides:
//! - ToughnessStore: Per-actor toughness pools with an Intact/Broken lifecycle
//! - ColorDistribution: Colored segmentation of a toughness bar
//! - ToughnessCapability: Which weapons can break which bars
//! - BypassClassifier: Damage that ignores toughness entirely
//! - DamageResolver: The per-hit pipeline tying it all together
//! - ScriptApi: String-keyed access to the override and bypass registries

pub mod actor;
pub mod bypass;
pub mod color;
pub mod combat;
pub mod config;
pub mod damage;
pub mod defense;
pub mod distribution;
pub mod prelude;
pub mod script;
pub mod toughness;
pub mod types;
pub mod weapon;

mod locks;

// Re-export core types for convenience
pub use actor::{Actor, Combatant};
pub use bypass::{BypassClassifier, BypassReason, BypassRegistry};
pub use color::ToughnessColor;
pub use combat::{DamageOutcome, DamageResolver, PassthroughReason, Resolution};
pub use config::{default_config, ConfigError, ToughnessConfig};
pub use damage::{BaseDamage, DamageEvent, SourceActor};
pub use defense::{reduction_pct, ReductionPolicy};
pub use distribution::ColorDistribution;
pub use script::ScriptApi;
pub use toughness::{OverrideRegistry, ToughnessBar, ToughnessState, ToughnessStatus, ToughnessStore};
pub use types::{ActorCategory, ActorId, ActorTypeId};
pub use weapon::{ToughnessCapability, Weapon};
