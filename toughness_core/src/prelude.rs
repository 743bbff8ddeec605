//! Prelude module for convenient imports
//!
//! ```rust
//! use toughness_core::prelude::*;
//! ```

// Actors and weapons
pub use crate::actor::{Actor, Combatant};
pub use crate::types::{ActorCategory, ActorId, ActorTypeId};
pub use crate::weapon::{ToughnessCapability, Weapon};

// Toughness
pub use crate::color::ToughnessColor;
pub use crate::distribution::ColorDistribution;
pub use crate::toughness::{OverrideRegistry, ToughnessBar, ToughnessStore};

// Damage and combat
pub use crate::bypass::{BypassClassifier, BypassRegistry};
pub use crate::combat::{DamageOutcome, DamageResolver, Resolution};
pub use crate::damage::{DamageEvent, SourceActor};
pub use crate::defense::ReductionPolicy;

// Config
pub use crate::config::{default_config, load_config, ToughnessConfig};
pub use crate::script::ScriptApi;
