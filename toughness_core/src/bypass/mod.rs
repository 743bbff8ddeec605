//! Bypass - Damage that never interacts with toughness
//!
//! The registry holds the configurable exemptions; the classifier walks an
//! event through the fixed evaluation order and names the first match.

mod classifier;
mod registry;

pub use classifier::{BypassClassifier, BypassReason, ENVIRONMENTAL_PATHS, PROJECTILE_KEYWORDS, VOID_MARKER};
pub use registry::BypassRegistry;
