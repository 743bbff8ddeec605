//! Toughness - The secondary defense pool in front of health
//!
//! - `state`: one actor's pool and its Intact/Broken status
//! - `store`: pools of every eligible actor
//! - `overrides`: per-type max health / max toughness / colors
//! - `hud`: bar snapshots for rendering

mod hud;
mod overrides;
mod state;
mod store;

pub use hud::ToughnessBar;
pub use overrides::OverrideRegistry;
pub use state::{ToughnessState, ToughnessStatus};
pub use store::{ReduceOutcome, ToughnessStore};

/// Category defaults used when no override exists
pub mod constants {
    /// Max toughness of boss-like actors
    pub const BOSS_TOUGHNESS: f32 = 200.0;
    /// Max toughness of hostile actors
    pub const HOSTILE_TOUGHNESS: f32 = 100.0;
}
