//! Defense - Scaling toughness damage by the target's defense attribute

mod reduction;

pub use reduction::{reduction_pct, PolicyError, ReductionPolicy};

/// Defense calculation constants
pub mod constants {
    /// Defense value at which the maximum reduction percentage is reached
    pub const DEFENSE_CAP: f32 = 20.0;

    /// Default share of base damage dealt to toughness at zero defense
    pub const DEFAULT_MIN_PCT: f32 = 0.10;

    /// Default share of base damage dealt to toughness at capped defense
    pub const DEFAULT_MAX_PCT: f32 = 0.35;
}
