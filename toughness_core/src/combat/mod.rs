//! Combat resolution - Route incoming hits through toughness

mod outcome;
mod resolver;

pub use outcome::{DamageOutcome, PassthroughReason, Resolution};
pub use resolver::DamageResolver;
