//! ToughnessState - Per-actor toughness pool

use crate::distribution::ColorDistribution;
use serde::{Deserialize, Serialize};

/// Lifecycle of an initialized pool
///
/// Damage never leaves `Broken`. Only re-initialization with a positive
/// max brings the pool back to `Intact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToughnessStatus {
    Intact,
    Broken,
}

/// Toughness pool of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToughnessState {
    current: f32,
    max: f32,
    status: ToughnessStatus,
    distribution: ColorDistribution,
}

impl ToughnessState {
    /// A full, intact pool
    pub fn new(max: f32, distribution: ColorDistribution) -> Self {
        let max = sanitize(max);
        ToughnessState {
            current: max,
            max,
            status: ToughnessStatus::Intact,
            distribution,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn status(&self) -> ToughnessStatus {
        self.status
    }

    pub fn is_broken(&self) -> bool {
        self.status == ToughnessStatus::Broken
    }

    pub fn distribution(&self) -> &ColorDistribution {
        &self.distribution
    }

    /// `current / max` in [0, 1], 0 when there is no pool
    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Change `max` while keeping the fill percentage
    ///
    /// A pool that previously had no capacity starts full.
    pub(crate) fn rescale(&mut self, new_max: f32) {
        let new_max = sanitize(new_max);
        self.current = if self.max > 0.0 {
            self.percentage() * new_max
        } else {
            new_max
        };
        self.max = new_max;
        self.current = self.current.clamp(0.0, self.max);
    }

    /// Leave `Broken` with a full pool of `max`
    ///
    /// Returns false and stays broken when `max` is not positive.
    pub(crate) fn rearm(&mut self, max: f32) -> bool {
        let max = sanitize(max);
        if max <= 0.0 {
            return false;
        }
        self.max = max;
        self.current = max;
        self.status = ToughnessStatus::Intact;
        true
    }

    pub(crate) fn set_distribution(&mut self, distribution: ColorDistribution) {
        self.distribution = distribution;
    }

    /// Drain `amount` from the pool
    ///
    /// Returns true if this call emptied the pool and broke it. No-op once
    /// broken or for non-positive amounts.
    pub(crate) fn drain(&mut self, amount: f32) -> bool {
        if self.is_broken() || amount.is_nan() || amount <= 0.0 {
            return false;
        }
        let was_positive = self.current > 0.0;
        self.current = (self.current - amount).clamp(0.0, self.max);
        if was_positive && self.current <= 0.0 {
            self.current = 0.0;
            self.status = ToughnessStatus::Broken;
            return true;
        }
        false
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_full_and_intact() {
        let state = ToughnessState::new(100.0, ColorDistribution::default());
        assert!((state.current() - 100.0).abs() < f32::EPSILON);
        assert_eq!(state.status(), ToughnessStatus::Intact);
        assert!((state.percentage() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_drain_to_broken() {
        let mut state = ToughnessState::new(10.0, ColorDistribution::default());
        assert!(!state.drain(4.0));
        assert!((state.current() - 6.0).abs() < f32::EPSILON);

        assert!(state.drain(100.0));
        assert!(state.is_broken());
        assert!((state.current() - 0.0).abs() < f32::EPSILON);

        // Terminal: further drains do nothing and never report a new break
        assert!(!state.drain(5.0));
        assert!(state.is_broken());
    }

    #[test]
    fn test_drain_ignores_non_positive() {
        let mut state = ToughnessState::new(10.0, ColorDistribution::default());
        assert!(!state.drain(0.0));
        assert!(!state.drain(-3.0));
        assert!(!state.drain(f32::NAN));
        assert!((state.current() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rescale_preserves_percentage() {
        let mut state = ToughnessState::new(100.0, ColorDistribution::default());
        state.drain(25.0);
        state.rescale(200.0);
        assert!((state.current() - 150.0).abs() < 1e-4);
        assert!((state.percentage() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_rescale_from_empty_pool_starts_full() {
        let mut state = ToughnessState::new(0.0, ColorDistribution::default());
        state.rescale(50.0);
        assert!((state.current() - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rescale_keeps_broken_empty() {
        let mut state = ToughnessState::new(10.0, ColorDistribution::default());
        state.drain(10.0);
        state.rescale(100.0);
        assert!(state.is_broken());
        assert!((state.current() - 0.0).abs() < f32::EPSILON);
    }
}
