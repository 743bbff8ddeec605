//! ColorDistribution - How a toughness pool is split into colored bands

use crate::color::ToughnessColor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Weights whose positive sum is this close to 1.0 are kept verbatim
pub const NORMALIZED_TOLERANCE: f64 = 1e-4;

/// Normalized mapping from color to fraction of the toughness bar
///
/// Invariants: at least one entry, every fraction in (0, 1], fractions sum
/// to 1.0 within [`NORMALIZED_TOLERANCE`]. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ToughnessColor, f32>", into = "BTreeMap<ToughnessColor, f32>")]
pub struct ColorDistribution {
    fractions: BTreeMap<ToughnessColor, f32>,
}

impl ColorDistribution {
    /// A bar made of a single color
    pub fn single(color: ToughnessColor) -> Self {
        let mut fractions = BTreeMap::new();
        fractions.insert(color, 1.0);
        ColorDistribution { fractions }
    }

    /// Build from raw (non-normalized) weights
    ///
    /// Non-positive and non-finite weights are dropped, repeated colors are
    /// summed. With nothing left the distribution collapses to single White.
    pub fn multi<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (ToughnessColor, f32)>,
    {
        let mut positive: BTreeMap<ToughnessColor, f64> = BTreeMap::new();
        for (color, weight) in weights {
            if weight.is_finite() && weight > 0.0 {
                *positive.entry(color).or_insert(0.0) += weight as f64;
            }
        }

        let total: f64 = positive.values().sum();
        if positive.is_empty() || total <= 0.0 || !total.is_finite() {
            return ColorDistribution::default();
        }

        let already_normalized = (total - 1.0).abs() <= NORMALIZED_TOLERANCE;
        let fractions = positive
            .into_iter()
            .map(|(color, weight)| {
                let fraction = if already_normalized { weight } else { weight / total };
                (color, fraction as f32)
            })
            .filter(|(_, fraction)| *fraction > 0.0)
            .collect();

        ColorDistribution { fractions }
    }

    /// Build from color names as they appear in config files and scripts
    ///
    /// Unknown names are skipped; if none survive the result is single White.
    pub fn from_named<'a, I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let parsed: Vec<(ToughnessColor, f32)> = weights
            .into_iter()
            .filter_map(|(name, weight)| match ToughnessColor::parse(name) {
                Some(color) => Some((color, weight)),
                None => {
                    warn!(color = name, "ignoring unknown toughness color");
                    None
                }
            })
            .collect();
        ColorDistribution::multi(parsed)
    }

    /// Single-color bar from a name, White if the name is unknown
    pub fn single_named(name: &str) -> Self {
        match ToughnessColor::parse(name) {
            Some(color) => ColorDistribution::single(color),
            None => {
                warn!(color = name, "unknown toughness color, falling back to white");
                ColorDistribution::default()
            }
        }
    }

    /// Fraction of the bar taken by `color` (0 if absent)
    pub fn fraction_of(&self, color: ToughnessColor) -> f32 {
        self.fractions.get(&color).copied().unwrap_or(0.0)
    }

    /// Set of colors present in the bar
    pub fn colors(&self) -> BTreeSet<ToughnessColor> {
        self.fractions.keys().copied().collect()
    }

    /// Whether `color` has a band in this bar
    pub fn contains(&self, color: ToughnessColor) -> bool {
        self.fractions.contains_key(&color)
    }

    /// Iterate `(color, fraction)` in color-name order
    pub fn iter(&self) -> impl Iterator<Item = (ToughnessColor, f32)> + '_ {
        self.fractions.iter().map(|(c, f)| (*c, *f))
    }

    /// Number of colored bands
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    /// Whether the bar is a single band
    pub fn is_single(&self) -> bool {
        self.fractions.len() == 1
    }

    /// Largest band (ties resolve to the first color by name)
    pub fn dominant(&self) -> ToughnessColor {
        let mut best = (ToughnessColor::White, f32::MIN);
        for (color, fraction) in self.iter() {
            if fraction > best.1 {
                best = (color, fraction);
            }
        }
        best.0
    }
}

impl Default for ColorDistribution {
    fn default() -> Self {
        ColorDistribution::single(ToughnessColor::White)
    }
}

impl From<BTreeMap<ToughnessColor, f32>> for ColorDistribution {
    fn from(weights: BTreeMap<ToughnessColor, f32>) -> Self {
        ColorDistribution::multi(weights)
    }
}

impl From<ColorDistribution> for BTreeMap<ToughnessColor, f32> {
    fn from(distribution: ColorDistribution) -> Self {
        distribution.fractions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sum(distribution: &ColorDistribution) -> f32 {
        distribution.iter().map(|(_, f)| f).sum()
    }

    #[test]
    fn test_single() {
        let d = ColorDistribution::single(ToughnessColor::Red);
        assert_eq!(d.fraction_of(ToughnessColor::Red), 1.0);
        for color in ToughnessColor::all() {
            if *color != ToughnessColor::Red {
                assert_eq!(d.fraction_of(*color), 0.0);
            }
        }
        assert!(d.is_single());
    }

    #[test]
    fn test_empty_and_negative_fall_back_to_white() {
        let white = ColorDistribution::single(ToughnessColor::White);
        assert_eq!(ColorDistribution::multi(Vec::new()), white);
        assert_eq!(ColorDistribution::multi(vec![(ToughnessColor::Red, -1.0)]), white);
        assert_eq!(ColorDistribution::multi(vec![(ToughnessColor::Red, f32::NAN)]), white);
    }

    #[test]
    fn test_already_normalized_weights_kept_exactly() {
        let d = ColorDistribution::multi(vec![
            (ToughnessColor::Orange, 0.4),
            (ToughnessColor::Yellow, 0.3),
            (ToughnessColor::Green, 0.2),
            (ToughnessColor::White, 0.1),
        ]);
        assert_eq!(d.fraction_of(ToughnessColor::Orange), 0.4);
        assert_eq!(d.colors().len(), 4);
        assert!((sum(&d) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_raw_weights_normalized() {
        let d = ColorDistribution::multi(vec![
            (ToughnessColor::Red, 3.0),
            (ToughnessColor::Blue, 1.0),
            (ToughnessColor::Green, 0.0),
        ]);
        assert!((d.fraction_of(ToughnessColor::Red) - 0.75).abs() < 1e-6);
        assert!((d.fraction_of(ToughnessColor::Blue) - 0.25).abs() < 1e-6);
        assert!(!d.contains(ToughnessColor::Green));
        assert_eq!(d.dominant(), ToughnessColor::Red);
    }

    #[test]
    fn test_repeated_colors_summed() {
        let d = ColorDistribution::multi(vec![
            (ToughnessColor::Red, 1.0),
            (ToughnessColor::Red, 1.0),
            (ToughnessColor::Blue, 2.0),
        ]);
        assert!((d.fraction_of(ToughnessColor::Red) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_named_skips_unknown() {
        let d = ColorDistribution::from_named(vec![("red", 1.0), ("mauve", 5.0)]);
        assert_eq!(d, ColorDistribution::single(ToughnessColor::Red));

        let d = ColorDistribution::from_named(vec![("mauve", 5.0)]);
        assert_eq!(d, ColorDistribution::default());

        assert_eq!(ColorDistribution::single_named("nope"), ColorDistribution::default());
        assert_eq!(
            ColorDistribution::single_named("Blue"),
            ColorDistribution::single(ToughnessColor::Blue)
        );
    }

    #[test]
    fn test_json_round_trip_normalizes() {
        let d: ColorDistribution = serde_json::from_str(r#"{"red": 2.0, "blue": 2.0}"#).unwrap();
        assert!((d.fraction_of(ToughnessColor::Red) - 0.5).abs() < 1e-6);

        let json = serde_json::to_string(&d).unwrap();
        let back: ColorDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    fn any_color() -> impl Strategy<Value = ToughnessColor> {
        prop::sample::select(ToughnessColor::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_multi_sums_to_one(weights in prop::collection::vec((any_color(), -5.0f32..100.0), 0..12)) {
            let d = ColorDistribution::multi(weights);
            prop_assert!(!d.is_empty());
            prop_assert!((sum(&d) - 1.0).abs() <= 1e-4);
            for (_, fraction) in d.iter() {
                prop_assert!(fraction > 0.0 && fraction <= 1.0 + 1e-6);
            }
        }
    }
}
