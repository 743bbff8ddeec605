//! Toughness colors - the fixed palette a toughness bar is segmented into

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven toughness colors
///
/// Variants are declared alphabetically so the derived `Ord` sorts by name,
/// which keeps map iteration deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToughnessColor {
    Black,
    Blue,
    Green,
    Orange,
    Red,
    White,
    Yellow,
}

impl ToughnessColor {
    /// Get all colors in name order
    pub fn all() -> &'static [ToughnessColor] {
        &[
            ToughnessColor::Black,
            ToughnessColor::Blue,
            ToughnessColor::Green,
            ToughnessColor::Orange,
            ToughnessColor::Red,
            ToughnessColor::White,
            ToughnessColor::Yellow,
        ]
    }

    /// Lowercase name used in config files and weapon tags
    pub fn name(&self) -> &'static str {
        match self {
            ToughnessColor::Black => "black",
            ToughnessColor::Blue => "blue",
            ToughnessColor::Green => "green",
            ToughnessColor::Orange => "orange",
            ToughnessColor::Red => "red",
            ToughnessColor::White => "white",
            ToughnessColor::Yellow => "yellow",
        }
    }

    /// Canonical display color as `0xRRGGBB`
    pub fn rgb(&self) -> u32 {
        match self {
            ToughnessColor::Black => 0x1E1E1E,
            ToughnessColor::Blue => 0x3C78FF,
            ToughnessColor::Green => 0x3CC85A,
            ToughnessColor::Orange => 0xFF9628,
            ToughnessColor::Red => 0xE63232,
            ToughnessColor::White => 0xF0F0F0,
            ToughnessColor::Yellow => 0xFFDC32,
        }
    }

    /// Display color split into `(r, g, b)` channels
    pub fn rgb_channels(&self) -> (u8, u8, u8) {
        let rgb = self.rgb();
        (((rgb >> 16) & 0xFF) as u8, ((rgb >> 8) & 0xFF) as u8, (rgb & 0xFF) as u8)
    }

    /// Lenient lookup for untrusted input; `None` for unknown names
    pub fn parse(name: &str) -> Option<ToughnessColor> {
        let name = name.trim();
        ToughnessColor::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ToughnessColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for color names that match none of the palette entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown toughness color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for ToughnessColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToughnessColor::parse(s).ok_or_else(|| UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sorted_by_name() {
        let names: Vec<&str> = ToughnessColor::all().iter().map(|c| c.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let mut colors = ToughnessColor::all().to_vec();
        colors.sort();
        assert_eq!(colors, ToughnessColor::all());
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(ToughnessColor::parse("RED"), Some(ToughnessColor::Red));
        assert_eq!(ToughnessColor::parse(" orange "), Some(ToughnessColor::Orange));
        assert_eq!(ToughnessColor::parse("purple"), None);
        assert!("purple".parse::<ToughnessColor>().is_err());
    }

    #[test]
    fn test_rgb_channels() {
        assert_eq!(ToughnessColor::Red.rgb_channels(), (0xE6, 0x32, 0x32));
    }
}
