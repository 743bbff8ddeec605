//! ToughnessBar - What a HUD needs to draw one actor's bar

use super::state::ToughnessState;
use crate::color::ToughnessColor;
use serde::{Deserialize, Serialize};

/// Snapshot of a toughness bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToughnessBar {
    /// Fill fraction in [0, 1]
    pub percentage: f32,
    pub broken: bool,
    /// (color, fraction of the bar) in color order
    pub segments: Vec<(ToughnessColor, f32)>,
}

impl ToughnessBar {
    pub fn from_state(state: &ToughnessState) -> Self {
        ToughnessBar {
            percentage: state.percentage(),
            broken: state.is_broken(),
            segments: state.distribution().iter().collect(),
        }
    }

    /// Split `width` cells across the segments
    ///
    /// Rounding leftovers go to the last segment so the widths always add
    /// up to `width`.
    pub fn segment_widths(&self, width: u16) -> Vec<(ToughnessColor, u16)> {
        let mut widths = Vec::with_capacity(self.segments.len());
        let mut used: u16 = 0;
        for (i, (color, fraction)) in self.segments.iter().enumerate() {
            let cells = if i + 1 == self.segments.len() {
                width.saturating_sub(used)
            } else {
                let cells = (f32::from(width) * fraction).round() as u16;
                cells.min(width.saturating_sub(used))
            };
            used += cells;
            widths.push((*color, cells));
        }
        widths
    }
}
