//! Background "stitch" texture: a tiny tile holding two crossing
//! diagonals, repeated over the whole surface as faint cross-hatching.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::Line;

/// Cross-hatch tile settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stitch {
    /// Tile edge length in surface units
    pub size: u32,
    /// Stroke color for both diagonals
    pub color: Rgba,
    /// Stroke width
    pub line_width: f32,
}

impl Default for Stitch {
    fn default() -> Self {
        Self {
            size: 5,
            color: Rgba::from_rgba8(220, 220, 220, 0.1),
            line_width: 1.0,
        }
    }
}

impl Stitch {
    /// The two diagonals of one tile, top-left to bottom-right first.
    pub fn lines(&self) -> [Line; 2] {
        let s = self.size as f64;
        [Line::new(0.0, 0.0, s, s), Line::new(0.0, s, s, 0.0)]
    }
}
