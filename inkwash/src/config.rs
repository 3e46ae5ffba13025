//! Generation settings and viewport layout.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```yaml
//! seeds: 4
//! palette:
//!   - "hsla(30, 100%, 50%, 0.01)"
//!   - "hsla(200, 80%, 40%, 0.01)"
//! seed: 7
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Palette, Rgba};
use crate::deform::{DeformConfig, MAX_DEPTH};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::stitch::Stitch;
use crate::surface::BlendMode;

/// Everything that shapes one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corners of each base polygon
    pub edges: usize,
    /// Number of base polygons (layers)
    pub seeds: usize,
    /// Extra deformation passes after the first
    pub depth: u32,
    /// Displacement scale of the first deformation pass
    pub variance: f64,
    /// Variance divisor per pass when building base polygons
    pub seed_decay: f64,
    /// Variance divisor per pass when re-deforming during animation
    pub frame_decay: f64,
    /// `[min, max]` added to `variance` for every animated draw
    pub variance_jitter: [f64; 2],
    /// `[min, max]` added to the base radius for every base polygon
    pub radius_jitter: [f64; 2],
    /// Draws per base polygon per frame
    pub interleave: u32,
    /// Draws per base polygon for the whole run
    pub total: u32,
    /// Upper bound for the base radius
    pub radius_cap: f64,
    /// Layer colors, cycled by base polygon index
    pub palette: Palette,
    pub blend: BlendMode,
    pub background: Rgba,
    pub stitch: Stitch,
    /// Fixed seed for reproducible runs (None = fresh entropy)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edges: 12,
            seeds: 3,
            depth: 4,
            variance: 20.0,
            seed_decay: 2.0,
            frame_decay: 4.0,
            variance_jitter: [20.0, 15.0],
            radius_jitter: [-15.0, 15.0],
            interleave: 5,
            total: 200,
            radius_cap: 150.0,
            palette: Palette::default(),
            blend: BlendMode::Multiply,
            background: Rgba::WHITE,
            stitch: Stitch::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.edges < 3 {
            return Err(Error::config(format!("edges must be at least 3, got {}", self.edges)));
        }
        if self.depth > MAX_DEPTH {
            return Err(Error::config(format!(
                "depth must be at most {}, got {}",
                MAX_DEPTH, self.depth
            )));
        }
        if self.seeds == 0 {
            return Err(Error::config("seeds must be at least 1"));
        }
        if self.interleave == 0 {
            return Err(Error::config("interleave must be at least 1"));
        }
        if self.palette.is_empty() {
            return Err(Error::config("palette must contain at least one color"));
        }
        if self.stitch.size == 0 {
            return Err(Error::config("stitch size must be at least 1"));
        }
        Ok(())
    }

    /// Fix the seed, drawing one from entropy if none is set, and return
    /// it. Every animator built from the config afterwards replays the
    /// same run.
    pub fn resolve_seed(&mut self) -> u64 {
        *self.seed.get_or_insert_with(rand::random)
    }

    /// Deformation applied once to each freshly built base polygon.
    pub fn seed_deform(&self) -> DeformConfig {
        DeformConfig::default()
            .with_depth(self.depth)
            .with_variance(self.variance)
            .with_decay(self.seed_decay)
    }

    /// Frames a full run takes: `total / interleave`, rounded up.
    pub fn frames_per_run(&self) -> u32 {
        self.total.div_ceil(self.interleave.max(1))
    }
}

/// Placement derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Point,
    /// Base polygon radius
    pub radius: f64,
}

impl Layout {
    /// Center of the viewport, radius a quarter of its smaller side but
    /// never above `radius_cap`.
    pub fn from_viewport(width: u32, height: u32, radius_cap: f64) -> Self {
        let center = Point::new(width as f64 * 0.5, height as f64 * 0.5);
        let radius = (center.x.min(center.y) * 0.5).min(radius_cap);
        Self { center, radius }
    }
}
