//! Recursive midpoint displacement for organic, hand-drawn outlines.
//!
//! Every pass inserts a displaced midpoint after each vertex, doubling the
//! vertex count. The displacement is gaussian in both axes and its scale
//! shrinks by `decay` on each further pass, so early passes bend the
//! overall shape and later ones only add fine roughness along the edge.
//!
//! # Example
//! ```
//! use inkwash::deform::DeformConfig;
//! use inkwash::rng::Sampler;
//! use inkwash::shapes::regular_polygon;
//! use inkwash::Point;
//!
//! let base = regular_polygon(Point::new(0.0, 0.0), 100.0, 12);
//! let mut sampler = Sampler::seeded(1);
//! let blob = DeformConfig::default().apply(&base, &mut sampler);
//! assert_eq!(blob.len(), 12 * 32);
//! ```

use rand::Rng;

use crate::geometry::{Point, Polygon, edges_of};
use crate::rng::Sampler;

/// Deepest `depth` a config may ask for. Each pass doubles the vertex
/// count, so this already yields 2^13 points per input vertex.
pub const MAX_DEPTH: u32 = 12;

/// Parameters for one deformation.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformConfig {
    /// Extra passes after the first one (0 = a single pass)
    pub depth: u32,
    /// Gaussian displacement scale for the first pass
    pub variance: f64,
    /// Divisor applied to `variance` before each further pass
    pub decay: f64,
}

impl Default for DeformConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            variance: 20.0,
            decay: 2.0,
        }
    }
}

impl DeformConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Deform `polygon` with these parameters.
    pub fn apply<R: Rng>(&self, polygon: &Polygon, sampler: &mut Sampler<R>) -> Polygon {
        Polygon::new(deform(&polygon.vertices, self.depth, self.variance, self.decay, sampler))
    }

    /// Number of vertices a deformation of `len` input vertices produces,
    /// or `None` when that count does not fit in a `usize`.
    pub fn output_len(&self, len: usize) -> Option<usize> {
        let factor = 1usize.checked_shl(self.depth.checked_add(1)?)?;
        len.checked_mul(factor)
    }
}

/// One displacement pass: each vertex followed by its displaced midpoint.
pub fn deform_once<R: Rng>(vertices: &[Point], variance: f64, sampler: &mut Sampler<R>) -> Vec<Point> {
    let mut out = Vec::with_capacity(vertices.len() * 2);

    for (from, to) in edges_of(vertices) {
        let mid = from.midpoint(to);
        let displaced = mid.offset(
            sampler.standard_normal() * variance,
            sampler.standard_normal() * variance,
        );

        out.push(from);
        out.push(displaced);
    }

    out
}

/// Apply `depth + 1` displacement passes to `vertices`.
///
/// The result has exactly `vertices.len() * 2^(depth + 1)` points, and the
/// input vertices keep their relative order at every `2^(depth + 1)`-th
/// position.
pub fn deform<R: Rng>(
    vertices: &[Point],
    depth: u32,
    variance: f64,
    decay: f64,
    sampler: &mut Sampler<R>,
) -> Vec<Point> {
    let mut current = deform_once(vertices, variance, sampler);
    let mut variance = variance;

    for _ in 0..depth {
        variance /= decay;
        current = deform_once(&current, variance, sampler);
    }

    current
}
