//! Painting layers onto a surface.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::stitch::Stitch;
use crate::surface::{BlendMode, Surface};

/// Fill the closed outline through `vertices` with `color`.
///
/// Vertices are relative to the surface center. One call with a low-alpha
/// color barely registers; the texture comes from many overlapping calls.
pub fn draw_polygon<S: Surface + ?Sized>(surface: &mut S, vertices: &[Point], color: Rgba, blend: BlendMode) {
    let origin = surface.center();
    surface.fill_polygon(vertices, origin, color, blend);
}

/// Clear to `background`, then lay the stitch texture over it.
pub fn paint_background<S: Surface + ?Sized>(surface: &mut S, background: Rgba, stitch: &Stitch, blend: BlendMode) {
    surface.clear(background);
    surface.fill_stitch(stitch, blend);
}
