//! Drawing surfaces.
//!
//! The generator only needs a handful of operations from whatever it draws
//! onto: its size, clearing, filling a closed outline, and laying down the
//! stitch background. [`Surface`] captures exactly that, and
//! [`PixmapSurface`] implements it on a tiny-skia raster.
//!
//! ## Rust Lesson #9: Traits as seams
//!
//! A trait is an interface. The animation code is generic over
//! `S: Surface`, so tests can hand it a recording surface while the CLI
//! hands it a real pixmap, with no dynamic dispatch in between.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, Rect, SpreadMode, Stroke,
    Transform,
};
use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::stitch::Stitch;

/// How a fill combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Darken by multiplying channels, so overlapping washes deepen
    #[default]
    Multiply,
    /// Plain source-over painting
    Normal,
}

impl BlendMode {
    fn to_skia(self) -> tiny_skia::BlendMode {
        match self {
            BlendMode::Multiply => tiny_skia::BlendMode::Multiply,
            BlendMode::Normal => tiny_skia::BlendMode::SourceOver,
        }
    }

    /// CSS `mix-blend-mode` keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            BlendMode::Multiply => "multiply",
            BlendMode::Normal => "normal",
        }
    }
}

/// The shared canvas every layer is painted onto.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Center of the surface, the origin all shapes are drawn around.
    fn center(&self) -> Point {
        Point::new(self.width() as f64 * 0.5, self.height() as f64 * 0.5)
    }

    /// Wipe the whole surface to `background`.
    fn clear(&mut self, background: Rgba);

    /// Fill the closed outline through `vertices`, translated by `origin`.
    fn fill_polygon(&mut self, vertices: &[Point], origin: Point, color: Rgba, blend: BlendMode);

    /// Cover the whole surface with the repeating stitch tile.
    fn fill_stitch(&mut self, stitch: &Stitch, blend: BlendMode);
}

// ============================================================================
// RASTER SURFACE
// ============================================================================

/// tiny-skia backed raster surface.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a `width` x `height` surface, cleared to transparent.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::surface(format!("cannot allocate a {}x{} pixmap", width, height))
        })?;
        debug!(width, height, "allocated pixmap surface");
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| Error::encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn skia_color(color: Rgba) -> Option<tiny_skia::Color> {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self, background: Rgba) {
        if let Some(color) = skia_color(background) {
            self.pixmap.fill(color);
        }
    }

    fn fill_polygon(&mut self, vertices: &[Point], origin: Point, color: Rgba, blend: BlendMode) {
        let Some((first, rest)) = vertices.split_first() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();

        // A lone move-to has no path to fill.
        let Some(path) = pb.finish() else {
            return;
        };
        let Some(color) = skia_color(color) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        paint.blend_mode = blend.to_skia();

        let transform = Transform::from_translate(origin.x as f32, origin.y as f32);
        self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn fill_stitch(&mut self, stitch: &Stitch, blend: BlendMode) {
        let Some(mut tile) = Pixmap::new(stitch.size, stitch.size) else {
            return;
        };
        let Some(color) = skia_color(stitch.color) else {
            return;
        };

        let mut pb = PathBuilder::new();
        for line in stitch.lines() {
            pb.move_to(line.x1 as f32, line.y1 as f32);
            pb.line_to(line.x2 as f32, line.y2 as f32);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut stroke_paint = Paint::default();
        stroke_paint.set_color(color);
        stroke_paint.anti_alias = true;
        let stroke = Stroke {
            width: stitch.line_width,
            ..Stroke::default()
        };
        tile.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);

        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) else {
            return;
        };

        let mut paint = Paint::default();
        paint.shader = Pattern::new(
            tile.as_ref(),
            SpreadMode::Repeat,
            FilterQuality::Nearest,
            1.0,
            Transform::identity(),
        );
        paint.blend_mode = blend.to_skia();

        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &PixmapSurface, x: u32, y: u32) -> [u8; 4] {
        let c = surface.pixmap().pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn zero_size_is_error() {
        assert!(PixmapSurface::new(0, 10).is_err());
    }

    #[test]
    fn center_is_half_size() {
        let surface = PixmapSurface::new(200, 100).unwrap();
        assert_eq!(surface.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn clear_fills_background() {
        let mut surface = PixmapSurface::new(8, 8).unwrap();
        surface.clear(Rgba::WHITE);
        assert_eq!(pixel(&surface, 3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn fill_is_translated_to_origin() {
        let mut surface = PixmapSurface::new(40, 40).unwrap();
        surface.clear(Rgba::WHITE);

        let square = [
            Point::new(-5.0, -5.0),
            Point::new(5.0, -5.0),
            Point::new(5.0, 5.0),
            Point::new(-5.0, 5.0),
        ];
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        surface.fill_polygon(&square, surface.center(), red, BlendMode::Normal);

        assert_eq!(pixel(&surface, 20, 20), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn multiply_darkens_overlaps() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.clear(Rgba::WHITE);

        let square = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 20.0),
            Point::new(0.0, 20.0),
        ];
        let grey = Rgba::new(0.5, 0.5, 0.5, 1.0);
        surface.fill_polygon(&square, Point::new(0.0, 0.0), grey, BlendMode::Multiply);
        let once = pixel(&surface, 10, 10)[0];
        surface.fill_polygon(&square, Point::new(0.0, 0.0), grey, BlendMode::Multiply);
        let twice = pixel(&surface, 10, 10)[0];

        assert!(twice < once, "{} should be darker than {}", twice, once);
    }

    #[test]
    fn degenerate_outline_is_ignored() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        surface.clear(Rgba::WHITE);
        surface.fill_polygon(&[], Point::new(5.0, 5.0), Rgba::BLACK, BlendMode::Normal);
        surface.fill_polygon(&[Point::new(1.0, 1.0)], Point::new(5.0, 5.0), Rgba::BLACK, BlendMode::Normal);
        assert_eq!(pixel(&surface, 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn stitch_marks_background() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.clear(Rgba::WHITE);
        let stitch = Stitch {
            color: Rgba::BLACK,
            ..Stitch::default()
        };
        surface.fill_stitch(&stitch, BlendMode::Normal);

        let touched = surface.to_rgba8().chunks(4).any(|px| px[0] < 255);
        assert!(touched);
    }

    #[test]
    fn png_has_signature() {
        let surface = PixmapSurface::new(4, 4).unwrap();
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
