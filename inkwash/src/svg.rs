//! SVG recording surface.
//!
//! Records every fill as a `<path>` instead of rasterizing it, so a whole
//! run can be exported as vector art (and so tests can count draws).
//! Multiply blending maps onto CSS `mix-blend-mode`.

use std::fmt::Write as _;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::stitch::Stitch;
use crate::surface::{BlendMode, Surface};

/// Surface that accumulates SVG markup.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    background: Rgba,
    defs: String,
    body: Vec<String>,
    fills: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Rgba::TRANSPARENT,
            defs: String::new(),
            body: Vec::new(),
            fills: 0,
        }
    }

    /// Number of polygon fills recorded since the last clear.
    pub fn fill_count(&self) -> usize {
        self.fills
    }

    /// Whether a stitch background has been laid since the last clear.
    pub fn has_stitch(&self) -> bool {
        !self.defs.is_empty()
    }

    pub fn to_svg_string(&self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
            self.width, self.height, self.width, self.height
        ));

        if !self.defs.is_empty() {
            svg.push_str("<defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("</defs>\n");
        }

        if self.background.a > 0.0 {
            svg.push_str(&format!(
                "<rect width=\"100%\" height=\"100%\" {}/>\n",
                paint_attrs("fill", self.background)
            ));
        }

        for element in &self.body {
            svg.push_str(element);
        }

        svg.push_str("</svg>\n");
        svg
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }
}

/// `fill="rgb(..)" fill-opacity=".."` (or the stroke equivalents).
fn paint_attrs(kind: &str, color: Rgba) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("{kind}=\"rgb({r},{g},{b})\" {kind}-opacity=\"{}\"", color.a)
}

fn blend_style(blend: BlendMode) -> String {
    match blend {
        BlendMode::Normal => String::new(),
        other => format!(" style=\"mix-blend-mode:{}\"", other.css_name()),
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, background: Rgba) {
        self.background = background;
        self.defs.clear();
        self.body.clear();
        self.fills = 0;
    }

    fn fill_polygon(&mut self, vertices: &[Point], origin: Point, color: Rgba, blend: BlendMode) {
        if vertices.len() < 2 {
            return;
        }

        // Build points string: "M x0,y0 L x1,y1 ... Z"
        let mut d = String::with_capacity(vertices.len() * 16);
        for (i, p) in vertices.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.2},{:.2} ", cmd, p.x, p.y);
        }
        d.push('Z');

        self.body.push(format!(
            "<path d=\"{}\" transform=\"translate({:.2},{:.2})\" {}{}/>\n",
            d,
            origin.x,
            origin.y,
            paint_attrs("fill", color),
            blend_style(blend)
        ));
        self.fills += 1;
    }

    fn fill_stitch(&mut self, stitch: &Stitch, blend: BlendMode) {
        let [a, b] = stitch.lines();
        self.defs = format!(
            "<pattern id=\"stitch\" width=\"{s}\" height=\"{s}\" patternUnits=\"userSpaceOnUse\">\
<path d=\"M{},{} L{},{} M{},{} L{},{}\" {} stroke-width=\"{}\" fill=\"none\"/></pattern>\n",
            a.x1,
            a.y1,
            a.x2,
            a.y2,
            b.x1,
            b.y1,
            b.x2,
            b.y2,
            paint_attrs("stroke", stitch.color),
            stitch.line_width,
            s = stitch.size,
        );
        self.body.push(format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"url(#stitch)\"{}/>\n",
            blend_style(blend)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)]
    }

    #[test]
    fn records_fills_with_blend() {
        let mut svg = SvgSurface::new(100, 50);
        svg.fill_polygon(&triangle(), svg.center(), Rgba::new(1.0, 0.0, 0.5, 0.006), BlendMode::Multiply);

        let out = svg.to_svg_string();
        assert_eq!(svg.fill_count(), 1);
        assert!(out.contains("<svg"));
        assert!(out.contains("M0.00,0.00 L10.00,0.00 L5.00,8.00 Z"));
        assert!(out.contains("translate(50.00,25.00)"));
        assert!(out.contains("mix-blend-mode:multiply"));
        assert!(out.contains("fill-opacity=\"0.006\""));
        assert!(out.ends_with("</svg>\n"));
    }

    #[test]
    fn normal_blend_has_no_style() {
        let mut svg = SvgSurface::new(10, 10);
        svg.fill_polygon(&triangle(), Point::new(0.0, 0.0), Rgba::BLACK, BlendMode::Normal);
        assert!(!svg.to_svg_string().contains("mix-blend-mode"));
    }

    #[test]
    fn stitch_becomes_pattern() {
        let mut svg = SvgSurface::new(10, 10);
        svg.fill_stitch(&Stitch::default(), BlendMode::Multiply);

        let out = svg.to_svg_string();
        assert!(svg.has_stitch());
        assert!(out.contains("<pattern id=\"stitch\" width=\"5\" height=\"5\""));
        assert!(out.contains("url(#stitch)"));
    }

    #[test]
    fn clear_discards_everything() {
        let mut svg = SvgSurface::new(10, 10);
        svg.fill_stitch(&Stitch::default(), BlendMode::Normal);
        svg.fill_polygon(&triangle(), Point::new(0.0, 0.0), Rgba::BLACK, BlendMode::Normal);
        svg.clear(Rgba::WHITE);

        assert_eq!(svg.fill_count(), 0);
        assert!(!svg.has_stitch());
        assert!(svg.to_svg_string().contains("fill=\"rgb(255,255,255)\""));
    }
}
