//! Translucent colors and layer palettes.
//!
//! Colors are parsed from CSS-like strings (`#rrggbb`, `#rrggbbaa`,
//! `rgb()`, `rgba()`, `hsl()`, `hsla()` and a few names) so configs can be
//! written the way a designer would write them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Straight-alpha color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Convert HSL (hue in degrees, saturation and lightness in `0..=1`).
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::new(r + m, g + m, b + m, alpha)
    }

    /// Channels as 8-bit values, alpha included.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            trim_number(self.r * 255.0),
            trim_number(self.g * 255.0),
            trim_number(self.b * 255.0),
            trim_number(self.a),
        )
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        match lower.as_str() {
            "white" => return Ok(Rgba::WHITE),
            "black" => return Ok(Rgba::BLACK),
            "transparent" | "none" => return Ok(Rgba::TRANSPARENT),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::color(format!("invalid hex color '{}'", s)));
        }

        let Some((name, args)) = split_function(&lower) else {
            return Err(Error::color(format!("unrecognized color '{}'", s)));
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let bad = || Error::color(format!("invalid {}() color '{}'", name, s));

        match (name, parts.as_slice()) {
            ("rgb", [r, g, b]) | ("rgba", [r, g, b]) => {
                Ok(Rgba::new(channel(r).ok_or_else(bad)?, channel(g).ok_or_else(bad)?, channel(b).ok_or_else(bad)?, 1.0))
            }
            ("rgb", [r, g, b, a]) | ("rgba", [r, g, b, a]) => Ok(Rgba::new(
                channel(r).ok_or_else(bad)?,
                channel(g).ok_or_else(bad)?,
                channel(b).ok_or_else(bad)?,
                alpha(a).ok_or_else(bad)?,
            )),
            ("hsl", [h, sat, l]) | ("hsla", [h, sat, l]) => Ok(Rgba::from_hsla(
                number(h).ok_or_else(bad)?,
                percent(sat).ok_or_else(bad)?,
                percent(l).ok_or_else(bad)?,
                1.0,
            )),
            ("hsl", [h, sat, l, a]) | ("hsla", [h, sat, l, a]) => Ok(Rgba::from_hsla(
                number(h).ok_or_else(bad)?,
                percent(sat).ok_or_else(bad)?,
                percent(l).ok_or_else(bad)?,
                alpha(a).ok_or_else(bad)?,
            )),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Ordered layer colors, cycled by layer index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    pub colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Evenly saturated hues sharing one alpha.
    pub fn from_hues(hues: &[f32], alpha: f32) -> Self {
        Self::new(hues.iter().map(|&h| Rgba::from_hsla(h, 1.0, 0.5, alpha)).collect())
    }

    /// Color for layer `index`, wrapping around the palette.
    ///
    /// An empty palette falls back to transparent black, which draws nothing.
    pub fn layer(&self, index: usize) -> Rgba {
        if self.colors.is_empty() {
            return Rgba::TRANSPARENT;
        }
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hues(&[330.0, 210.0, 140.0, 0.0], 0.006)
    }
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

    match hex.len() {
        6 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        8 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
        _ => None,
    }
}

fn number(s: &str) -> Option<f32> {
    s.trim_end_matches("deg").trim().parse().ok()
}

fn channel(s: &str) -> Option<f32> {
    Some(number(s)?.clamp(0.0, 255.0) / 255.0)
}

fn percent(s: &str) -> Option<f32> {
    let v: f32 = s.strip_suffix('%')?.trim().parse().ok()?;
    Some(v / 100.0)
}

fn alpha(s: &str) -> Option<f32> {
    let v = match s.strip_suffix('%') {
        Some(p) => p.trim().parse::<f32>().ok()? / 100.0,
        None => s.parse().ok()?,
    };
    Some(v.clamp(0.0, 1.0))
}

fn trim_number(v: f32) -> String {
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
