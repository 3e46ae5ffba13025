//! # inkwash
//!
//! Layered watercolor-style polygon generation.
//!
//! A handful of regular polygons are roughened by recursive midpoint
//! displacement, then re-roughened and filled hundreds of times with
//! nearly transparent, multiply-blended colors. The overdraw builds the
//! soft, blotchy edges of a paint wash.
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared explicitly below; `pub use` re-exports the
//! types most callers need so they can write `inkwash::Animator` instead
//! of `inkwash::animate::Animator`.

pub mod animate;
pub mod color;
pub mod config;
pub mod deform;
pub mod error;
pub mod geometry;
pub mod render;
pub mod rng;
pub mod schedule;
pub mod shapes;
pub mod stitch;
pub mod surface;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use animate::{Animator, Phase, RunState};
pub use color::{Palette, Rgba};
pub use config::{Config, Layout};
pub use deform::{DeformConfig, deform};
pub use error::{Error, Result};
pub use geometry::{Line, Point, Polygon};
pub use render::{draw_polygon, paint_background};
pub use rng::Sampler;
pub use schedule::{FrameHandle, FrameQueue, FrameScheduler};
pub use shapes::regular_polygon;
pub use stitch::Stitch;
pub use surface::{BlendMode, PixmapSurface, Surface};
pub use svg::SvgSurface;
