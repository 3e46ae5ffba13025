//! CLI command implementations.
//!
//! - `render` - Run one generation headlessly and write PNG/SVG
//! - `benchmark` - Time complete runs
//! - `config` - Print the effective configuration
//!
//! The interactive viewer lives in `main.rs`.

pub mod common;
pub mod render;
pub mod benchmark;

pub use common::{SettingsArgs, init_logging, surface_to_image};
pub use render::{RenderArgs, cmd_render};
pub use benchmark::{BenchmarkArgs, cmd_benchmark};
