//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use image::{DynamicImage, RgbaImage};
use tracing::Level;

use inkwash::{Config, PixmapSurface, Surface};

/// Settings every command accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// YAML config file (missing keys keep their defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Random seed for a reproducible first run
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl SettingsArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };

        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("invalid settings")?;
        Ok(config)
    }
}

/// Install the stderr subscriber used by the headless commands.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Copy a raster surface into an `image` buffer.
pub fn surface_to_image(surface: &PixmapSurface) -> Result<DynamicImage> {
    let rgba = RgbaImage::from_raw(surface.width(), surface.height(), surface.to_rgba8())
        .context("surface buffer does not match its size")?;
    Ok(DynamicImage::ImageRgba8(rgba))
}
