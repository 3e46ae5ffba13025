//! Render command implementation.
//!
//! Runs one complete generation headlessly, pumping frames as fast as they
//! come, and writes the finished surface out.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use inkwash::{Animator, FrameQueue, PixmapSurface, SvgSurface};

use super::common::SettingsArgs;

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output PNG path
    #[arg(short, long, default_value = "inkwash.png")]
    pub output: PathBuf,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Also record the run as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Write a numbered PNG after every frame into this directory
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    pub json: bool,
}

/// Run summary for `--json`.
#[derive(Serialize, Debug)]
struct RenderSummary {
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    svg: Option<String>,
    width: u32,
    height: u32,
    seed: u64,
    layers: usize,
    frames: u32,
    iterations: u32,
    fills: usize,
    elapsed_ms: f64,
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    let mut config = args.settings.load()?;
    let seed = config.resolve_seed();
    let layers = config.seeds;
    let expected_frames = config.frames_per_run();

    let surface = PixmapSurface::new(args.width, args.height)
        .context("creating render surface")?;
    let mut anim = Animator::new(config.clone(), surface, FrameQueue::new());

    if let Some(dir) = &args.frames_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating frames directory {}", dir.display()))?;
    }

    info!(width = args.width, height = args.height, seed, frames = expected_frames, "rendering");
    let start = Instant::now();
    anim.generate();

    let mut frames = 0u32;
    while anim.tick() {
        frames += 1;
        if let Some(dir) = &args.frames_dir {
            let path = dir.join(format!("frame_{:04}.png", frames));
            anim.surface()
                .save_png(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            debug!(frame = frames, path = %path.display(), "wrote frame");
        }
    }
    let elapsed = start.elapsed();

    anim.surface()
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    eprintln!("Wrote: {} ({}x{})", args.output.display(), args.width, args.height);

    // Same seed, same draws: the replay matches the raster run exactly.
    if let Some(svg_path) = &args.svg {
        let mut recorder = Animator::new(config, SvgSurface::new(args.width, args.height), FrameQueue::new());
        recorder.generate();
        recorder.run_to_completion();
        recorder.surface()
            .save(svg_path)
            .with_context(|| format!("writing {}", svg_path.display()))?;
        eprintln!("Wrote: {}", svg_path.display());
    }

    if args.json {
        let summary = RenderSummary {
            output: args.output.display().to_string(),
            svg: args.svg.as_ref().map(|p| p.display().to_string()),
            width: args.width,
            height: args.height,
            seed,
            layers,
            frames,
            iterations: anim.iterations(),
            fills: anim.iterations() as usize * layers,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
