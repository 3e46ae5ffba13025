//! Benchmark command implementation.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use inkwash::{Animator, FrameQueue, PixmapSurface};

use super::common::SettingsArgs;

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Complete runs to time
    #[arg(short = 'n', long, default_value_t = 5)]
    pub runs: u32,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchmarkArgs) -> Result<()> {
    let config = args.settings.load()?;
    let runs = args.runs.max(1);

    let surface = PixmapSurface::new(args.width, args.height)
        .context("creating benchmark surface")?;
    let mut anim = Animator::new(config, surface, FrameQueue::new());

    let mut total = Duration::ZERO;
    let mut frames = 0u32;

    for _ in 0..runs {
        let start = Instant::now();
        anim.generate();
        frames += anim.run_to_completion();
        total += start.elapsed();
    }

    let total_ms = total.as_secs_f64() * 1000.0;
    let fills = frames as u64 * anim.config().seeds as u64 * anim.config().interleave as u64;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  INKWASH BENCHMARK: {}x{}", args.width, args.height);
    println!("═══════════════════════════════════════════════");
    println!("  Runs: {}", runs);
    println!("  Frames: {} ({} per run)", frames, anim.config().frames_per_run());
    println!("  Fills: {}", fills);
    println!("  Time: {:?}", total);
    println!("  Avg per run: {:.2}ms", total_ms / runs as f64);
    println!("  Avg per frame: {:.3}ms", total_ms / frames.max(1) as f64);
    println!("═══════════════════════════════════════════════");

    Ok(())
}
