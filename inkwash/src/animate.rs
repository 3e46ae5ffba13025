//! The animation driver.
//!
//! A run builds a fresh set of base polygons, paints the stitch background,
//! then spends many frames re-deforming every base polygon and filling the
//! result with its layer color. Thousands of faint, slightly different
//! fills pile up into the final watercolor texture.
//!
//! ```text
//!            generate()                    iterations >= total
//!   Idle ─────────────────▶ Running ──────────────────────────▶ Idle
//!    ▲                        │  on_frame: draw batch, request next
//!    └──── reset() ───────────┘
//! ```
//!
//! At most one frame is ever outstanding: its handle lives in
//! [`RunState::pending`], is cleared when it fires and is cancelled by
//! [`Animator::reset`]. Starting a new run always resets first, so rapid
//! regeneration never stacks callbacks.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{Config, Layout};
use crate::deform::deform;
use crate::geometry::{Point, Polygon};
use crate::render::{draw_polygon, paint_background};
use crate::rng::Sampler;
use crate::schedule::{FrameHandle, FrameQueue, FrameScheduler};
use crate::shapes::regular_polygon;
use crate::surface::Surface;

/// Whether frames are still being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Mutable bookkeeping for the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Draws completed per base polygon in this run
    pub iterations: u32,
    /// The one outstanding frame request, if any
    pub pending: Option<FrameHandle>,
    /// Frames executed in this run
    pub frames: u32,
}

/// Owns the surface, the scheduler and the run state.
pub struct Animator<S, F = FrameQueue, R = StdRng> {
    config: Config,
    layout: Layout,
    surface: S,
    scheduler: F,
    sampler: Sampler<R>,
    seeds: Vec<Polygon>,
    state: RunState,
    runs: u64,
}

impl<S: Surface, F: FrameScheduler> Animator<S, F, StdRng> {
    /// Build a driver sampling from `config.seed` (or OS entropy).
    pub fn new(config: Config, surface: S, scheduler: F) -> Self {
        let sampler = Sampler::from_seed_option(config.seed);
        Self::with_sampler(config, surface, scheduler, sampler)
    }
}

impl<S: Surface, F: FrameScheduler, R: Rng> Animator<S, F, R> {
    pub fn with_sampler(config: Config, surface: S, scheduler: F, sampler: Sampler<R>) -> Self {
        let layout = Layout::from_viewport(surface.width(), surface.height(), config.radius_cap);
        Self {
            config,
            layout,
            surface,
            scheduler,
            sampler,
            seeds: Vec::new(),
            state: RunState::default(),
            runs: 0,
        }
    }

    /// Cancel the outstanding frame, zero the counters and blank the surface.
    ///
    /// Safe to call at any time, any number of times.
    pub fn reset(&mut self) {
        if let Some(handle) = self.state.pending.take() {
            debug!(?handle, "cancelling pending frame");
            self.scheduler.cancel_frame(handle);
        }
        self.state.iterations = 0;
        self.state.frames = 0;
        self.surface.clear(self.config.background);
    }

    /// Start a new run: reset, build fresh base polygons, paint the
    /// background and request the first frame.
    pub fn generate(&mut self) {
        self.reset();
        self.runs += 1;

        self.seeds = self.build_seeds();
        paint_background(
            &mut self.surface,
            self.config.background,
            &self.config.stitch,
            self.config.blend,
        );

        self.state.pending = Some(self.scheduler.request_frame());
        debug!(run = self.runs, seeds = self.seeds.len(), "run started");
    }

    /// Regular polygons spread evenly by angle around the center, jittered
    /// in position and radius, each deformed once.
    fn build_seeds(&mut self) -> Vec<Polygon> {
        let count = self.config.seeds;
        let step = TAU / count as f64;
        let reach = self.layout.radius * 0.5;
        let deformer = self.config.seed_deform();
        let [rmin, rmax] = self.config.radius_jitter;

        (0..count)
            .map(|i| {
                let angle = step * i as f64;
                let anchor = Point::new(
                    angle.cos() * reach * self.sampler.gaussian(1.0, 1.0),
                    angle.sin() * reach * self.sampler.gaussian(1.0, 1.0),
                );
                let radius = self.layout.radius + self.sampler.uniform(rmin, rmax);
                let base = regular_polygon(anchor, radius, self.config.edges);
                deformer.apply(&base, &mut self.sampler)
            })
            .collect()
    }

    /// Run the frame identified by `handle`.
    ///
    /// Returns false (and draws nothing) when `handle` is not the pending
    /// frame, e.g. a callback that raced a reset.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.state.pending != Some(handle) {
            warn!(?handle, pending = ?self.state.pending, "ignoring stale frame");
            return false;
        }
        self.state.pending = None;

        let interleave = self.config.interleave;
        let [vmin, vmax] = self.config.variance_jitter;

        for (index, seed) in self.seeds.iter().enumerate() {
            let color = self.config.palette.layer(index);
            for _ in 0..interleave {
                let variance = self.config.variance + self.sampler.uniform(vmin, vmax);
                let outline = deform(
                    &seed.vertices,
                    self.config.depth,
                    variance,
                    self.config.frame_decay,
                    &mut self.sampler,
                );
                draw_polygon(&mut self.surface, &outline, color, self.config.blend);
            }
        }

        self.state.iterations += interleave;
        self.state.frames += 1;

        if self.state.iterations < self.config.total {
            self.state.pending = Some(self.scheduler.request_frame());
        } else {
            info!(
                run = self.runs,
                frames = self.state.frames,
                iterations = self.state.iterations,
                "run complete"
            );
        }
        true
    }

    /// Fire the next due frame from the scheduler, if there is one.
    pub fn tick(&mut self) -> bool {
        match self.scheduler.next_due() {
            Some(handle) => self.on_frame(handle),
            None => false,
        }
    }

    /// Tick until the run stops asking for frames. Returns the frames
    /// executed.
    pub fn run_to_completion(&mut self) -> u32 {
        let mut frames = 0;
        while self.state.pending.is_some() {
            let Some(handle) = self.scheduler.next_due() else {
                break;
            };
            if self.on_frame(handle) {
                frames += 1;
            }
        }
        frames
    }

    pub fn phase(&self) -> Phase {
        if self.state.pending.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn iterations(&self) -> u32 {
        self.state.iterations
    }

    /// Runs started so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn seeds(&self) -> &[Polygon] {
        &self.seeds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgSurface;

    fn animator(seed: u64) -> Animator<SvgSurface> {
        let config = Config {
            seed: Some(seed),
            ..Config::default()
        };
        Animator::new(config, SvgSurface::new(800, 600), FrameQueue::new())
    }

    #[test]
    fn starts_idle() {
        let anim = animator(1);
        assert_eq!(anim.phase(), Phase::Idle);
        assert_eq!(anim.iterations(), 0);
        assert!(anim.seeds().is_empty());
    }

    #[test]
    fn generate_builds_deformed_seeds() {
        let mut anim = animator(1);
        anim.generate();

        assert_eq!(anim.phase(), Phase::Running);
        assert_eq!(anim.seeds().len(), 3);
        for seed in anim.seeds() {
            assert_eq!(seed.len(), 12 * 32);
        }
        assert!(anim.surface().has_stitch());
        assert_eq!(anim.surface().fill_count(), 0);
    }

    #[test]
    fn one_frame_draws_one_batch_per_seed() {
        let mut anim = animator(2);
        anim.generate();
        assert!(anim.tick());

        assert_eq!(anim.iterations(), 5);
        assert_eq!(anim.surface().fill_count(), 3 * 5);
        assert_eq!(anim.scheduler().pending_count(), 1);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut anim = animator(3);
        anim.generate();
        let stale = anim.state().pending.unwrap();
        anim.generate();

        assert!(!anim.on_frame(stale));
        assert_eq!(anim.iterations(), 0);
        assert_eq!(anim.surface().fill_count(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut anim = animator(4);
        anim.generate();
        anim.tick();
        anim.reset();
        anim.reset();

        assert_eq!(anim.phase(), Phase::Idle);
        assert_eq!(anim.iterations(), 0);
        assert!(anim.scheduler().is_idle());
        assert_eq!(anim.surface().fill_count(), 0);
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut a = animator(9);
        let mut b = animator(9);
        a.generate();
        b.generate();
        assert_eq!(a.seeds(), b.seeds());
    }

    #[test]
    fn regenerate_builds_new_seeds() {
        let mut anim = animator(10);
        anim.generate();
        let first = anim.seeds().to_vec();
        anim.generate();
        assert_ne!(first, anim.seeds());
        assert_eq!(anim.runs(), 2);
    }
}
