//! End-to-end runs of the animation driver against recording and raster
//! surfaces.

use inkwash::{
    Animator, Config, FrameHandle, FrameQueue, Palette, Phase, PixmapSurface, Rgba, SvgSurface,
};

fn seeded(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        ..Config::default()
    }
}

#[test]
fn full_run_takes_total_over_interleave_frames() {
    let mut anim = Animator::new(seeded(1), SvgSurface::new(1280, 720), FrameQueue::new());
    anim.generate();

    let steps = 200 / 5;
    for step in 0..steps {
        assert_eq!(anim.phase(), Phase::Running, "stopped early at step {}", step);
        assert!(anim.tick());
    }

    assert_eq!(anim.iterations(), 200);
    assert_eq!(anim.phase(), Phase::Idle);
    assert!(anim.scheduler().is_idle());
    assert!(!anim.tick(), "no frame should remain after the run");
    assert_eq!(anim.surface().fill_count(), 3 * 200);
}

#[test]
fn double_generate_leaves_one_pending_frame() {
    let mut anim = Animator::new(seeded(2), SvgSurface::new(640, 480), FrameQueue::new());
    anim.generate();
    anim.tick();
    anim.generate();

    assert_eq!(anim.scheduler().pending_count(), 1);
    assert_eq!(anim.iterations(), 0);

    // The new run still completes normally.
    assert_eq!(anim.run_to_completion(), 40);
    assert_eq!(anim.iterations(), 200);
}

#[test]
fn each_seed_draws_its_batch_in_its_own_layer_color() {
    let config = Config {
        palette: Palette::new(vec![
            Rgba::from_rgba8(255, 0, 0, 0.5),
            Rgba::from_rgba8(0, 255, 0, 0.5),
            Rgba::from_rgba8(0, 0, 255, 0.5),
        ]),
        ..seeded(11)
    };
    let mut anim = Animator::new(config, SvgSurface::new(400, 400), FrameQueue::new());
    anim.generate();
    assert!(anim.tick());

    let svg = anim.surface().to_svg_string();
    let fills: Vec<&str> = svg
        .lines()
        .filter(|line| line.contains("transform=\"translate("))
        .filter_map(|line| line.split("fill=\"").nth(1))
        .filter_map(|rest| rest.split('"').next())
        .collect();

    let mut expected = Vec::new();
    for color in ["rgb(255,0,0)", "rgb(0,255,0)", "rgb(0,0,255)"] {
        expected.extend(std::iter::repeat_n(color, 5));
    }
    assert_eq!(fills, expected);
}

#[test]
fn layers_cycle_when_seeds_outnumber_colors() {
    let config = Config {
        seeds: 3,
        interleave: 1,
        palette: Palette::new(vec![
            Rgba::from_rgba8(255, 0, 0, 0.5),
            Rgba::from_rgba8(0, 0, 255, 0.5),
        ]),
        ..seeded(12)
    };
    let mut anim = Animator::new(config, SvgSurface::new(400, 400), FrameQueue::new());
    anim.generate();
    assert!(anim.tick());

    let svg = anim.surface().to_svg_string();
    let fills: Vec<&str> = svg
        .lines()
        .filter(|line| line.contains("transform=\"translate("))
        .filter_map(|line| line.split("fill=\"").nth(1))
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert_eq!(fills, ["rgb(255,0,0)", "rgb(0,0,255)", "rgb(255,0,0)"]);
}

#[test]
fn rapid_regeneration_never_stacks_frames() {
    let mut anim = Animator::new(seeded(3), SvgSurface::new(640, 480), FrameQueue::new());
    for _ in 0..10 {
        anim.generate();
        assert_eq!(anim.scheduler().pending_count(), 1);
    }
}

#[test]
fn run_counts_frames_with_uneven_batches() {
    let config = Config {
        total: 12,
        interleave: 5,
        ..seeded(4)
    };
    let mut anim = Animator::new(config, SvgSurface::new(400, 400), FrameQueue::new());
    anim.generate();

    assert_eq!(anim.run_to_completion(), 3);
    assert_eq!(anim.iterations(), 15);
    assert_eq!(anim.state().frames, 3);
}

#[test]
fn unknown_frames_do_not_advance_the_run() {
    let mut anim = Animator::new(seeded(5), SvgSurface::new(400, 400), FrameQueue::new());
    anim.generate();

    assert!(!anim.on_frame(FrameHandle(u64::MAX)));
    assert_eq!(anim.iterations(), 0);
    assert_eq!(anim.phase(), Phase::Running);
}

#[test]
fn raster_run_darkens_the_surface() {
    let config = Config {
        total: 20,
        ..seeded(6)
    };
    let mut anim = Animator::new(config, PixmapSurface::new(400, 300).unwrap(), FrameQueue::new());
    anim.generate();

    let brightness = |rgba: &[u8]| -> u64 {
        rgba.chunks(4).map(|px| px[0] as u64 + px[1] as u64 + px[2] as u64).sum()
    };
    let before = brightness(&anim.surface().to_rgba8());
    anim.run_to_completion();
    let after = brightness(&anim.into_surface().to_rgba8());

    assert!(after < before, "painted {} should be darker than background {}", after, before);
}
