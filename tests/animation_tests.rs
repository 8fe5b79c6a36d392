//! Integration tests for the render loop controller.

mod common;

use std::time::{Duration, Instant};

use common::{bars_config, init_logging};
use wave_canvas::animation::{AnimationLoop, SharedConfig, TimeStep, FRAME_STEP};
use wave_canvas::pointer::PointerCell;
use wave_canvas::surface::RecordingSurface;
use wave_canvas::WaveConfig;

fn new_loop(config: WaveConfig) -> (AnimationLoop, SharedConfig, PointerCell) {
    let shared = SharedConfig::new(config);
    let pointer = PointerCell::new();
    let animation = AnimationLoop::new(shared.clone(), pointer.clone());
    (animation, shared, pointer)
}

// ==================== Lifecycle ====================

#[test]
fn test_restart_while_running_is_noop() {
    init_logging();
    let (mut animation, _, _) = new_loop(bars_config());
    let mut surface = RecordingSurface::new(800, 100);
    assert!(animation.start());
    animation.tick(&mut surface);
    assert!(!animation.start());
    animation.tick(&mut surface);
    assert_eq!(animation.frames(), 2);
    assert!((animation.time() - 2.0 * FRAME_STEP).abs() < 1e-6);
}

#[test]
fn test_stop_halts_frames() {
    let (mut animation, _, _) = new_loop(bars_config());
    let mut surface = RecordingSurface::new(800, 100);
    animation.start();
    assert!(animation.tick(&mut surface).is_some());
    animation.stop();
    assert!(animation.tick(&mut surface).is_none());
    assert_eq!(animation.frames(), 1);

    // Restart continues from the same time.
    let before = animation.time();
    assert!(animation.start());
    animation.tick(&mut surface);
    assert!(animation.time() > before);
}

#[test]
fn test_hidden_surface_pauses_fixed_step() {
    let (mut animation, _, _) = new_loop(bars_config());
    let mut surface = RecordingSurface::new(800, 100);
    animation.start();
    animation.tick(&mut surface);
    animation.on_visibility_change(false);
    assert!(!animation.is_active());
    for _ in 0..10 {
        assert!(animation.tick(&mut surface).is_none());
    }
    animation.on_visibility_change(true);
    animation.tick(&mut surface);
    assert!((animation.time() - 2.0 * FRAME_STEP).abs() < 1e-6);
}

#[test]
fn test_elapsed_time_resumes_without_jump() {
    let (animation, _, _) = new_loop(bars_config());
    let mut animation = animation.with_time_step(TimeStep::Elapsed);
    let mut surface = RecordingSurface::new(800, 100);
    let t0 = Instant::now();

    animation.start();
    for i in 0..=10 {
        animation.tick_at(&mut surface, t0 + Duration::from_millis(16 * i));
    }
    let visible_time = animation.time();
    assert!((visible_time - 0.16).abs() < 1e-3);

    animation.on_visibility_change(false);
    animation.on_visibility_change(true);
    animation.tick_at(&mut surface, t0 + Duration::from_secs(60));
    assert!((animation.time() - visible_time).abs() < 1e-6);
}

#[test]
fn test_time_never_decreases() {
    let (animation, _, _) = new_loop(bars_config());
    let mut animation = animation.with_time_step(TimeStep::Elapsed);
    let mut surface = RecordingSurface::new(10, 10);
    let t0 = Instant::now() + Duration::from_secs(10);
    animation.start();
    animation.tick_at(&mut surface, t0);
    let mut last = animation.time();
    // Clock readings going backwards must not rewind the wave.
    for offset in [5u64, 1, 7, 3] {
        animation.tick_at(&mut surface, t0 + Duration::from_secs(offset));
        assert!(animation.time() >= last);
        last = animation.time();
    }
}

// ==================== Host Signals ====================

#[test]
fn test_resize_reports_backing_size() {
    let config = WaveConfig {
        aspect_ratio: Some(16.0 / 9.0),
        ..bars_config()
    };
    let (mut animation, shared, _) = new_loop(config);
    assert_eq!(animation.on_resize(1600, 10), (1600, 900));
    assert_eq!(animation.size(), (1600, 900));

    shared.update(|c| c.aspect_ratio = None);
    assert_eq!(animation.on_resize(640, 480), (640, 480));
}

#[test]
fn test_config_swap_applies_next_frame() {
    let (mut animation, shared, _) = new_loop(bars_config());
    let mut surface = RecordingSurface::new(800, 100);
    animation.start();
    assert_eq!(animation.tick(&mut surface).map(|s| s.shapes_drawn), Some(10));

    shared.replace(WaveConfig {
        bars_per_row: 20.0,
        ..bars_config()
    });
    assert_eq!(animation.tick(&mut surface).map(|s| s.shapes_drawn), Some(20));
}

#[test]
fn test_pointer_updates_reach_the_frame() {
    let config = WaveConfig {
        animate_thickness: true,
        thickness_speed: 0.0,
        wave_length: 1.0,
        mouse_amplitude: true,
        amplitude_strength: 10.0,
        ..bars_config()
    };
    let (mut animation, _, pointer) = new_loop(config);
    animation.start();

    let mut idle = RecordingSurface::new(800, 100);
    animation.tick(&mut idle);
    pointer.move_to(40.0, 50.0);
    let mut hovered = RecordingSurface::new(800, 100);
    animation.tick(&mut hovered);

    let idle_width = idle.commands()[0].bounds.width();
    let hovered_width = hovered.commands()[0].bounds.width();
    assert!(hovered_width > idle_width);

    pointer.leave();
    let mut left = RecordingSurface::new(800, 100);
    animation.tick(&mut left);
    assert!((left.commands()[0].bounds.width() - idle_width).abs() < 1e-4);
}
