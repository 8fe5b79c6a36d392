//! Shared fixtures for integration tests.
#![allow(dead_code)]

use wave_canvas::config::{AnimationMode, WaveConfig};
use wave_canvas::shapes::ShapeMode;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Ten bars on one row with a 2..10 size range, animation off.
pub fn bars_config() -> WaveConfig {
    WaveConfig {
        shape_mode: ShapeMode::Bars,
        wave_rows: 1.0,
        bars_per_row: 10.0,
        min_bar_width: 2.0,
        max_bar_width: 10.0,
        animate_thickness: false,
        duplicate_mode_active: false,
        ..Default::default()
    }
}

/// Plain looping wave, one half-period across the region, no extra effects.
pub fn loop_config() -> WaveConfig {
    WaveConfig {
        animate_thickness: true,
        animation_mode: AnimationMode::Loop,
        wave_length: 1.0,
        thickness_speed: 0.0,
        thickness_offset: 0.0,
        ..bars_config()
    }
}

/// A moving wave with every cutoff disabled.
pub fn moving_config(speed: f32) -> WaveConfig {
    WaveConfig {
        thickness_speed: speed,
        wave_length: 3.0,
        row_peak_offset: 0.4,
        ..loop_config()
    }
}

/// Evenly spaced `count` values in `[start, end)`.
pub fn sweep(start: f32, end: f32, count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| start + (end - start) * i as f32 / count as f32)
        .collect()
}

/// Configurations exercising every animation feature at once.
pub fn stress_configs() -> Vec<WaveConfig> {
    let mut configs = Vec::new();
    for mode in [AnimationMode::Loop, AnimationMode::PingPong, AnimationMode::Reset] {
        for shape in [ShapeMode::Bars, ShapeMode::Circle, ShapeMode::Star] {
            configs.push(WaveConfig {
                shape_mode: shape,
                animation_mode: mode,
                thickness_speed: 1.7,
                wave_length: 4.0,
                combine_offsets: true,
                alternate_direction: true,
                animation_direction: 33.0,
                wave_spacing: 20.0,
                thickness_cutoff: 10.0,
                trail_cutoff: -30.0,
                trail_cutoff_start: 90.0,
                log_scale: mode == AnimationMode::Reset,
                log_strength: 3.0,
                mouse_amplitude: true,
                amplitude_strength: 4.0,
                ..loop_config()
            });
        }
    }
    configs
}
