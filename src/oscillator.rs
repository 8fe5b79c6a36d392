//! Thickness oscillator: maps a grid position, row and time to a shape size.
//!
//! The size follows a sine-like wave travelling across the region. Cutoffs, trails and
//! wave spacing force the minimum size over parts of each cycle, an optional power
//! curve reshapes the wave, and the pointer can locally amplify it. The result is
//! always inside `[minBarWidth, maxBarWidth]`.

use std::f32::consts::{PI, TAU};

use crate::config::{AnimationMode, WaveConfig};

/// Fraction of the region width over which pointer influence fades out.
pub const POINTER_FALLOFF: f32 = 0.3;

/// Inputs of one oscillator evaluation, in region-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSample {
    pub x: f32,
    pub y: f32,
    /// Configuration row index (drives per-row phase offsets).
    pub row_index: usize,
    pub time: f32,
    pub region_width: f32,
    pub region_height: f32,
    pub pointer_x: f32,
    pub pointer_active: bool,
}

impl ShapeSample {
    pub fn new(x: f32, y: f32, row_index: usize, time: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            row_index,
            time,
            region_width: width,
            region_height: height,
            pointer_x: 0.0,
            pointer_active: false,
        }
    }

    pub fn with_pointer(mut self, x: f32, active: bool) -> Self {
        self.pointer_x = x;
        self.pointer_active = active;
        self
    }
}

/// Zero or non-finite denominators become 1.
#[inline]
pub(crate) fn safe_denominator(value: f32) -> f32 {
    if value == 0.0 || !value.is_finite() {
        1.0
    } else {
        value
    }
}

/// Unit vector for an angle in degrees.
pub fn direction_vector(degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (cos, sin)
}

/// Position of the sample along the wave axis, normalised by the region extent.
///
/// Bars always travel along x; other shapes along `direction`.
pub fn projected_position(sample: &ShapeSample, along_x: bool, direction: (f32, f32)) -> f32 {
    if along_x {
        return sample.x / safe_denominator(sample.region_width);
    }
    let (dx, dy) = direction;
    let extent = sample.region_width * dx.abs() + sample.region_height * dy.abs();
    (sample.x * dx + sample.y * dy) / safe_denominator(extent)
}

/// Raw wave value in `[-1, 1]` for a phase in radians.
pub fn raw_wave(mode: AnimationMode, phase: f32) -> f32 {
    match mode {
        AnimationMode::Loop => phase.sin(),
        AnimationMode::PingPong => phase.sin().abs() * 2.0 - 1.0,
        AnimationMode::Reset => {
            let saw = phase.rem_euclid(TAU) / TAU;
            (saw * TAU).sin()
        }
    }
}

/// Position of a phase within its cycle, in `[0, 1)`.
pub fn cycle_position(phase: f32) -> f32 {
    let cycle = phase.rem_euclid(TAU) / TAU;
    if cycle.is_finite() && cycle < 1.0 {
        cycle
    } else {
        0.0
    }
}

/// Half-open window `[start, start + width)` on the unit cycle, wrapping past 1.
fn in_cyclic_window(cycle: f32, start: f32, width: f32) -> bool {
    if width <= 0.0 {
        return false;
    }
    if width >= 1.0 {
        return true;
    }
    let start = start.rem_euclid(1.0);
    let end = start + width;
    if end <= 1.0 {
        cycle >= start && cycle < end
    } else {
        cycle >= start || cycle < end - 1.0
    }
}

/// Whether the trail cutoff blanks this point of the cycle.
///
/// Positive trails blank a window starting at `trailCutoffStart`, negative trails an
/// equally wide window ending there. Windows wrap around the cycle, so a start of 100
/// is the same point as 0.
pub fn in_trail_window(cycle: f32, trail_cutoff: f32, trail_start: f32) -> bool {
    if trail_cutoff == 0.0 || !trail_cutoff.is_finite() {
        return false;
    }
    let width = trail_cutoff.abs() / 100.0 * 0.5;
    let start = trail_start / 100.0;
    if trail_cutoff > 0.0 {
        in_cyclic_window(cycle, start, width)
    } else {
        in_cyclic_window(cycle, start - width, width)
    }
}

/// Wave phase in radians for a sample.
pub fn phase(sample: &ShapeSample, config: &WaveConfig, direction: (f32, f32)) -> f32 {
    let position = projected_position(sample, !config.shape_mode.uses_direction(), direction);
    let row_direction = if config.alternate_direction && sample.row_index % 2 == 1 {
        -1.0
    } else {
        1.0
    };
    let row = sample.row_index as f32;
    let row_offset = if config.combine_offsets {
        config.thickness_offset + row * PI / safe_denominator(config.wave_rows)
    } else {
        config.thickness_offset + row * config.row_peak_offset
    };
    position * PI * config.wave_length
        + sample.time * config.thickness_speed * row_direction
        + row_offset
}

/// Shape size for one grid position.
///
/// Pure: the same sample and configuration always give the same size.
///
/// # Example
/// ```
/// use wave_canvas::config::WaveConfig;
/// use wave_canvas::oscillator::{shape_size, ShapeSample};
///
/// let config = WaveConfig {
///     animate_thickness: false,
///     min_bar_width: 2.0,
///     max_bar_width: 10.0,
///     ..Default::default()
/// };
/// let sample = ShapeSample::new(120.0, 50.0, 0, 3.0, 800.0, 100.0);
/// assert_eq!(shape_size(&sample, &config), 6.0);
/// ```
pub fn shape_size(sample: &ShapeSample, config: &WaveConfig) -> f32 {
    shape_size_with_direction(sample, config, direction_vector(config.animation_direction))
}

/// [`shape_size`] with a precomputed animation direction vector.
pub fn shape_size_with_direction(
    sample: &ShapeSample,
    config: &WaveConfig,
    direction: (f32, f32),
) -> f32 {
    let min = config.min_bar_width;
    let max = config.max_bar_width;
    let base = (min + max) * 0.5;
    let range = (max - min) * 0.5;

    if !config.animate_thickness {
        return base;
    }

    let phase = phase(sample, config, direction);
    let cycle = cycle_position(phase);
    let mut wave = raw_wave(config.animation_mode, phase);

    if config.wave_spacing > 0.0 {
        let ratio = config.wave_spacing / 100.0;
        if cycle >= 1.0 - ratio {
            return min;
        }
        wave = (cycle / (1.0 - ratio) * TAU).sin();
    }

    if config.thickness_cutoff > 0.0 && cycle >= 1.0 - config.thickness_cutoff / 100.0 {
        return min;
    }

    if in_trail_window(cycle, config.trail_cutoff, config.trail_cutoff_start) {
        return min;
    }

    let mut size = if config.log_scale {
        let v = ((wave + 1.0) * 0.5).clamp(0.0, 1.0);
        let strength = config.log_strength;
        let curved = if config.log_reverse {
            v.powf(strength)
        } else {
            1.0 - (1.0 - v).powf(strength)
        };
        min + curved * (max - min)
    } else {
        base + wave * range
    };

    if config.mouse_amplitude && sample.pointer_active {
        let distance = (sample.x - sample.pointer_x).abs();
        let reach = safe_denominator(sample.region_width * POINTER_FALLOFF);
        let influence = (1.0 - distance / reach).max(0.0);
        size += influence * range * (config.amplitude_strength - 1.0);
    }

    // NaN collapses to the minimum; an inverted range resolves to max.
    size.max(min).min(max)
}
