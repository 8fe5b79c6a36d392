//! Single-instance renderer: one regular grid of shapes over a region.

use super::layout::{config_row_index, Density};
use crate::config::WaveConfig;
use crate::oscillator::{shape_size_with_direction, ShapeSample};
use crate::pointer::PointerState;
use crate::shapes::{shape_for, ShapeCell, ShapeStyle};
use crate::surface::Surface;
use crate::trig::TrigCache;

/// Everything one instance pass reads besides the surface.
#[derive(Debug, Clone, Copy)]
pub struct InstanceRegion<'a> {
    pub width: f32,
    pub height: f32,
    /// Pointer in region-local coordinates.
    pub pointer: PointerState,
    pub config: &'a WaveConfig,
    pub density: Density,
    pub time: f32,
}

/// Draw one grid of shapes into `[0, width] x [0, height]` of the current frame.
///
/// Returns the number of shapes drawn.
pub fn render_instance(
    surface: &mut dyn Surface,
    region: &InstanceRegion<'_>,
    trig: &mut TrigCache,
) -> usize {
    let config = region.config;
    let (columns, rows) = region.density.rounded();
    let row_height = region.height / rows as f32;
    let spacing = region.width / columns as f32;

    let shape = shape_for(config.shape_mode);
    let style = ShapeStyle::from_config(config);
    let direction = trig.direction(config.animation_direction);
    let color = config.bar_rgba();

    surface.save();
    surface.set_fill_color(color);
    surface.set_stroke_color(color);

    for row in 0..rows {
        let band_top = row_height * row as f32;
        let cy = band_top + row_height * 0.5;
        let row_index = config_row_index(row, config.wave_rows, region.density.rows);

        for column in 0..columns {
            let cx = spacing * (column as f32 + 0.5);
            let sample = ShapeSample {
                x: cx,
                y: cy,
                row_index,
                time: region.time,
                region_width: region.width,
                region_height: region.height,
                pointer_x: region.pointer.x,
                pointer_active: region.pointer.active,
            };
            let size = shape_size_with_direction(&sample, config, direction);
            let cell = ShapeCell {
                cx,
                cy,
                size,
                band_top,
                band_height: row_height,
            };
            shape.draw(surface, &cell, &style);
        }
    }

    surface.restore();
    rows * columns
}
