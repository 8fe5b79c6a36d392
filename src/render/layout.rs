//! Layout maths: grid density, duplicate-mode cell rectangles and local pointers.

use crate::config::{GridCell, WaveConfig, REFERENCE_SIZE};
use crate::oscillator::safe_denominator;
use crate::pointer::PointerState;

/// Columns and rows of shapes for one render region, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub columns: f32,
    pub rows: f32,
}

impl Density {
    pub fn new(columns: f32, rows: f32) -> Self {
        Self { columns, rows }
    }

    /// Size of one snapped grid unit in pixels.
    fn snap_unit(config: &WaveConfig) -> f32 {
        REFERENCE_SIZE / safe_denominator(config.bars_per_row)
    }

    /// Density of a full canvas in single-instance mode.
    ///
    /// `barsPerRow` and `waveRows` are per 800 px. With snap-to-grid both axes use the
    /// same unit, derived from `barsPerRow`.
    pub fn single(config: &WaveConfig, width: f32, height: f32) -> Self {
        if config.snap_to_grid {
            let unit = Self::snap_unit(config);
            return Self::new(width / unit, height / unit);
        }
        Self::new(
            config.bars_per_row / REFERENCE_SIZE * width,
            config.wave_rows / REFERENCE_SIZE * height,
        )
    }

    /// Density of a duplicate-mode cell, scaled by its spans.
    ///
    /// Snap-to-grid uses the global unit so every cell shares one lattice; otherwise
    /// the cell's resolved density applies.
    pub fn cell(
        global: &WaveConfig,
        resolved: &WaveConfig,
        unit_width: f32,
        unit_height: f32,
        spans: (u32, u32),
    ) -> Self {
        let (row_span, col_span) = spans;
        let span_width = unit_width * col_span as f32;
        let span_height = unit_height * row_span as f32;
        if global.snap_to_grid {
            let unit = Self::snap_unit(global);
            return Self::new(span_width / unit, span_height / unit);
        }
        Self::new(
            resolved.bars_per_row / REFERENCE_SIZE * span_width,
            resolved.wave_rows / REFERENCE_SIZE * span_height,
        )
    }

    /// `(columns, rows)` rounded to the nearest integer, at least one each.
    pub fn rounded(&self) -> (usize, usize) {
        (round_count(self.columns), round_count(self.rows))
    }
}

fn round_count(value: f32) -> usize {
    if value.is_finite() {
        (value.round() as usize).max(1)
    } else {
        1
    }
}

/// Configuration row index for a rendered row.
///
/// Maps `row` of `declared_rows` back onto the configured `waveRows`, so per-row phase
/// offsets stay aligned when the region shows more or fewer rows than configured.
pub fn config_row_index(row: usize, wave_rows: f32, declared_rows: f32) -> usize {
    if !(wave_rows.is_finite() && wave_rows > 0.0) {
        return 0;
    }
    let last = (wave_rows.ceil() as usize).saturating_sub(1);
    let index = (row as f32 * wave_rows / safe_denominator(declared_rows)).floor();
    if index.is_finite() && index > 0.0 {
        (index as usize).min(last)
    } else {
        0
    }
}

/// Pixel rectangle of a duplicate-mode cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    /// Rounds both corners independently so adjacent cells share edges exactly.
    ///
    /// `spans` are the cell's `(rs, cs)` after [`GridCell::bounded_spans`]. `None` when
    /// the cell collapses to zero pixels.
    pub fn from_grid(
        cell: &GridCell,
        spans: (u32, u32),
        unit_width: f32,
        unit_height: f32,
    ) -> Option<Self> {
        let (row_span, col_span) = spans;
        let (col, row) = (cell.c as f32, cell.r as f32);
        let x = (col * unit_width).round();
        let y = (row * unit_height).round();
        let width = ((col + col_span as f32) * unit_width).round() - x;
        let height = ((row + row_span as f32) * unit_height).round() - y;
        (width > 0.0 && height > 0.0).then_some(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains_local(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Pointer in the rotated frame of a cell.
///
/// `rotation` is `(sin, cos)` of the cell rotation. The result is active only when the
/// global pointer is active and lands inside `[0, width] x [0, height]`.
pub fn local_pointer(pointer: PointerState, rect: &CellRect, rotation: (f32, f32)) -> PointerState {
    let (sin, cos) = rotation;
    let (cx, cy) = rect.center();
    let rx = pointer.x - cx;
    let ry = pointer.y - cy;
    let x = rx * cos + ry * sin + rect.width * 0.5;
    let y = -rx * sin + ry * cos + rect.height * 0.5;
    PointerState {
        x,
        y,
        active: pointer.active && rect.contains_local(x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_density_scales_with_reference() {
        let config = WaveConfig {
            bars_per_row: 10.0,
            wave_rows: 8.0,
            ..Default::default()
        };
        let density = Density::single(&config, 1600.0, 400.0);
        assert!((density.columns - 20.0).abs() < 1e-4);
        assert!((density.rows - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_snap_density_uses_square_unit() {
        let config = WaveConfig {
            bars_per_row: 10.0,
            wave_rows: 99.0,
            snap_to_grid: true,
            ..Default::default()
        };
        // Unit is 80 px on both axes.
        let density = Density::single(&config, 800.0, 160.0);
        assert_eq!(density, Density::new(10.0, 2.0));
    }

    #[test]
    fn test_cell_density_uses_spans() {
        let global = WaveConfig {
            bars_per_row: 80.0,
            wave_rows: 80.0,
            ..Default::default()
        };
        let resolved = WaveConfig {
            bars_per_row: 40.0,
            ..global.clone()
        };
        let density = Density::cell(&global, &resolved, 100.0, 100.0, (1, 2));
        assert!((density.columns - 10.0).abs() < 1e-4);
        assert!((density.rows - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_rounded_never_zero() {
        assert_eq!(Density::new(0.2, 0.0).rounded(), (1, 1));
        assert_eq!(Density::new(f32::NAN, 2.6).rounded(), (1, 3));
    }

    #[test]
    fn test_config_row_index_mapping() {
        // Twice as many rendered rows as configured.
        assert_eq!(config_row_index(0, 4.0, 8.0), 0);
        assert_eq!(config_row_index(3, 4.0, 8.0), 1);
        assert_eq!(config_row_index(7, 4.0, 8.0), 3);
        // Declared density rounded up: the last row stays in range.
        assert_eq!(config_row_index(2, 2.0, 2.4), 1);
        assert_eq!(config_row_index(5, 0.0, 3.0), 0);
        assert_eq!(config_row_index(5, 3.0, 0.0), 2);
    }

    #[test]
    fn test_cell_rect_rounds_corners_independently() {
        let unit = 100.0 / 3.0;
        let a = CellRect::from_grid(&GridCell::new(0, 0), (1, 1), unit, unit).unwrap();
        let b = CellRect::from_grid(&GridCell::new(0, 1), (1, 1), unit, unit).unwrap();
        let c = CellRect::from_grid(&GridCell::new(0, 2), (1, 1), unit, unit).unwrap();
        assert_eq!(a.x + a.width, b.x);
        assert_eq!(b.x + b.width, c.x);
        assert_eq!(c.x + c.width, 100.0);
    }

    #[test]
    fn test_local_pointer_without_rotation() {
        let rect = CellRect {
            x: 100.0,
            y: 50.0,
            width: 200.0,
            height: 100.0,
        };
        let local = local_pointer(PointerState::at(130.0, 70.0), &rect, (0.0, 1.0));
        assert!((local.x - 30.0).abs() < 1e-4);
        assert!((local.y - 20.0).abs() < 1e-4);
        assert!(local.active);

        let outside = local_pointer(PointerState::at(10.0, 10.0), &rect, (0.0, 1.0));
        assert!(!outside.active);
    }
}
