//! Frame rendering.
//!
//! This module provides:
//! - The single-instance grid renderer
//! - Duplicate-mode composition: rotated, clipped sub-grids with per-cell overrides
//! - Layout maths shared by both (density, cell rectangles, local pointers)

pub mod instance;
pub mod layout;

pub use instance::{render_instance, InstanceRegion};
pub use layout::{config_row_index, local_pointer, CellRect, Density};

use crate::config::WaveConfig;
use crate::pointer::PointerState;
use crate::surface::Surface;
use crate::trig::TrigCache;

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub shapes_drawn: usize,
    /// Instances rendered: 1 in single mode, the drawn cells in duplicate mode.
    pub cells_drawn: usize,
    /// Active cells left out because they lie outside the grid or have no area.
    pub cells_skipped: usize,
    /// Nothing was drawn because the surface has no area.
    pub frame_skipped: bool,
}

impl FrameStats {
    pub fn skipped() -> Self {
        Self {
            frame_skipped: true,
            ..Self::default()
        }
    }
}

/// Stateful frame renderer. Holds only the trigonometric cache between frames.
#[derive(Debug, Default)]
pub struct WaveRenderer {
    trig: TrigCache,
}

impl WaveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trig(&self) -> &TrigCache {
        &self.trig
    }

    /// Clear the surface and draw one frame of `config` at `time`.
    ///
    /// Never fails: a zero-sized surface skips the frame, malformed cells are skipped
    /// or drawn over each other.
    pub fn render_frame(
        &mut self,
        surface: &mut dyn Surface,
        config: &WaveConfig,
        time: f32,
        pointer: PointerState,
    ) -> FrameStats {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            log::debug!("skipping frame on {}x{} surface", width, height);
            return FrameStats::skipped();
        }
        let (width, height) = (width as f32, height as f32);

        self.trig.sync(config);
        surface.clear_rect(0.0, 0.0, width, height);

        if !config.duplicate_mode_active {
            let region = InstanceRegion {
                width,
                height,
                pointer,
                config,
                density: Density::single(config, width, height),
                time,
            };
            return FrameStats {
                shapes_drawn: render_instance(surface, &region, &mut self.trig),
                cells_drawn: 1,
                ..FrameStats::default()
            };
        }

        self.render_cells(surface, config, width, height, time, pointer)
    }

    fn render_cells(
        &mut self,
        surface: &mut dyn Surface,
        config: &WaveConfig,
        width: f32,
        height: f32,
        time: f32,
        pointer: PointerState,
    ) -> FrameStats {
        let (rows, cols) = config.grid_dims();
        let unit_width = width / cols as f32;
        let unit_height = height / rows as f32;
        let mut stats = FrameStats::default();

        for cell in config.grid_config.iter().filter(|cell| cell.is_active) {
            let spans = cell.bounded_spans(rows, cols);
            let rect = if cell.fits(rows, cols) {
                CellRect::from_grid(cell, spans, unit_width, unit_height)
            } else {
                None
            };
            let Some(rect) = rect else {
                stats.cells_skipped += 1;
                continue;
            };

            let rotation = self.trig.sin_cos(cell.rotation);
            let (cx, cy) = rect.center();
            surface.save();
            surface.translate(cx, cy);
            surface.rotate(cell.rotation.to_radians());
            surface.translate(-rect.width * 0.5, -rect.height * 0.5);

            surface.begin_path();
            surface.rect(0.0, 0.0, rect.width + 1.0, rect.height + 1.0);
            surface.clip();

            let resolved = config.resolve(cell);
            let region = InstanceRegion {
                width: rect.width,
                height: rect.height,
                pointer: local_pointer(pointer, &rect, rotation),
                config: &resolved,
                density: Density::cell(config, &resolved, unit_width, unit_height, spans),
                time,
            };
            stats.shapes_drawn += render_instance(surface, &region, &mut self.trig);
            stats.cells_drawn += 1;
            surface.restore();
        }

        stats
    }
}

/// Draw one frame with a throwaway renderer.
///
/// Hosts drawing many frames should keep a [`WaveRenderer`] to reuse its cache.
pub fn render_frame(
    surface: &mut dyn Surface,
    config: &WaveConfig,
    time: f32,
    pointer: PointerState,
) -> FrameStats {
    WaveRenderer::new().render_frame(surface, config, time, pointer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridCell;
    use crate::surface::RecordingSurface;

    fn duplicate(cells: Vec<GridCell>) -> WaveConfig {
        WaveConfig {
            duplicate_mode_active: true,
            grid_rows: 2,
            grid_cols: 2,
            grid_config: cells,
            bars_per_row: 40.0,
            wave_rows: 40.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_sized_surface_skips_frame() {
        let mut surface = RecordingSurface::new(0, 100);
        let stats = render_frame(&mut surface, &WaveConfig::default(), 0.0, PointerState::inactive());
        assert!(stats.frame_skipped);
        assert_eq!(surface.clear_count(), 0);
    }

    #[test]
    fn test_single_mode_clears_then_draws() {
        let mut surface = RecordingSurface::new(800, 80);
        let stats = render_frame(&mut surface, &WaveConfig::default(), 0.0, PointerState::inactive());
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(stats.cells_drawn, 1);
        // 50 bars per 800 px, 10 rows per 800 px rounds to 1 row.
        assert_eq!(stats.shapes_drawn, 50);
        assert_eq!(surface.commands().len(), 50);
    }

    #[test]
    fn test_duplicate_mode_clips_each_cell() {
        let config = duplicate(vec![
            GridCell::new(0, 0),
            GridCell::new(1, 1).with_rotation(90.0),
            GridCell {
                is_active: false,
                ..GridCell::new(0, 1)
            },
        ]);
        let mut surface = RecordingSurface::new(200, 200);
        let stats = WaveRenderer::new().render_frame(&mut surface, &config, 0.0, PointerState::inactive());
        assert_eq!(stats.cells_drawn, 2);
        assert_eq!(surface.clip_count(), 2);
        assert_eq!(surface.depth(), 0);
        // 40 per 800 px over 100 px cells: 5 x 5 each.
        assert_eq!(stats.shapes_drawn, 50);
    }

    #[test]
    fn test_out_of_grid_cells_are_skipped() {
        let config = duplicate(vec![
            GridCell::new(2, 0),
            GridCell::new(-1, 0),
            GridCell::new(0, 0).with_span(0, 1),
        ]);
        let mut surface = RecordingSurface::new(200, 200);
        let stats = render_frame(&mut surface, &config, 0.0, PointerState::inactive());
        assert_eq!(stats.cells_drawn, 0);
        assert_eq!(stats.cells_skipped, 3);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_cell_overrides_apply_to_that_cell_only() {
        let config = duplicate(vec![
            GridCell::new(0, 0).with_override("barColor", "#ff0000"),
            GridCell::new(0, 1),
        ]);
        let mut surface = RecordingSurface::new(200, 200);
        render_frame(&mut surface, &config, 0.0, PointerState::inactive());
        let commands = surface.commands();
        assert_eq!(commands.first().map(|c| c.color), Some(crate::config::Rgba::rgb(255, 0, 0)));
        assert_eq!(commands.last().map(|c| c.color), Some(crate::config::Rgba::BLACK));
    }

    #[test]
    fn test_rotated_cell_draws_inside_its_rect() {
        let config = duplicate(vec![GridCell::new(0, 1).with_rotation(90.0)]);
        let mut surface = RecordingSurface::new(200, 200);
        render_frame(&mut surface, &config, 0.0, PointerState::inactive());
        for command in surface.commands() {
            let center = command.bounds.center();
            assert!(center.x > 99.0 && center.x < 201.0, "x = {}", center.x);
            assert!(center.y > -1.0 && center.y < 101.0, "y = {}", center.y);
        }
    }
}
