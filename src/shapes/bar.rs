use super::{Shape, ShapeCell, ShapeMode, ShapeStyle};
use crate::surface::Surface;

/// Vertical bar centred on the cell, `coverage` of the row band tall.
///
/// Filled bars are one pixel wider than the oscillator size so neighbouring bars
/// never leave sub-pixel seams.
pub struct Bar;

impl Shape for Bar {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Bars
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let height = cell.band_height * style.coverage;
        if height <= 0.0 {
            return;
        }
        let top = cell.band_top + (cell.band_height - height) * 0.5;
        let left = cell.cx - cell.size * 0.5;

        if style.stroke_only {
            let width = style.outline_width(cell.size);
            if width > 0.0 {
                surface.set_line_width(width);
                surface.stroke_rect(left, top, cell.size, height);
            }
        } else {
            surface.fill_rect(left, top, cell.size + 1.0, height);
        }
    }
}
