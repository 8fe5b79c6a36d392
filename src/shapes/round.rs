use std::f32::consts::{PI, TAU};

use super::{paint_current_path, Shape, ShapeCell, ShapeMode, ShapeStyle};
use crate::surface::Surface;

/// Circle of diameter `size`.
pub struct Circle;

impl Shape for Circle {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Circle
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        surface.begin_path();
        surface.arc(cell.cx, cell.cy, cell.size * 0.5, 0.0, TAU);
        paint_current_path(surface, cell.size, style);
    }
}

/// Capsule `size` tall and `0.6 * size` wide with fully rounded ends.
pub struct Pill;

const PILL_ASPECT: f32 = 0.6;

impl Shape for Pill {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Pill
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let height = cell.size;
        let radius = height * PILL_ASPECT * 0.5;
        let top = cell.cy - height * 0.5 + radius;
        let bottom = cell.cy + height * 0.5 - radius;

        surface.begin_path();
        surface.arc(cell.cx, top, radius, PI, TAU);
        surface.line_to(cell.cx + radius, bottom);
        surface.arc(cell.cx, bottom, radius, 0.0, PI);
        surface.close_path();
        paint_current_path(surface, cell.size, style);
    }
}
