//! Line-only primitives. They have no interior, so they are always stroked.

use super::{Direction, Shape, ShapeCell, ShapeMode, ShapeStyle};
use crate::surface::{LineCap, Surface};

fn line_width(cell: &ShapeCell, style: &ShapeStyle, fraction: f32) -> f32 {
    if style.stroke_only {
        style.outline_width(cell.size)
    } else {
        cell.size * fraction
    }
}

fn stroke_segments(surface: &mut dyn Surface, segments: &[[(f32, f32); 2]], width: f32) {
    if width <= 0.0 {
        return;
    }
    surface.begin_path();
    for [(x0, y0), (x1, y1)] in segments {
        surface.move_to(*x0, *y0);
        surface.line_to(*x1, *y1);
    }
    surface.set_line_width(width);
    surface.set_line_cap(LineCap::Round);
    surface.stroke();
}

/// Diagonal cross.
pub struct Cross;

impl Shape for Cross {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Cross
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let h = cell.size * 0.5;
        let (x, y) = (cell.cx, cell.cy);
        stroke_segments(
            surface,
            &[[(x - h, y - h), (x + h, y + h)], [(x + h, y - h), (x - h, y + h)]],
            line_width(cell, style, 0.2),
        );
    }
}

pub struct Plus;

impl Shape for Plus {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Plus
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let h = cell.size * 0.5;
        let (x, y) = (cell.cx, cell.cy);
        stroke_segments(
            surface,
            &[[(x - h, y), (x + h, y)], [(x, y - h), (x, y + h)]],
            line_width(cell, style, 0.2),
        );
    }
}

/// Open arrowhead pointing toward the direction, half as deep as it is wide.
pub struct Chevron(pub Direction);

impl Shape for Chevron {
    fn mode(&self) -> ShapeMode {
        match self.0 {
            Direction::Up => ShapeMode::ChevronUp,
            Direction::Down => ShapeMode::ChevronDown,
            Direction::Left => ShapeMode::ChevronLeft,
            Direction::Right => ShapeMode::ChevronRight,
        }
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let h = cell.size * 0.5;
        let q = cell.size * 0.25;
        let (x, y) = (cell.cx, cell.cy);
        let (a, tip, b) = match self.0 {
            Direction::Up => ((x - h, y + q), (x, y - q), (x + h, y + q)),
            Direction::Down => ((x - h, y - q), (x, y + q), (x + h, y - q)),
            Direction::Left => ((x + q, y - h), (x - q, y), (x + q, y + h)),
            Direction::Right => ((x - q, y - h), (x + q, y), (x - q, y + h)),
        };
        stroke_segments(surface, &[[a, tip], [tip, b]], line_width(cell, style, 0.25));
    }
}
