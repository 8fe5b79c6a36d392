use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::{paint_polygon, Direction, Shape, ShapeCell, ShapeMode, ShapeStyle};
use crate::surface::Surface;

/// Axis-aligned square with side `size`.
pub struct Square;

impl Shape for Square {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Square
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let half = cell.size * 0.5;
        let (x, y) = (cell.cx - half, cell.cy - half);
        if style.stroke_only {
            let width = style.outline_width(cell.size);
            if width > 0.0 {
                surface.set_line_width(width);
                surface.stroke_rect(x, y, cell.size, cell.size);
            }
        } else {
            surface.fill_rect(x, y, cell.size, cell.size);
        }
    }
}

/// Isosceles triangle filling the `size` box, apex toward the direction.
pub struct Triangle(pub Direction);

impl Shape for Triangle {
    fn mode(&self) -> ShapeMode {
        match self.0 {
            Direction::Up => ShapeMode::TriangleUp,
            Direction::Down => ShapeMode::TriangleDown,
            Direction::Left => ShapeMode::TriangleLeft,
            Direction::Right => ShapeMode::TriangleRight,
        }
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let h = cell.size * 0.5;
        let (x, y) = (cell.cx, cell.cy);
        let points = match self.0 {
            Direction::Up => [(x, y - h), (x + h, y + h), (x - h, y + h)],
            Direction::Down => [(x, y + h), (x - h, y - h), (x + h, y - h)],
            Direction::Left => [(x - h, y), (x + h, y - h), (x + h, y + h)],
            Direction::Right => [(x + h, y), (x - h, y + h), (x - h, y - h)],
        };
        paint_polygon(surface, &points, cell.size, style);
    }
}

/// Square rotated by 45 degrees, corners touching the `size` box.
pub struct Diamond;

impl Shape for Diamond {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Diamond
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let h = cell.size * 0.5;
        let (x, y) = (cell.cx, cell.cy);
        let points = [(x, y - h), (x + h, y), (x, y + h), (x - h, y)];
        paint_polygon(surface, &points, cell.size, style);
    }
}

/// Regular n-gon inscribed in a circle of diameter `size`.
pub struct RegularPolygon {
    mode: ShapeMode,
    sides: usize,
    /// Angle of the first vertex.
    phase: f32,
}

impl RegularPolygon {
    /// Pointy sides, flat top and bottom.
    pub const HEXAGON: RegularPolygon = RegularPolygon {
        mode: ShapeMode::Hexagon,
        sides: 6,
        phase: 0.0,
    };

    pub const OCTAGON: RegularPolygon = RegularPolygon {
        mode: ShapeMode::Octagon,
        sides: 8,
        phase: PI / 8.0,
    };

    pub fn sides(&self) -> usize {
        self.sides
    }
}

impl Shape for RegularPolygon {
    fn mode(&self) -> ShapeMode {
        self.mode
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let radius = cell.size * 0.5;
        let step = TAU / self.sides as f32;
        let points: Vec<(f32, f32)> = (0..self.sides)
            .map(|i| {
                let (sin, cos) = (self.phase + step * i as f32).sin_cos();
                (cell.cx + radius * cos, cell.cy + radius * sin)
            })
            .collect();
        paint_polygon(surface, &points, cell.size, style);
    }
}

/// Five-pointed star, point up.
pub struct Star;

/// Inner to outer radius.
pub const STAR_INNER_RATIO: f32 = 0.4;

impl Shape for Star {
    fn mode(&self) -> ShapeMode {
        ShapeMode::Star
    }

    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle) {
        let outer = cell.size * 0.5;
        let inner = outer * STAR_INNER_RATIO;
        let step = PI / 5.0;
        let mut points = [(0.0, 0.0); 10];
        for (i, point) in points.iter_mut().enumerate() {
            let radius = if i % 2 == 0 { outer } else { inner };
            let (sin, cos) = (step * i as f32 - FRAC_PI_2).sin_cos();
            *point = (cell.cx + radius * cos, cell.cy + radius * sin);
        }
        paint_polygon(surface, &points, cell.size, style);
    }
}
