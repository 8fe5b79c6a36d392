//! 2D immediate-mode drawing surfaces.
//!
//! The renderer only talks to the [`Surface`] trait, which mirrors the subset of an
//! HTML canvas 2D context the wave engine needs. Two implementations ship with the
//! crate:
//! - [`PixmapSurface`]: CPU rasterisation into a tiny-skia pixmap
//! - [`RecordingSurface`]: keeps a log of device-space draw commands

mod recording;
mod skia;

pub use recording::{DrawCommand, DrawKind, RecordingSurface};
pub use skia::{rgba8_pixels, PixmapSurface};

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::Rgba;

/// Errors raised while creating or exporting a surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Surface dimensions must be non-zero (got {width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D affine transform, column-major like the canvas `setTransform(a, b, c, d, e, f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// `self` followed by a translation in local coordinates.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            e: self.a * dx + self.c * dy + self.e,
            f: self.b * dx + self.d * dy + self.f,
            ..self
        }
    }

    /// `self` followed by a clockwise (screen space) rotation in local coordinates.
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Axis-aligned bounding box in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    fn from_point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn inflate(self, by: f32) -> Self {
        Self {
            min_x: self.min_x - by,
            min_y: self.min_y - by,
            max_x: self.max_x + by,
            max_y: self.max_y + by,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

/// Path segment in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Current path of a surface, built with canvas semantics: points are mapped through
/// the transform active when they are added.
#[derive(Debug, Clone, Default)]
pub struct CanvasPath {
    commands: Vec<PathCommand>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl CanvasPath {
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
        self.subpath_start = None;
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    pub fn line_to(&mut self, p: Point) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.commands.push(PathCommand::LineTo(p));
        self.current = Some(p);
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        if self.current.is_none() {
            self.move_to(c1);
        }
        self.commands.push(PathCommand::CubicTo(c1, c2, p));
        self.current = Some(p);
    }

    pub fn close(&mut self) {
        if let Some(start) = self.subpath_start {
            self.commands.push(PathCommand::Close);
            self.current = Some(start);
        }
    }

    /// Closed rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, transform: &Affine) {
        self.move_to(transform.apply(Point::new(x, y)));
        self.line_to(transform.apply(Point::new(x + w, y)));
        self.line_to(transform.apply(Point::new(x + w, y + h)));
        self.line_to(transform.apply(Point::new(x, y + h)));
        self.close();
    }

    /// Clockwise arc, flattened into cubic segments of at most a quarter turn.
    ///
    /// Connects to the current point with a straight line like the canvas `arc`.
    pub fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, transform: &Affine) {
        if !(radius.is_finite() && radius >= 0.0 && start.is_finite() && end.is_finite()) {
            return;
        }
        let sweep = if end - start >= TAU {
            TAU
        } else {
            (end - start).rem_euclid(TAU)
        };
        let at = |angle: f32| Point::new(cx + radius * angle.cos(), cy + radius * angle.sin());

        let first = transform.apply(at(start));
        if self.current.is_some() {
            self.line_to(first);
        } else {
            self.move_to(first);
        }
        if sweep <= 0.0 {
            return;
        }

        let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
        for i in 0..segments {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            let p1 = Point::new(cx + radius * c0 - k * s0, cy + radius * s0 + k * c0);
            let p2 = Point::new(cx + radius * c1 + k * s1, cy + radius * s1 - k * c1);
            let p3 = Point::new(cx + radius * c1, cy + radius * s1);
            self.cubic_to(
                transform.apply(p1),
                transform.apply(p2),
                transform.apply(p3),
            );
        }
    }

    /// Bounding box of all points, control points included.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |p: Point| {
            bounds = Some(match bounds {
                Some(mut b) => {
                    b.include(p);
                    b
                }
                None => Bounds::from_point(p),
            });
        };
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::CubicTo(c1, c2, p) => {
                    include(c1);
                    include(c2);
                    include(p);
                }
                PathCommand::Close => {}
            }
        }
        bounds
    }

    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
                PathCommand::CubicTo(c1, c2, p) => {
                    builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathCommand::Close => builder.close(),
            }
        }
        builder.finish()
    }
}

/// Graphics state saved and restored by `save`/`restore`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

impl DrawState {
    /// Canvas ignores line widths that are not finite and positive.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }
}

/// Canvas-like 2D drawing context.
///
/// Angles are radians, rotation is clockwise in screen space, and `arc` always
/// sweeps clockwise from `start_angle` to `end_angle`.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
}
