//! Surface that records draw calls instead of rasterising them.

use super::{Affine, Bounds, CanvasPath, DrawState, LineCap, LineJoin, Point, Surface};
use crate::config::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Fill,
    Stroke,
}

/// One painted shape in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    /// Geometry bounds; strokes are inflated by half the line width.
    pub bounds: Bounds,
    pub color: Rgba,
    pub line_width: f32,
}

/// Draw-command log with full canvas state tracking.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    path: CanvasPath,
    commands: Vec<DrawCommand>,
    clips: usize,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            path: CanvasPath::default(),
            commands: Vec::new(),
            clips: 0,
            clears: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `clip` calls so far.
    pub fn clip_count(&self) -> usize {
        self.clips
    }

    /// Number of `clear_rect` calls so far.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    fn record(&mut self, kind: DrawKind, bounds: Option<Bounds>) {
        let Some(bounds) = bounds else {
            return;
        };
        let (bounds, color) = match kind {
            DrawKind::Fill => (bounds, self.state.fill),
            DrawKind::Stroke => (bounds.inflate(self.state.line_width * 0.5), self.state.stroke),
        };
        self.commands.push(DrawCommand {
            kind,
            bounds,
            color,
            line_width: self.state.line_width,
        });
    }

    fn rect_bounds(&self, x: f32, y: f32, w: f32, h: f32) -> Option<Bounds> {
        let mut path = CanvasPath::default();
        path.rect(x, y, w, h, &self.state.transform);
        path.bounds()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.clears += 1;
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform = self.state.transform.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform.rotate(radians);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.state.transform.apply(Point::new(x, y));
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.state.transform.apply(Point::new(x, y));
        self.path.line_to(p);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let transform = self.state.transform;
        self.path.rect(x, y, w, h, &transform);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        let transform = self.state.transform;
        self.path.arc(x, y, radius, start_angle, end_angle, &transform);
    }

    fn fill(&mut self) {
        self.record(DrawKind::Fill, self.path.bounds());
    }

    fn stroke(&mut self) {
        self.record(DrawKind::Stroke, self.path.bounds());
    }

    fn clip(&mut self) {
        self.clips += 1;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let bounds = self.rect_bounds(x, y, w, h);
        self.record(DrawKind::Fill, bounds);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let bounds = self.rect_bounds(x, y, w, h);
        self.record(DrawKind::Stroke, bounds);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }
}
