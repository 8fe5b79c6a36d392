//! CPU raster surface backed by tiny-skia.

use std::path::Path;
use std::sync::Arc;

use tiny_skia::{FillRule, Mask, Paint, Pixmap, PixmapPaint, Stroke, Transform};

use super::{CanvasPath, DrawState, LineCap, LineJoin, Point, Surface, SurfaceError};
use crate::config::{BlendModeName, Rgba};

#[derive(Clone)]
struct SkiaState {
    draw: DrawState,
    clip: Option<Arc<Mask>>,
}

/// Transparent RGBA pixmap that shapes are painted onto.
///
/// The pixmap holds only the shape layer; [`PixmapSurface::flatten`] composites it
/// over a background colour with an optional blend mode.
pub struct PixmapSurface {
    pixmap: Pixmap,
    state: SkiaState,
    stack: Vec<SkiaState>,
    path: CanvasPath,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::ZeroSize { width, height })?;
        Ok(Self {
            pixmap,
            state: SkiaState {
                draw: DrawState::default(),
                clip: None,
            },
            stack: Vec::new(),
            path: CanvasPath::default(),
        })
    }

    /// Reallocate the backing pixmap. Contents and graphics state are reset.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha colour of one pixel of the shape layer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Composite the shape layer over an opaque background.
    pub fn flatten(&self, background: Rgba, blend: Option<BlendModeName>) -> Pixmap {
        let mut out = self.pixmap.clone();
        out.fill(background.to_skia());
        let paint = PixmapPaint {
            blend_mode: blend.unwrap_or_default().to_skia(),
            ..PixmapPaint::default()
        };
        out.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
        out
    }

    /// Flatten and write the frame as PNG.
    pub fn save_png<P: AsRef<Path>>(
        &self,
        path: P,
        background: Rgba,
        blend: Option<BlendModeName>,
    ) -> Result<(), SurfaceError> {
        let flat = self.flatten(background, blend);
        image::save_buffer(
            path.as_ref(),
            &rgba8_pixels(&flat),
            flat.width(),
            flat.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }

    fn paint(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }

    fn skia_stroke(&self) -> Stroke {
        Stroke {
            width: self.state.draw.line_width,
            line_cap: match self.state.draw.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.state.draw.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        }
    }

    fn fill_path(&mut self, path: &CanvasPath, color: Rgba) {
        if let Some(path) = path.to_skia() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                Transform::identity(),
                self.state.clip.as_deref(),
            );
        }
    }

    fn stroke_path(&mut self, path: &CanvasPath) {
        if let Some(path) = path.to_skia() {
            let stroke = self.skia_stroke();
            self.pixmap.stroke_path(
                &path,
                &Self::paint(self.state.draw.stroke),
                &stroke,
                Transform::identity(),
                self.state.clip.as_deref(),
            );
        }
    }

    fn rect_path(&self, x: f32, y: f32, w: f32, h: f32) -> CanvasPath {
        let mut path = CanvasPath::default();
        path.rect(x, y, w, h, &self.state.draw.transform);
        path
    }
}

/// Demultiplied RGBA8 bytes of a pixmap, row-major.
pub fn rgba8_pixels(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let covers_all = x <= 0.0
            && y <= 0.0
            && x + w >= self.pixmap.width() as f32
            && y + h >= self.pixmap.height() as f32;
        if covers_all && self.state.clip.is_none() && self.state.draw.transform.is_identity() {
            self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
            return;
        }
        if let Some(path) = self.rect_path(x, y, w, h).to_skia() {
            let mut paint = Paint::default();
            paint.blend_mode = tiny_skia::BlendMode::Clear;
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                self.state.clip.as_deref(),
            );
        }
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
        self.state.draw.transform = self.state.draw.transform.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.draw.transform = self.state.draw.transform.rotate(radians);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.state.draw.transform.apply(Point::new(x, y));
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.state.draw.transform.apply(Point::new(x, y));
        self.path.line_to(p);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let transform = self.state.draw.transform;
        self.path.rect(x, y, w, h, &transform);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        let transform = self.state.draw.transform;
        self.path.arc(x, y, radius, start_angle, end_angle, &transform);
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.fill_path(&path, self.state.draw.fill);
        self.path = path;
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        self.stroke_path(&path);
        self.path = path;
    }

    fn clip(&mut self) {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mask = match (self.path.to_skia(), self.state.clip.as_deref()) {
            (Some(path), Some(current)) => {
                let mut mask = current.clone();
                mask.intersect_path(&path, FillRule::Winding, true, Transform::identity());
                Some(mask)
            }
            (Some(path), None) => Mask::new(width, height).map(|mut mask| {
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                mask
            }),
            // Clipping to an empty path hides everything.
            (None, _) => Mask::new(width, height),
        };
        if let Some(mask) = mask {
            self.state.clip = Some(Arc::new(mask));
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let path = self.rect_path(x, y, w, h);
        self.fill_path(&path, self.state.draw.fill);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let path = self.rect_path(x, y, w, h);
        self.stroke_path(&path);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.draw.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.state.draw.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.draw.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.draw.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.draw.line_join = join;
    }
}
