//! Shape primitives drawn at each grid position.
//!
//! Every primitive implements [`Shape`] and is looked up through [`shape_for`], so
//! adding a shape never touches the oscillator or the layout code:
//! - Bars: coverage-sized vertical rectangles spanning the row band
//! - Round: circle, pill
//! - Polygons: square, four triangles, diamond, hexagon, octagon, star
//! - Lines: x, plus, four chevrons (always stroked)

mod bar;
mod line;
mod polygon;
mod round;

pub use bar::Bar;
pub use line::{Chevron, Cross, Plus};
pub use polygon::{Diamond, RegularPolygon, Square, Star, Triangle};
pub use round::{Circle, Pill};

use serde::{Deserialize, Serialize};

use crate::config::WaveConfig;
use crate::surface::Surface;

/// Pointing direction for the oriented primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Available shape primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeMode {
    #[default]
    Bars,
    Circle,
    Square,
    Cross,
    Plus,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Diamond,
    Hexagon,
    Star,
    Pill,
    ChevronUp,
    ChevronDown,
    ChevronLeft,
    ChevronRight,
    Octagon,
}

impl ShapeMode {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bars" | "bar" => Some(Self::Bars),
            "balls" | "ball" | "circles" | "circle" => Some(Self::Circle),
            "squares" | "square" => Some(Self::Square),
            "x" | "cross" | "crosses" => Some(Self::Cross),
            "plus" | "pluses" => Some(Self::Plus),
            "triangle-up" | "triangleup" | "triangle" | "triangles" => Some(Self::TriangleUp),
            "triangle-down" | "triangledown" => Some(Self::TriangleDown),
            "triangle-left" | "triangleleft" => Some(Self::TriangleLeft),
            "triangle-right" | "triangleright" => Some(Self::TriangleRight),
            "diamond" | "diamonds" => Some(Self::Diamond),
            "hexagon" | "hexagons" => Some(Self::Hexagon),
            "star" | "stars" => Some(Self::Star),
            "pill" | "pills" => Some(Self::Pill),
            "chevron-up" | "chevronup" | "chevron" | "chevrons" => Some(Self::ChevronUp),
            "chevron-down" | "chevrondown" => Some(Self::ChevronDown),
            "chevron-left" | "chevronleft" => Some(Self::ChevronLeft),
            "chevron-right" | "chevronright" => Some(Self::ChevronRight),
            "octagon" | "octagons" => Some(Self::Octagon),
            _ => None,
        }
    }

    /// Canonical name as stored in configuration documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bars => "bars",
            Self::Circle => "balls",
            Self::Square => "squares",
            Self::Cross => "x",
            Self::Plus => "plus",
            Self::TriangleUp => "triangle-up",
            Self::TriangleDown => "triangle-down",
            Self::TriangleLeft => "triangle-left",
            Self::TriangleRight => "triangle-right",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Star => "star",
            Self::Pill => "pill",
            Self::ChevronUp => "chevron-up",
            Self::ChevronDown => "chevron-down",
            Self::ChevronLeft => "chevron-left",
            Self::ChevronRight => "chevron-right",
            Self::Octagon => "octagon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Bars => "Vertical bars filling the row band",
            Self::Circle => "Circles",
            Self::Square => "Axis-aligned squares",
            Self::Cross => "Diagonal crosses",
            Self::Plus => "Plus signs",
            Self::TriangleUp => "Triangles pointing up",
            Self::TriangleDown => "Triangles pointing down",
            Self::TriangleLeft => "Triangles pointing left",
            Self::TriangleRight => "Triangles pointing right",
            Self::Diamond => "Diamonds",
            Self::Hexagon => "Regular hexagons",
            Self::Star => "Five-pointed stars",
            Self::Pill => "Rounded capsules",
            Self::ChevronUp => "Chevrons pointing up",
            Self::ChevronDown => "Chevrons pointing down",
            Self::ChevronLeft => "Chevrons pointing left",
            Self::ChevronRight => "Chevrons pointing right",
            Self::Octagon => "Regular octagons",
        }
    }

    /// Bars animate along x; every other shape along `animationDirection`.
    pub fn uses_direction(&self) -> bool {
        *self != Self::Bars
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Bars,
            Self::Circle,
            Self::Square,
            Self::Cross,
            Self::Plus,
            Self::TriangleUp,
            Self::TriangleDown,
            Self::TriangleLeft,
            Self::TriangleRight,
            Self::Diamond,
            Self::Hexagon,
            Self::Star,
            Self::Pill,
            Self::ChevronUp,
            Self::ChevronDown,
            Self::ChevronLeft,
            Self::ChevronRight,
            Self::Octagon,
        ]
    }
}

impl From<String> for ShapeMode {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_else(|| {
            log::debug!("unknown shape mode {:?}, drawing bars", s);
            Self::default()
        })
    }
}

impl From<ShapeMode> for String {
    fn from(mode: ShapeMode) -> Self {
        mode.name().to_string()
    }
}

/// Where and how big one shape instance is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCell {
    pub cx: f32,
    pub cy: f32,
    /// Oscillator output.
    pub size: f32,
    /// Top edge of the row band the shape sits in.
    pub band_top: f32,
    pub band_height: f32,
}

/// Paint settings shared by every instance of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub stroke_only: bool,
    /// Outline width at maximum size.
    pub stroke_width: f32,
    pub max_size: f32,
    /// Fraction `0..=1` of the row band covered by bars.
    pub coverage: f32,
}

impl ShapeStyle {
    pub fn from_config(config: &WaveConfig) -> Self {
        let coverage = if config.bar_coverage.is_finite() {
            (config.bar_coverage / 100.0).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            stroke_only: config.stroke_only,
            stroke_width: config.stroke_width,
            max_size: config.max_bar_width,
            coverage,
        }
    }

    /// Outline width scaled with the shape: `size / max * strokeWidth`.
    pub fn outline_width(&self, size: f32) -> f32 {
        let max = if self.max_size.is_finite() && self.max_size != 0.0 {
            self.max_size
        } else {
            1.0
        };
        size / max * self.stroke_width
    }
}

/// A drawable primitive.
pub trait Shape: Send + Sync {
    fn mode(&self) -> ShapeMode;

    /// Draw one instance with the surface's current fill/stroke colours.
    fn draw(&self, surface: &mut dyn Surface, cell: &ShapeCell, style: &ShapeStyle);
}

static BAR: Bar = Bar;
static CIRCLE: Circle = Circle;
static SQUARE: Square = Square;
static CROSS: Cross = Cross;
static PLUS: Plus = Plus;
static TRIANGLE_UP: Triangle = Triangle(Direction::Up);
static TRIANGLE_DOWN: Triangle = Triangle(Direction::Down);
static TRIANGLE_LEFT: Triangle = Triangle(Direction::Left);
static TRIANGLE_RIGHT: Triangle = Triangle(Direction::Right);
static DIAMOND: Diamond = Diamond;
static HEXAGON: RegularPolygon = RegularPolygon::HEXAGON;
static STAR: Star = Star;
static PILL: Pill = Pill;
static CHEVRON_UP: Chevron = Chevron(Direction::Up);
static CHEVRON_DOWN: Chevron = Chevron(Direction::Down);
static CHEVRON_LEFT: Chevron = Chevron(Direction::Left);
static CHEVRON_RIGHT: Chevron = Chevron(Direction::Right);
static OCTAGON: RegularPolygon = RegularPolygon::OCTAGON;

/// Rasterisation strategy for a shape mode.
///
/// # Example
/// ```
/// use wave_canvas::shapes::{shape_for, ShapeMode};
///
/// let shape = shape_for(ShapeMode::Star);
/// assert_eq!(shape.mode(), ShapeMode::Star);
/// ```
pub fn shape_for(mode: ShapeMode) -> &'static dyn Shape {
    match mode {
        ShapeMode::Bars => &BAR,
        ShapeMode::Circle => &CIRCLE,
        ShapeMode::Square => &SQUARE,
        ShapeMode::Cross => &CROSS,
        ShapeMode::Plus => &PLUS,
        ShapeMode::TriangleUp => &TRIANGLE_UP,
        ShapeMode::TriangleDown => &TRIANGLE_DOWN,
        ShapeMode::TriangleLeft => &TRIANGLE_LEFT,
        ShapeMode::TriangleRight => &TRIANGLE_RIGHT,
        ShapeMode::Diamond => &DIAMOND,
        ShapeMode::Hexagon => &HEXAGON,
        ShapeMode::Star => &STAR,
        ShapeMode::Pill => &PILL,
        ShapeMode::ChevronUp => &CHEVRON_UP,
        ShapeMode::ChevronDown => &CHEVRON_DOWN,
        ShapeMode::ChevronLeft => &CHEVRON_LEFT,
        ShapeMode::ChevronRight => &CHEVRON_RIGHT,
        ShapeMode::Octagon => &OCTAGON,
    }
}

/// Fill the current path, or stroke it with the size-scaled outline width.
fn paint_current_path(surface: &mut dyn Surface, size: f32, style: &ShapeStyle) {
    if style.stroke_only {
        let width = style.outline_width(size);
        if width > 0.0 {
            surface.set_line_width(width);
            surface.stroke();
        }
    } else {
        surface.fill();
    }
}

/// Closed polygon through `points`, filled or outlined.
fn paint_polygon(surface: &mut dyn Surface, points: &[(f32, f32)], size: f32, style: &ShapeStyle) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(x0, y0);
    for &(x, y) in rest {
        surface.line_to(x, y);
    }
    surface.close_path();
    paint_current_path(surface, size, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawKind, RecordingSurface};

    fn style(stroke_only: bool) -> ShapeStyle {
        ShapeStyle {
            stroke_only,
            stroke_width: 2.0,
            max_size: 10.0,
            coverage: 1.0,
        }
    }

    fn cell(size: f32) -> ShapeCell {
        ShapeCell {
            cx: 50.0,
            cy: 50.0,
            size,
            band_top: 40.0,
            band_height: 20.0,
        }
    }

    #[test]
    fn test_shape_mode_from_str_parsing() {
        assert_eq!(ShapeMode::from_str("bars"), Some(ShapeMode::Bars));
        assert_eq!(ShapeMode::from_str("BALLS"), Some(ShapeMode::Circle));
        assert_eq!(ShapeMode::from_str("squares"), Some(ShapeMode::Square));
        assert_eq!(ShapeMode::from_str("chevron-left"), Some(ShapeMode::ChevronLeft));
        assert_eq!(ShapeMode::from_str("invalid"), None);
    }

    #[test]
    fn test_every_mode_round_trips_through_its_name() {
        assert_eq!(ShapeMode::all().len(), 18);
        for mode in ShapeMode::all() {
            assert_eq!(ShapeMode::from_str(mode.name()), Some(*mode));
        }
    }

    #[test]
    fn test_shape_for_returns_matching_mode() {
        for mode in ShapeMode::all() {
            assert_eq!(shape_for(*mode).mode(), *mode);
        }
    }

    #[test]
    fn test_every_shape_draws_exactly_once_centered() {
        for mode in ShapeMode::all() {
            let mut surface = RecordingSurface::new(100, 100);
            shape_for(*mode).draw(&mut surface, &cell(8.0), &style(false));
            let commands = surface.commands();
            assert_eq!(commands.len(), 1, "{:?} should paint once", mode);
            let bounds = commands[0].bounds;
            let center = bounds.center();
            // Bars carry a one pixel bleed to the right.
            assert!((center.x - 50.0).abs() <= 0.5 + 1e-3, "{:?} x = {}", mode, center.x);
            // Stars are bounded by their top point, so they sit slightly high.
            if *mode != ShapeMode::Star {
                assert!((center.y - 50.0).abs() <= 1e-3, "{:?} y = {}", mode, center.y);
            }
            let slack = 1.0 + commands[0].line_width;
            assert!(bounds.width() <= 8.0 + slack, "{:?} w = {}", mode, bounds.width());
        }
    }

    #[test]
    fn test_line_shapes_always_stroke() {
        for mode in [ShapeMode::Cross, ShapeMode::Plus, ShapeMode::ChevronDown] {
            let mut surface = RecordingSurface::new(100, 100);
            shape_for(mode).draw(&mut surface, &cell(10.0), &style(false));
            assert_eq!(surface.commands()[0].kind, DrawKind::Stroke);
        }
        let mut surface = RecordingSurface::new(100, 100);
        shape_for(ShapeMode::Plus).draw(&mut surface, &cell(10.0), &style(false));
        assert!((surface.commands()[0].line_width - 2.0).abs() < 1e-5);
        let mut surface = RecordingSurface::new(100, 100);
        shape_for(ShapeMode::ChevronUp).draw(&mut surface, &cell(10.0), &style(false));
        assert!((surface.commands()[0].line_width - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_stroke_only_strokes_everything() {
        for mode in ShapeMode::all() {
            let mut surface = RecordingSurface::new(100, 100);
            shape_for(*mode).draw(&mut surface, &cell(5.0), &style(true));
            let commands = surface.commands();
            assert_eq!(commands.len(), 1);
            assert_eq!(commands[0].kind, DrawKind::Stroke, "{:?}", mode);
            // size / max * strokeWidth = 5 / 10 * 2
            assert!((commands[0].line_width - 1.0).abs() < 1e-5, "{:?}", mode);
        }
    }

    #[test]
    fn test_outline_width_guards_zero_max() {
        let style = ShapeStyle {
            max_size: 0.0,
            ..style(true)
        };
        assert_eq!(style.outline_width(3.0), 6.0);
    }

    #[test]
    fn test_zero_size_stroke_paints_nothing() {
        let mut surface = RecordingSurface::new(100, 100);
        shape_for(ShapeMode::Circle).draw(&mut surface, &cell(0.0), &style(true));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_style_from_config_clamps_coverage() {
        let config = WaveConfig {
            bar_coverage: 150.0,
            ..Default::default()
        };
        assert_eq!(ShapeStyle::from_config(&config).coverage, 1.0);
    }
}
