//! Wave configuration record.
//!
//! Mirrors the persisted block attributes: a flat camelCase JSON object with the
//! structure, colour, animation, pointer, blend and duplicate-mode groups. Every
//! field has a default so partial or older documents still load, and enum values
//! that are not recognised fall back to their default variant.

pub mod color;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use color::Rgba;

pub use crate::shapes::ShapeMode;

/// Reference extent that `barsPerRow` and `waveRows` are calibrated against.
pub const REFERENCE_SIZE: f32 = 800.0;

/// Keys that only make sense on the global configuration and are never taken
/// from a grid cell's overrides.
pub const GLOBAL_ONLY_KEYS: &[&str] = &[
    "bgColor",
    "snapToGrid",
    "duplicateModeActive",
    "gridRows",
    "gridCols",
    "gridConfig",
];

/// How the wave value evolves with phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimationMode {
    #[default]
    Loop,
    PingPong,
    Reset,
}

impl AnimationMode {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "loop" => Some(Self::Loop),
            "pingpong" | "ping-pong" => Some(Self::PingPong),
            "reset" | "saw" | "sawtooth" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::PingPong => "pingpong",
            Self::Reset => "reset",
        }
    }
}

impl From<String> for AnimationMode {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

impl From<AnimationMode> for String {
    fn from(mode: AnimationMode) -> Self {
        mode.name().to_string()
    }
}

/// CSS `mix-blend-mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlendModeName {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendModeName {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|mode| mode.name() == s.to_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Normal,
            Self::Multiply,
            Self::Screen,
            Self::Overlay,
            Self::Darken,
            Self::Lighten,
            Self::ColorDodge,
            Self::ColorBurn,
            Self::HardLight,
            Self::SoftLight,
            Self::Difference,
            Self::Exclusion,
            Self::Hue,
            Self::Saturation,
            Self::Color,
            Self::Luminosity,
        ]
    }

    pub fn to_skia(self) -> tiny_skia::BlendMode {
        use tiny_skia::BlendMode;
        match self {
            Self::Normal => BlendMode::SourceOver,
            Self::Multiply => BlendMode::Multiply,
            Self::Screen => BlendMode::Screen,
            Self::Overlay => BlendMode::Overlay,
            Self::Darken => BlendMode::Darken,
            Self::Lighten => BlendMode::Lighten,
            Self::ColorDodge => BlendMode::ColorDodge,
            Self::ColorBurn => BlendMode::ColorBurn,
            Self::HardLight => BlendMode::HardLight,
            Self::SoftLight => BlendMode::SoftLight,
            Self::Difference => BlendMode::Difference,
            Self::Exclusion => BlendMode::Exclusion,
            Self::Hue => BlendMode::Hue,
            Self::Saturation => BlendMode::Saturation,
            Self::Color => BlendMode::Color,
            Self::Luminosity => BlendMode::Luminosity,
        }
    }
}

impl From<String> for BlendModeName {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

impl From<BlendModeName> for String {
    fn from(mode: BlendModeName) -> Self {
        mode.name().to_string()
    }
}

/// One entry of the duplicate-mode grid.
///
/// Any key besides the geometry fields is an instance override and supersedes the
/// global value of the same name for this cell only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    #[serde(default)]
    pub r: i32,
    #[serde(default)]
    pub c: i32,
    #[serde(default = "one")]
    pub rs: i32,
    #[serde(default = "one")]
    pub cs: i32,
    /// Degrees, clockwise in screen space.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub overrides: Map<String, Value>,
}

fn one() -> i32 {
    1
}

impl GridCell {
    /// An active 1x1 cell without overrides.
    pub fn new(r: i32, c: i32) -> Self {
        Self {
            r,
            c,
            rs: 1,
            cs: 1,
            rotation: 0.0,
            is_active: true,
            overrides: Map::new(),
        }
    }

    pub fn with_span(mut self, rs: i32, cs: i32) -> Self {
        self.rs = rs;
        self.cs = cs;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set an instance override; `Value::Null` removes it.
    pub fn with_override(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set_override(key, value);
        self
    }

    pub fn set_override(&mut self, key: &str, value: impl Into<Value>) {
        match value.into() {
            Value::Null => {
                self.overrides.remove(key);
            }
            value => {
                self.overrides.insert(key.to_string(), value);
            }
        }
    }

    /// Whether the cell's origin lies on a `rows` x `cols` grid and its spans are usable.
    pub fn fits(&self, rows: u32, cols: u32) -> bool {
        self.r >= 0
            && self.c >= 0
            && (self.r as u32) < rows
            && (self.c as u32) < cols
            && self.rs >= 1
            && self.cs >= 1
    }

    /// `(rs, cs)` capped at the grid dimensions. A cell may overrun the grid edge but
    /// never spans more than the whole grid.
    pub fn bounded_spans(&self, rows: u32, cols: u32) -> (u32, u32) {
        let bound = |span: i32, limit: u32| (span.max(0) as u32).min(limit);
        (bound(self.rs, rows), bound(self.cs, cols))
    }
}

/// Complete wave configuration, read-only for the duration of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveConfig {
    // Structure
    pub shape_mode: ShapeMode,
    pub stroke_only: bool,
    /// Outline width at maximum shape size.
    pub stroke_width: f32,
    pub wave_rows: f32,
    pub bars_per_row: f32,
    pub min_bar_width: f32,
    pub max_bar_width: f32,
    /// Percentage of the row band covered by a bar (bars shape only).
    pub bar_coverage: f32,
    pub snap_to_grid: bool,
    /// Width / height of the backing surface, when fixed.
    pub aspect_ratio: Option<f32>,

    // Colours
    pub bg_color: String,
    pub bar_color: String,

    // Animation
    pub animate_thickness: bool,
    pub animation_mode: AnimationMode,
    pub thickness_speed: f32,
    pub thickness_offset: f32,
    pub wave_length: f32,
    pub row_peak_offset: f32,
    pub alternate_direction: bool,
    pub combine_offsets: bool,
    /// Degrees; only used by shapes other than bars.
    pub animation_direction: f32,
    pub wave_spacing: f32,
    pub thickness_cutoff: f32,
    pub trail_cutoff: f32,
    pub trail_cutoff_start: f32,
    pub log_scale: bool,
    pub log_strength: f32,
    pub log_reverse: bool,

    // Pointer
    pub mouse_amplitude: bool,
    pub amplitude_strength: f32,

    // Blend
    pub enable_mix_blend: bool,
    pub mix_blend_mode: BlendModeName,

    // Duplicate mode
    pub duplicate_mode_active: bool,
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub grid_config: Vec<GridCell>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            shape_mode: ShapeMode::Bars,
            stroke_only: false,
            stroke_width: 1.0,
            wave_rows: 10.0,
            bars_per_row: 50.0,
            min_bar_width: 1.0,
            max_bar_width: 10.0,
            bar_coverage: 100.0,
            snap_to_grid: false,
            aspect_ratio: None,
            bg_color: "#ffffff".to_string(),
            bar_color: "#000000".to_string(),
            animate_thickness: true,
            animation_mode: AnimationMode::Loop,
            thickness_speed: 1.0,
            thickness_offset: 0.0,
            wave_length: 2.0,
            row_peak_offset: 0.0,
            alternate_direction: false,
            combine_offsets: false,
            animation_direction: 0.0,
            wave_spacing: 0.0,
            thickness_cutoff: 0.0,
            trail_cutoff: 0.0,
            trail_cutoff_start: 0.0,
            log_scale: false,
            log_strength: 2.0,
            log_reverse: false,
            mouse_amplitude: false,
            amplitude_strength: 2.0,
            enable_mix_blend: false,
            mix_blend_mode: BlendModeName::Normal,
            duplicate_mode_active: false,
            grid_rows: 2,
            grid_cols: 2,
            grid_config: Vec::new(),
        }
    }
}

impl WaveConfig {
    /// Shape colour, falling back to black.
    pub fn bar_rgba(&self) -> Rgba {
        Rgba::parse_or(&self.bar_color, Rgba::BLACK)
    }

    /// Background colour, falling back to white.
    pub fn bg_rgba(&self) -> Rgba {
        Rgba::parse_or(&self.bg_color, Rgba::WHITE)
    }

    /// Blend mode to composite the shape layer with, `None` meaning plain source-over.
    pub fn blend_mode(&self) -> Option<BlendModeName> {
        (self.enable_mix_blend && self.mix_blend_mode != BlendModeName::Normal)
            .then_some(self.mix_blend_mode)
    }

    /// Effective configuration for one grid cell: the global values with the cell's
    /// overrides applied key by key.
    ///
    /// A cell without overrides borrows `self`. Overrides that do not type-check
    /// against the configuration are rejected as a whole and the cell falls back to
    /// the global values.
    pub fn resolve(&self, cell: &GridCell) -> Cow<'_, WaveConfig> {
        let applicable: Vec<(&String, &Value)> = cell
            .overrides
            .iter()
            .filter(|(key, _)| !GLOBAL_ONLY_KEYS.contains(&key.as_str()))
            .collect();
        if applicable.is_empty() {
            return Cow::Borrowed(self);
        }

        let mut merged = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => return Cow::Borrowed(self),
        };
        merged.remove("gridConfig");
        for (key, value) in applicable {
            merged.insert(key.clone(), value.clone());
        }

        match serde_json::from_value::<WaveConfig>(Value::Object(merged)) {
            Ok(resolved) => Cow::Owned(resolved),
            Err(err) => {
                log::warn!(
                    "ignoring overrides of grid cell ({}, {}): {}",
                    cell.r,
                    cell.c,
                    err
                );
                Cow::Borrowed(self)
            }
        }
    }

    /// Backing surface size for a container of the given pixel size.
    pub fn surface_size(&self, container_width: u32, container_height: u32) -> (u32, u32) {
        match self.aspect_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => {
                let height = (container_width as f32 / ratio).round().max(0.0) as u32;
                (container_width, height)
            }
            _ => (container_width, container_height),
        }
    }

    /// Grid dimensions with zero guarded to one.
    pub fn grid_dims(&self) -> (u32, u32) {
        (self.grid_rows.max(1), self.grid_cols.max(1))
    }
}
