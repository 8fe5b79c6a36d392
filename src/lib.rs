//! Wave Canvas Core
//!
//! Rendering engine for animated, parametric grids of repeating shapes.
//!
//! # Features
//!
//! - Thickness oscillator with loop, ping-pong and reset waves, cutoffs, trails,
//!   wave spacing, logarithmic shaping and pointer amplitude modulation
//! - 18 shape primitives, filled or outlined
//! - Duplicate mode: rotated, clipped sub-grids with per-cell configuration overrides
//! - CPU rasterisation via tiny-skia, PNG export via `image`
//! - Frame-driven animation loop with visibility and resize handling
//! - Python bindings via PyO3 (when `python` feature is enabled)

pub mod animation;
pub mod config;
pub mod oscillator;
pub mod pipeline;
pub mod pointer;
pub mod render;
pub mod shapes;
pub mod surface;
pub mod trig;

// Re-export commonly used types
pub use animation::{AnimationLoop, SharedConfig, TimeStep, FRAME_STEP};
pub use config::{AnimationMode, BlendModeName, GridCell, Rgba, WaveConfig};
pub use oscillator::{shape_size, ShapeSample};
pub use pipeline::{
    load_config, parse_config, render_png, render_sequence, PipelineError, SequenceConfig,
};
pub use pointer::{PointerCell, PointerState};
pub use render::{render_frame, FrameStats, WaveRenderer};
pub use shapes::{shape_for, Shape, ShapeMode};
pub use surface::{PixmapSurface, RecordingSurface, Surface, SurfaceError};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use crate::config::Rgba;
    use crate::oscillator::{self, ShapeSample};
    use crate::pipeline;
    use crate::pointer::PointerState;
    use pyo3::exceptions::PyRuntimeError;
    use pyo3::prelude::*;

    /// Render one frame of a JSON configuration to a PNG file.
    #[pyfunction]
    #[pyo3(signature = (config_json, output_path, width=1280, height=720, time=0.0))]
    fn render_png(
        py: Python<'_>,
        config_json: &str,
        output_path: &str,
        width: u32,
        height: u32,
        time: f32,
    ) -> PyResult<usize> {
        let config =
            pipeline::parse_config(config_json).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        let output = output_path.to_string();
        let stats = py
            .detach(|| {
                pipeline::render_png(&config, width, height, time, PointerState::inactive(), &output)
            })
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(stats.shapes_drawn)
    }

    /// Evaluate the thickness oscillator at one grid position.
    #[pyfunction]
    #[pyo3(signature = (config_json, x, y, row, time, width, height))]
    fn shape_size(
        config_json: &str,
        x: f32,
        y: f32,
        row: usize,
        time: f32,
        width: f32,
        height: f32,
    ) -> PyResult<f32> {
        let config =
            pipeline::parse_config(config_json).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        let sample = ShapeSample::new(x, y, row, time, width, height);
        Ok(oscillator::shape_size(&sample, &config))
    }

    /// Parse a CSS colour string to an RGBA tuple.
    #[pyfunction]
    fn parse_color(css: &str) -> PyResult<(u8, u8, u8, u8)> {
        let c = Rgba::parse(css)
            .ok_or_else(|| PyRuntimeError::new_err(format!("Invalid color: {}", css)))?;
        Ok((c.r, c.g, c.b, c.a))
    }

    /// List all available shape modes.
    #[pyfunction]
    fn list_shapes() -> Vec<(String, String)> {
        crate::shapes::ShapeMode::all()
            .iter()
            .map(|s| (s.name().to_string(), s.description().to_string()))
            .collect()
    }

    /// Wave Canvas Python module
    #[pymodule]
    pub fn wave_canvas(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add("__version__", env!("CARGO_PKG_VERSION"))?;
        m.add_function(wrap_pyfunction!(render_png, m)?)?;
        m.add_function(wrap_pyfunction!(shape_size, m)?)?;
        m.add_function(wrap_pyfunction!(parse_color, m)?)?;
        m.add_function(wrap_pyfunction!(list_shapes, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python_bindings::*;
