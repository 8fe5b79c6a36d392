//! Offline rendering: configuration files in, PNG frames out.

use std::path::{Path, PathBuf};

use crate::animation::FRAME_STEP;
use crate::config::WaveConfig;
use crate::pointer::PointerState;
use crate::render::{FrameStats, WaveRenderer};
use crate::surface::{PixmapSurface, SurfaceError};

/// Settings for rendering a numbered PNG sequence.
#[derive(Debug, Clone)]
pub struct SequenceConfig {
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    /// Time of the first frame.
    pub start_time: f32,
    /// Time added per frame.
    pub time_step: f32,
    pub output_dir: PathBuf,
    /// File name prefix; frames are written as `<prefix>_00000.png`.
    pub prefix: String,
    pub pointer: PointerState,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_count: 60,
            start_time: 0.0,
            time_step: FRAME_STEP,
            output_dir: PathBuf::from("frames"),
            prefix: "frame".to_string(),
            pointer: PointerState::inactive(),
        }
    }
}

impl SequenceConfig {
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.output_dir
            .join(format!("{}_{:05}.png", self.prefix, index))
    }

    pub fn frame_time(&self, index: u32) -> f32 {
        self.start_time + self.time_step * index as f32
    }
}

/// Errors that can occur during offline rendering.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Parse a configuration record from JSON. Missing fields take their defaults.
pub fn parse_config(json: &str) -> Result<WaveConfig, PipelineError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WaveConfig, PipelineError> {
    let json = std::fs::read_to_string(path.as_ref())?;
    parse_config(&json)
}

/// Render a single frame to an in-memory surface.
pub fn render_surface(
    config: &WaveConfig,
    width: u32,
    height: u32,
    time: f32,
    pointer: PointerState,
) -> Result<(PixmapSurface, FrameStats), PipelineError> {
    let mut surface = PixmapSurface::new(width, height)?;
    let stats = WaveRenderer::new().render_frame(&mut surface, config, time, pointer);
    Ok((surface, stats))
}

/// Render a single frame, composite it over the background and write it as PNG.
pub fn render_png<P: AsRef<Path>>(
    config: &WaveConfig,
    width: u32,
    height: u32,
    time: f32,
    pointer: PointerState,
    output_path: P,
) -> Result<FrameStats, PipelineError> {
    let (surface, stats) = render_surface(config, width, height, time, pointer)?;
    surface.save_png(output_path.as_ref(), config.bg_rgba(), config.blend_mode())?;
    log::info!(
        "Rendered {} shapes to {}",
        stats.shapes_drawn,
        output_path.as_ref().display()
    );
    Ok(stats)
}

/// Render `frame_count` consecutive frames into `output_dir`.
///
/// Returns the written paths in frame order.
pub fn render_sequence(
    config: &WaveConfig,
    sequence: &SequenceConfig,
    progress_callback: Option<Box<dyn Fn(f32) + Send>>,
) -> Result<Vec<PathBuf>, PipelineError> {
    std::fs::create_dir_all(&sequence.output_dir)?;

    let mut surface = PixmapSurface::new(sequence.width, sequence.height)?;
    let mut renderer = WaveRenderer::new();
    let background = config.bg_rgba();
    let blend = config.blend_mode();
    let mut paths = Vec::with_capacity(sequence.frame_count as usize);

    log::info!(
        "Rendering {} frames at {}x{} into {}",
        sequence.frame_count,
        sequence.width,
        sequence.height,
        sequence.output_dir.display()
    );

    for index in 0..sequence.frame_count {
        renderer.render_frame(
            &mut surface,
            config,
            sequence.frame_time(index),
            sequence.pointer,
        );
        let path = sequence.frame_path(index);
        surface.save_png(&path, background, blend)?;
        paths.push(path);

        if let Some(ref callback) = progress_callback {
            callback((index + 1) as f32 / sequence.frame_count as f32);
        }
    }

    log::info!("Finished {} frames", paths.len());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_frame_naming() {
        let sequence = SequenceConfig {
            output_dir: PathBuf::from("out"),
            prefix: "wave".to_string(),
            ..Default::default()
        };
        assert_eq!(sequence.frame_path(7), PathBuf::from("out").join("wave_00007.png"));
    }

    #[test]
    fn test_sequence_frame_time() {
        let sequence = SequenceConfig {
            start_time: 1.0,
            time_step: 0.5,
            ..Default::default()
        };
        assert_eq!(sequence.frame_time(4), 3.0);
    }

    #[test]
    fn test_parse_config_rejects_invalid_json() {
        assert!(matches!(parse_config("{"), Err(PipelineError::Json(_))));
    }

    #[test]
    fn test_zero_size_render_is_an_error() {
        let result = render_surface(&WaveConfig::default(), 0, 0, 0.0, PointerState::inactive());
        assert!(matches!(
            result,
            Err(PipelineError::Surface(SurfaceError::ZeroSize { .. }))
        ));
    }
}
