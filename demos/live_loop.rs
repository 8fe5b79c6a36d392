//! Example: drive the animation loop from a tokio interval.
//!
//! Simulates a host page: a pointer sweeps across the surface, the surface is hidden
//! for a while and resized once, and the last frame is written as PNG.
//!
//! Run with:
//!     cargo run --example live_loop --features tokio -- [config.json] [output.png]

use std::time::Duration;

use anyhow::Context;
use wave_canvas::animation::{AnimationLoop, SharedConfig};
use wave_canvas::config::{GridCell, WaveConfig};
use wave_canvas::pipeline::load_config;
use wave_canvas::pointer::PointerCell;
use wave_canvas::shapes::ShapeMode;
use wave_canvas::surface::PixmapSurface;

const FRAMES: u32 = 180;

fn demo_config() -> WaveConfig {
    WaveConfig {
        shape_mode: ShapeMode::Circle,
        bar_color: "#f2f2f2".to_string(),
        bg_color: "#141414".to_string(),
        mouse_amplitude: true,
        amplitude_strength: 2.5,
        duplicate_mode_active: true,
        grid_rows: 2,
        grid_cols: 2,
        grid_config: vec![
            GridCell::new(0, 0).with_span(1, 2),
            GridCell::new(1, 0).with_rotation(90.0),
            GridCell::new(1, 1).with_override("shapeMode", "bars"),
        ],
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path).with_context(|| format!("loading {}", path))?,
        None => demo_config(),
    };
    let output = args.next().unwrap_or_else(|| "live_loop.png".to_string());

    let shared = SharedConfig::new(config);
    let pointer = PointerCell::new();
    let mut animation = AnimationLoop::new(shared.clone(), pointer.clone());

    let (width, height) = animation.on_resize(960, 540);
    let mut surface = PixmapSurface::new(width, height)?;
    animation.start();

    let mut interval = tokio::time::interval(Duration::from_millis(16));
    let mut shapes = 0;
    for frame in 0..FRAMES {
        interval.tick().await;

        let progress = frame as f32 / FRAMES as f32;
        pointer.move_to(progress * width as f32, height as f32 * 0.5);

        match frame {
            60 => animation.on_visibility_change(false),
            90 => animation.on_visibility_change(true),
            120 => {
                let (w, h) = animation.on_resize(1280, 720);
                surface.resize(w, h)?;
            }
            _ => {}
        }

        if let Some(stats) = animation.tick(&mut surface) {
            shapes += stats.shapes_drawn;
        }
    }
    animation.stop();
    pointer.leave();

    let config = shared.snapshot();
    surface
        .save_png(&output, config.bg_rgba(), config.blend_mode())
        .with_context(|| format!("writing {}", output))?;

    println!(
        "Rendered {} frames ({} shapes), t = {:.3}s, last frame written to {}",
        animation.frames(),
        shapes,
        animation.time(),
        output
    );
    Ok(())
}
