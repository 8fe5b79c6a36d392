//! Benchmarks for frame rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wave_canvas::config::{GridCell, WaveConfig};
use wave_canvas::pointer::PointerState;
use wave_canvas::render::WaveRenderer;
use wave_canvas::shapes::ShapeMode;
use wave_canvas::surface::{PixmapSurface, RecordingSurface};

fn bench_render_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resolution Scaling");

    let resolutions = [
        (640, 360, "360p"),
        (1280, 720, "720p"),
        (1920, 1080, "1080p"),
    ];
    let config = WaveConfig::default();

    for (width, height, name) in resolutions {
        let mut surface = match PixmapSurface::new(width, height) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Skipping {}: {}", name, e);
                continue;
            }
        };
        let mut renderer = WaveRenderer::new();
        group.bench_with_input(BenchmarkId::new("render_frame", name), &config, |b, config| {
            let mut time = 0.0;
            b.iter(|| {
                time += 0.016;
                black_box(renderer.render_frame(&mut surface, config, time, PointerState::inactive()));
            });
        });
    }

    group.finish();
}

fn bench_duplicate_grid(c: &mut Criterion) {
    let mut cells = Vec::new();
    for r in 0..3 {
        for col in 0..3 {
            cells.push(GridCell::new(r, col).with_rotation(((r + col) % 4) as f32 * 90.0));
        }
    }
    let config = WaveConfig {
        duplicate_mode_active: true,
        grid_rows: 3,
        grid_cols: 3,
        grid_config: cells,
        ..Default::default()
    };

    let mut surface = match PixmapSurface::new(1280, 720) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping duplicate grid benchmark: {}", e);
            return;
        }
    };
    let mut renderer = WaveRenderer::new();
    c.bench_function("duplicate_grid_3x3_720p", |b| {
        b.iter(|| {
            black_box(renderer.render_frame(&mut surface, &config, 1.0, PointerState::at(640.0, 360.0)));
        });
    });
}

fn bench_shape_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Shape Modes");

    for mode in ShapeMode::all() {
        let config = WaveConfig {
            shape_mode: *mode,
            ..Default::default()
        };
        let mut surface = RecordingSurface::new(1280, 720);
        let mut renderer = WaveRenderer::new();
        group.bench_with_input(BenchmarkId::from_parameter(mode.name()), &config, |b, config| {
            b.iter(|| {
                surface.take_commands();
                black_box(renderer.render_frame(&mut surface, config, 1.0, PointerState::inactive()));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_resolutions,
    bench_duplicate_grid,
    bench_shape_modes
);
criterion_main!(benches);
