//! Render loop controller.
//!
//! The host owns the scheduling (a display-refresh callback, a timer, a tokio
//! interval) and calls [`AnimationLoop::tick`] once per frame. The loop decides
//! whether a frame is due, advances time, snapshots the latest configuration and
//! pointer, and renders.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::config::WaveConfig;
use crate::pointer::PointerCell;
use crate::render::{FrameStats, WaveRenderer};
use crate::surface::Surface;

/// Time added per frame by the default fixed step.
pub const FRAME_STEP: f32 = 0.016;

/// How time advances between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStep {
    /// Constant increment per rendered frame.
    Fixed(f32),
    /// Wall-clock seconds since the previous rendered frame.
    Elapsed,
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::Fixed(FRAME_STEP)
    }
}

/// Latest configuration, swapped atomically by the host between frames.
///
/// Readers get an `Arc` snapshot, so a frame always sees one complete configuration.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Arc<WaveConfig>>>,
}

impl SharedConfig {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn snapshot(&self) -> Arc<WaveConfig> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, config: WaveConfig) {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(config);
    }

    /// Edit a copy of the current configuration and publish it.
    pub fn update<F: FnOnce(&mut WaveConfig)>(&self, edit: F) {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = WaveConfig::clone(&guard);
        edit(&mut next);
        *guard = Arc::new(next);
    }
}

/// Frame-driven animation state machine.
pub struct AnimationLoop {
    renderer: WaveRenderer,
    config: SharedConfig,
    pointer: PointerCell,
    step: TimeStep,
    time: f32,
    running: bool,
    visible: bool,
    last_tick: Option<Instant>,
    size: (u32, u32),
    frames: u64,
}

impl AnimationLoop {
    pub fn new(config: SharedConfig, pointer: PointerCell) -> Self {
        Self {
            renderer: WaveRenderer::new(),
            config,
            pointer,
            step: TimeStep::default(),
            time: 0.0,
            running: false,
            visible: true,
            last_tick: None,
            size: (0, 0),
            frames: 0,
        }
    }

    pub fn with_time_step(mut self, step: TimeStep) -> Self {
        self.step = step;
        self
    }

    /// Begin scheduling frames. Returns false if the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_tick = None;
        log::debug!("animation loop started at t={:.3}", self.time);
        true
    }

    /// Stop scheduling frames. Time is kept for a later restart.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("animation loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Pause while the surface is hidden. Time spent hidden is not replayed.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if visible && !self.visible {
            self.last_tick = None;
        }
        self.visible = visible;
    }

    /// Record the container size and return the backing surface size to allocate.
    pub fn on_resize(&mut self, container_width: u32, container_height: u32) -> (u32, u32) {
        self.size = self
            .config
            .snapshot()
            .surface_size(container_width, container_height);
        self.size
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the next `tick` will render.
    pub fn is_active(&self) -> bool {
        self.running && self.visible
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerCell {
        &self.pointer
    }

    /// Render the next frame if the loop is active.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Option<FrameStats> {
        self.tick_at(surface, Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit clock reading.
    pub fn tick_at(&mut self, surface: &mut dyn Surface, now: Instant) -> Option<FrameStats> {
        if !self.is_active() {
            return None;
        }
        self.advance(now);

        let config = self.config.snapshot();
        let pointer = self.pointer.snapshot();
        let stats = self
            .renderer
            .render_frame(surface, &config, self.time, pointer);
        self.frames += 1;
        Some(stats)
    }

    fn advance(&mut self, now: Instant) {
        let delta = match self.step {
            TimeStep::Fixed(step) => step,
            TimeStep::Elapsed => self
                .last_tick
                .map(|last| now.saturating_duration_since(last).as_secs_f32())
                .unwrap_or(0.0),
        };
        self.last_tick = Some(now);
        if delta.is_finite() && delta > 0.0 {
            self.time += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use std::time::Duration;

    fn looped() -> AnimationLoop {
        AnimationLoop::new(SharedConfig::default(), PointerCell::new())
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut animation = looped();
        assert!(animation.start());
        assert!(!animation.start());
        assert!(animation.is_running());
    }

    #[test]
    fn test_idle_loop_renders_nothing() {
        let mut animation = looped();
        let mut surface = RecordingSurface::new(10, 10);
        assert!(animation.tick(&mut surface).is_none());
        assert_eq!(animation.time(), 0.0);
    }

    #[test]
    fn test_fixed_step_advances_per_frame() {
        let mut animation = looped();
        let mut surface = RecordingSurface::new(10, 10);
        animation.start();
        animation.tick(&mut surface);
        animation.tick(&mut surface);
        assert!((animation.time() - 2.0 * FRAME_STEP).abs() < 1e-6);
        assert_eq!(animation.frames(), 2);
    }

    #[test]
    fn test_negative_fixed_step_never_rewinds() {
        let mut animation = looped().with_time_step(TimeStep::Fixed(-1.0));
        let mut surface = RecordingSurface::new(10, 10);
        animation.start();
        animation.tick(&mut surface);
        assert_eq!(animation.time(), 0.0);
    }

    #[test]
    fn test_elapsed_step_skips_hidden_time() {
        let mut animation = looped().with_time_step(TimeStep::Elapsed);
        let mut surface = RecordingSurface::new(10, 10);
        let t0 = Instant::now();
        animation.start();
        animation.tick_at(&mut surface, t0);
        animation.tick_at(&mut surface, t0 + Duration::from_millis(100));
        assert!((animation.time() - 0.1).abs() < 1e-4);

        animation.on_visibility_change(false);
        assert!(animation
            .tick_at(&mut surface, t0 + Duration::from_secs(5))
            .is_none());
        animation.on_visibility_change(true);
        animation.tick_at(&mut surface, t0 + Duration::from_secs(10));
        assert!((animation.time() - 0.1).abs() < 1e-4);
        animation.tick_at(&mut surface, t0 + Duration::from_millis(10_050));
        assert!((animation.time() - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_shared_config_update_is_seen_next_frame() {
        let shared = SharedConfig::default();
        let before = shared.snapshot();
        shared.update(|config| config.bars_per_row = 5.0);
        assert_eq!(before.bars_per_row, 50.0);
        assert_eq!(shared.snapshot().bars_per_row, 5.0);
    }
}
