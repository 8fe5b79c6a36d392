//! Pointer state shared between the host's input handling and the render loop.

use std::sync::{Arc, Mutex, MutexGuard};

/// Pointer position in surface pixels, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    /// False once the pointer has left the surface.
    pub active: bool,
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, active: true }
    }

    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Writable pointer record read once per frame as a single consistent snapshot.
///
/// Clones share the same state, so the input side and the render side can each hold
/// one.
#[derive(Debug, Clone, Default)]
pub struct PointerCell {
    inner: Arc<Mutex<PointerState>>,
}

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PointerState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pointer moved to `(x, y)` over the surface.
    pub fn move_to(&self, x: f32, y: f32) {
        *self.lock() = PointerState::at(x, y);
    }

    /// Pointer left the surface. The last position is kept.
    pub fn leave(&self) {
        self.lock().active = false;
    }

    pub fn set(&self, state: PointerState) {
        *self.lock() = state;
    }

    pub fn snapshot(&self) -> PointerState {
        *self.lock()
    }
}
