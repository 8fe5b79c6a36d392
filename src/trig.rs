//! Cached sines and cosines of the angles a configuration uses.
//!
//! Angles come from `animationDirection` (global and per-cell overrides) and from the
//! duplicate-mode cell rotations. The cache carries an invalidation key hashed over
//! exactly those fields; when the key changes, every entry is dropped and recomputed
//! lazily on first use.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde_json::Value;

use crate::config::WaveConfig;

/// Derived-state cache of `(sin, cos)` pairs keyed by angle in degrees.
#[derive(Debug, Default, Clone)]
pub struct TrigCache {
    key: Option<u64>,
    angles: HashMap<u32, (f32, f32)>,
    misses: u64,
}

impl TrigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidation key of a configuration: a hash of every angle it can draw with.
    pub fn key_for(config: &WaveConfig) -> u64 {
        let mut hasher = DefaultHasher::new();
        config.animation_direction.to_bits().hash(&mut hasher);
        config.duplicate_mode_active.hash(&mut hasher);
        for cell in &config.grid_config {
            cell.rotation.to_bits().hash(&mut hasher);
            match cell.overrides.get("animationDirection") {
                Some(Value::Number(n)) => n.to_string().hash(&mut hasher),
                Some(_) | None => 0u8.hash(&mut hasher),
            }
        }
        hasher.finish()
    }

    /// Drop cached values if the angle fields of `config` changed since the last sync.
    ///
    /// Returns whether the cache was invalidated.
    pub fn sync(&mut self, config: &WaveConfig) -> bool {
        let key = Self::key_for(config);
        if self.key == Some(key) {
            return false;
        }
        if self.key.is_some() {
            log::debug!("angle configuration changed, dropping {} cached angles", self.angles.len());
        }
        self.key = Some(key);
        self.angles.clear();
        true
    }

    /// `(sin, cos)` of an angle in degrees.
    pub fn sin_cos(&mut self, degrees: f32) -> (f32, f32) {
        let bits = degrees.to_bits();
        if let Some(&pair) = self.angles.get(&bits) {
            return pair;
        }
        self.misses += 1;
        let pair = degrees.to_radians().sin_cos();
        self.angles.insert(bits, pair);
        pair
    }

    /// Unit vector `(x, y)` pointing along an animation direction in degrees.
    pub fn direction(&mut self, degrees: f32) -> (f32, f32) {
        let (sin, cos) = self.sin_cos(degrees);
        (cos, sin)
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Number of values computed rather than served from the cache.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
