//! User-facing configuration
//!
//! [`Settings`] mirrors what a control surface persists between runs: the
//! master enable switch and the two knob positions. [`RenderConfig`] tunes
//! offline rendering.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{CafeModeError, Result};

/// Persisted control-surface state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master enable switch
    pub enabled: bool,
    /// Intensity knob, 0-1
    pub intensity: f32,
    /// Spatial width knob, 0-1
    pub spatial_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
            spatial_width: 0.5,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// A missing file yields defaults. Knob values are clamped to `[0, 1]`
    /// and non-finite values fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| CafeModeError::SettingsError {
                details: format!("{}: {}", path.display(), e),
            })?;

        info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Write settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Clamp knob values into their UI range
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let knob = |v: f32, fallback: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback };
        Self {
            enabled: self.enabled,
            intensity: knob(self.intensity, defaults.intensity),
            spatial_width: knob(self.spatial_width, defaults.spatial_width),
        }
    }
}

/// Default block size for offline rendering, in frames
pub const DEFAULT_BLOCK_FRAMES: usize = 256;

/// Offline rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Frames per process call; parameters are sampled once per block
    pub block_frames: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            block_frames: DEFAULT_BLOCK_FRAMES,
        }
    }
}

impl RenderConfig {
    pub fn with_block_frames(block_frames: usize) -> Self {
        Self {
            block_frames: block_frames.max(1),
        }
    }
}
