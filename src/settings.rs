//! Player settings
//!
//! Persisted as RON in the user config directory. Missing fields fall back to
//! their defaults so older files keep loading after new options are added.

use serde::{Deserialize, Serialize};

use crate::config::SETTINGS_FILE;
use crate::storage::{LocalStorage, StorageError};

/// Frame rate cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS
    Fps30,
    /// 60 FPS
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Cycle to next value
    pub fn next(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Fps60,
            FpsLimit::Fps60 => FpsLimit::Unlocked,
            FpsLimit::Unlocked => FpsLimit::Fps30,
        }
    }

    /// Cycle to previous value
    pub fn prev(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Unlocked,
            FpsLimit::Fps60 => FpsLimit::Fps30,
            FpsLimit::Unlocked => FpsLimit::Fps60,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen corruption effects (credits, menus, logo)
    pub glitch_fx: bool,
    /// 0.0 - 1.0
    pub music_volume: f32,
    /// 0.0 - 1.0
    pub sfx_volume: f32,
    pub fullscreen: bool,
    pub fps_limit: FpsLimit,
    /// Go straight to the title screen at boot
    pub skip_seizure_warning: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glitch_fx: true,
            music_volume: 0.7,
            sfx_volume: 0.8,
            fullscreen: false,
            fps_limit: FpsLimit::Fps60,
            skip_seizure_warning: false,
        }
    }
}

/// Volume step used by the settings menu
pub const VOLUME_STEP: f32 = 0.1;

/// Step a volume up or down by one notch, wrapping past either end
pub fn step_volume(volume: f32, up: bool) -> f32 {
    let notches = (1.0 / VOLUME_STEP).round() as i32;
    let current = (volume.clamp(0.0, 1.0) / VOLUME_STEP).round() as i32;
    let next = if up { current + 1 } else { current - 1 };
    next.rem_euclid(notches + 1) as f32 * VOLUME_STEP
}

/// Volume as a whole percentage for labels
pub fn volume_percent(volume: f32) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u32
}

impl Settings {
    /// Parse settings from RON text
    pub fn from_ron(text: &str) -> Result<Self, StorageError> {
        let mut settings: Settings = ron::from_str(text)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_ron(&self) -> Result<String, StorageError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load from storage. A missing file yields defaults.
    pub fn load(storage: &LocalStorage) -> Result<Self, StorageError> {
        match storage.read_to_string(SETTINGS_FILE) {
            Ok(text) => Self::from_ron(&text),
            Err(StorageError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<(), StorageError> {
        storage.write(SETTINGS_FILE, self.to_ron()?.as_bytes())
    }

    /// Clamp values a hand-edited file may have pushed out of range
    fn sanitize(&mut self) {
        self.music_volume = if self.music_volume.is_finite() { self.music_volume.clamp(0.0, 1.0) } else { 0.7 };
        self.sfx_volume = if self.sfx_volume.is_finite() { self.sfx_volume.clamp(0.0, 1.0) } else { 0.8 };
    }
}
