//! Music and sound effects
//!
//! Everything is loaded once at boot. Tracks or sounds whose files are missing
//! are logged and then silently skipped, so the game runs without an assets
//! folder. Playback goes through macroquad's audio backend.

use std::collections::HashMap;
use std::path::Path;

use macroquad::audio::{load_sound, play_sound, set_sound_volume, stop_sound, PlaySoundParams, Sound};

use crate::config::{music, sfx};

pub struct Audio {
    music: HashMap<String, Sound>,
    sfx: HashMap<String, Sound>,
    /// Name of the track that is (or would be, if loaded) playing
    current_music: Option<String>,
    music_volume: f32,
    sfx_volume: f32,
}

impl Audio {
    /// No sounds loaded; all playback calls only track state
    pub fn silent() -> Self {
        Self {
            music: HashMap::new(),
            sfx: HashMap::new(),
            current_music: None,
            music_volume: 1.0,
            sfx_volume: 1.0,
        }
    }

    /// Load every known track and sound event under `assets_root`
    pub async fn load(assets_root: &Path) -> Self {
        let mut audio = Self::silent();

        for name in music::ALL {
            let path = assets_root.join("music").join(format!("{}.ogg", name));
            if let Some(sound) = load_one(&path).await {
                audio.music.insert(name.to_string(), sound);
            }
        }
        for name in sfx::ALL {
            let path = assets_root.join("sfx").join(format!("{}.wav", name));
            if let Some(sound) = load_one(&path).await {
                audio.sfx.insert(name.to_string(), sound);
            }
        }

        log::info!("loaded {} music tracks, {} sound events", audio.music.len(), audio.sfx.len());
        audio
    }

    pub fn set_volumes(&mut self, music_volume: f32, sfx_volume: f32) {
        self.music_volume = music_volume.clamp(0.0, 1.0);
        self.sfx_volume = sfx_volume.clamp(0.0, 1.0);
        if let Some(sound) = self.current_music.as_ref().and_then(|n| self.music.get(n)) {
            set_sound_volume(sound, self.music_volume);
        }
    }

    /// Loop `name`, replacing whatever is playing. Same track is a no-op.
    pub fn play_music(&mut self, name: &str) {
        if self.current_music.as_deref() == Some(name) {
            return;
        }
        self.stop_music();
        if let Some(sound) = self.music.get(name) {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: true,
                    volume: self.music_volume,
                },
            );
        }
        self.current_music = Some(name.to_string());
    }

    pub fn stop_music(&mut self) {
        if let Some(name) = self.current_music.take() {
            if let Some(sound) = self.music.get(&name) {
                stop_sound(sound);
            }
        }
    }

    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    /// Fire-and-forget sound event
    pub fn play_event(&self, name: &str) {
        match self.sfx.get(name) {
            Some(sound) => play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.sfx_volume,
                },
            ),
            None => log::trace!("sound event '{}' has no sound loaded", name),
        }
    }
}

async fn load_one(path: &Path) -> Option<Sound> {
    let path_str = path.to_string_lossy();
    match load_sound(&path_str).await {
        Ok(sound) => Some(sound),
        Err(e) => {
            log::warn!("failed to load {}: {}", path_str, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_tracks_current_music() {
        let mut audio = Audio::silent();
        assert_eq!(audio.current_music(), None);

        audio.play_music(music::CREDITS);
        assert_eq!(audio.current_music(), Some(music::CREDITS));

        audio.play_music(music::TITLE);
        assert_eq!(audio.current_music(), Some(music::TITLE));

        audio.stop_music();
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn test_missing_event_is_harmless() {
        let audio = Audio::silent();
        audio.play_event(sfx::MENU_MOVE);
    }

    #[test]
    fn test_volumes_clamped() {
        let mut audio = Audio::silent();
        audio.set_volumes(3.0, -2.0);
        assert_eq!(audio.music_volume, 1.0);
        assert_eq!(audio.sfx_volume, 0.0);
    }
}
