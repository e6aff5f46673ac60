//! Scene framework
//!
//! A scene owns one screen (warning, title, settings, credits, victory). It
//! never builds another scene directly: it returns a `Transition` naming the
//! next `SceneId`, and the game asks the factory in `scenes` to build it.

use rand::rngs::SmallRng;

use crate::assets::Assets;
use crate::audio::Audio;
use crate::input::{GameEvent, InputState, TimerQueue};
use crate::render::Framebuffer;
use crate::settings::Settings;
use crate::storage::LocalStorage;

/// Every screen the game can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    SeizureWarning,
    Title,
    Settings,
    /// `ending` is the post-game roll that hands over to the victory screen
    Credits { ending: bool },
    Victory,
}

/// What the active scene wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    None,
    Switch(SceneId),
    Quit,
}

/// State shared by all scenes
pub struct GameContext {
    pub settings: Settings,
    pub audio: Audio,
    pub assets: Assets,
    pub timers: TimerQueue,
    pub rng: SmallRng,
    /// Held inputs for the current frame
    pub input: InputState,
    /// Where settings are saved; `None` when no config dir is available
    pub storage: Option<LocalStorage>,
}

impl GameContext {
    /// Persist settings if a storage location exists. Failures are logged.
    pub fn save_settings(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match self.settings.save(storage) {
            Ok(()) => log::info!("settings saved to {:?}", storage.base_dir()),
            Err(e) => log::error!("failed to save settings: {}", e),
        }
    }
}

pub trait Scene {
    /// Short name for logs and the debug overlay
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, _ctx: &mut GameContext) {}

    fn on_exit(&mut self, _ctx: &mut GameContext) {}

    fn handle_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Transition;

    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) -> Transition {
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext);
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;

    use super::*;

    /// Silent, asset-less context with a fixed seed
    pub fn context() -> GameContext {
        GameContext {
            settings: Settings::default(),
            audio: Audio::silent(),
            assets: Assets::empty(),
            timers: TimerQueue::new(),
            rng: SmallRng::seed_from_u64(7),
            input: InputState::new(),
            storage: None,
        }
    }
}
