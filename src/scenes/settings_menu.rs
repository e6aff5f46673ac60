//! Settings menu. Changes apply immediately and are saved on exit.

use macroquad::prelude::KeyCode;

use crate::input::GameEvent;
use crate::render::{draw_glitch_text, Color, Framebuffer};
use crate::scene::{GameContext, Scene, SceneId, Transition};
use crate::settings::{step_volume, volume_percent, Settings};
use crate::ui::{MenuEntry, VerticalMenu};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsAction {
    GlitchFx,
    MusicVolume,
    SfxVolume,
    Fullscreen,
    FpsLimit,
    Back,
}

const ENTRIES: [SettingsAction; 6] = [
    SettingsAction::GlitchFx,
    SettingsAction::MusicVolume,
    SettingsAction::SfxVolume,
    SettingsAction::Fullscreen,
    SettingsAction::FpsLimit,
    SettingsAction::Back,
];

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

fn label(action: SettingsAction, settings: &Settings) -> String {
    match action {
        SettingsAction::GlitchFx => format!("Glitch FX: {}", on_off(settings.glitch_fx)),
        SettingsAction::MusicVolume => format!("Music Volume: {}%", volume_percent(settings.music_volume)),
        SettingsAction::SfxVolume => format!("SFX Volume: {}%", volume_percent(settings.sfx_volume)),
        SettingsAction::Fullscreen => format!("Fullscreen: {}", on_off(settings.fullscreen)),
        SettingsAction::FpsLimit => format!("FPS Limit: {}", settings.fps_limit.label()),
        SettingsAction::Back => "Back".to_string(),
    }
}

/// Change one setting. `forward` picks the direction for cycling values.
fn adjust(settings: &mut Settings, action: SettingsAction, forward: bool) {
    match action {
        SettingsAction::GlitchFx => settings.glitch_fx = !settings.glitch_fx,
        SettingsAction::MusicVolume => settings.music_volume = step_volume(settings.music_volume, forward),
        SettingsAction::SfxVolume => settings.sfx_volume = step_volume(settings.sfx_volume, forward),
        SettingsAction::Fullscreen => settings.fullscreen = !settings.fullscreen,
        SettingsAction::FpsLimit => {
            settings.fps_limit = if forward {
                settings.fps_limit.next()
            } else {
                settings.fps_limit.prev()
            }
        }
        SettingsAction::Back => {}
    }
}

pub struct SettingsScene {
    menu: VerticalMenu<SettingsAction>,
}

impl SettingsScene {
    pub fn new() -> Self {
        Self {
            menu: VerticalMenu::new(Vec::new()),
        }
    }

    fn refresh_labels(&mut self, settings: &Settings) {
        let selected = self.menu.selected;
        let anim = self.menu.anim_progress;
        self.menu = VerticalMenu::new(ENTRIES.iter().map(|&a| MenuEntry::new(label(a, settings), a)).collect());
        self.menu.selected = selected.min(ENTRIES.len() - 1);
        self.menu.anim_progress = anim;
    }

    fn apply(&mut self, action: SettingsAction, forward: bool, ctx: &mut GameContext) {
        adjust(&mut ctx.settings, action, forward);
        ctx.audio.set_volumes(ctx.settings.music_volume, ctx.settings.sfx_volume);
        log::debug!("{}", label(action, &ctx.settings));
        self.refresh_labels(&ctx.settings);
    }
}

impl Scene for SettingsScene {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn on_enter(&mut self, ctx: &mut GameContext) {
        self.refresh_labels(&ctx.settings);
    }

    fn on_exit(&mut self, ctx: &mut GameContext) {
        ctx.save_settings();
    }

    fn handle_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Transition {
        match event {
            GameEvent::KeyDown(KeyCode::Escape) => return Transition::Switch(SceneId::Title),
            GameEvent::KeyDown(key @ (KeyCode::Left | KeyCode::Right | KeyCode::A | KeyCode::D)) => {
                if let Some(action) = self.menu.selected_action() {
                    let forward = matches!(key, KeyCode::Right | KeyCode::D);
                    self.apply(action, forward, ctx);
                }
                return Transition::None;
            }
            _ => {}
        }

        match self.menu.handle_event(event, &ctx.audio) {
            Some(SettingsAction::Back) => Transition::Switch(SceneId::Title),
            Some(action) => {
                self.apply(action, true, ctx);
                Transition::None
            }
            None => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut GameContext) -> Transition {
        self.menu.update(dt);
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        fb.clear(Color::BLACK);
        let font = ctx.assets.font(48, true);
        let title_y = (fb.height as f32 * 0.2) as i32;
        draw_glitch_text(fb, &font, "SETTINGS", title_y, Color::WHITE, ctx.settings.glitch_fx, &mut ctx.rng);
        let glitch_fx = ctx.settings.glitch_fx;
        self.menu.draw(fb, None, glitch_fx, &mut ctx.rng);
    }
}
