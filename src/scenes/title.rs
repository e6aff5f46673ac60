//! Title screen with the main menu

use rand::Rng;

use crate::config::music;
use crate::fx::glitch;
use crate::input::GameEvent;
use crate::render::{draw_glitch_text, BlendMode, Color, Framebuffer};
use crate::scene::{GameContext, Scene, SceneId, Transition};
use crate::ui::{MenuEntry, VerticalMenu};

const TITLE_TEXT: &str = "REALITY COLLAPSING";
const TITLE_FONT_SIZE: u16 = 72;
/// Chance per frame that the logo gets a ghost copy
const LOGO_GHOST_CHANCE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleAction {
    WatchEnding,
    Settings,
    Credits,
    Quit,
}

pub struct TitleScene {
    menu: VerticalMenu<TitleAction>,
}

impl TitleScene {
    pub fn new() -> Self {
        Self {
            menu: VerticalMenu::new(vec![
                MenuEntry::new("Watch Ending", TitleAction::WatchEnding),
                MenuEntry::new("Settings", TitleAction::Settings),
                MenuEntry::new("Credits", TitleAction::Credits),
                MenuEntry::new("Quit", TitleAction::Quit),
            ]),
        }
    }

    fn draw_logo(&self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        let logo_y = (fb.height as f32 * 0.23) as i32;
        let glitch_fx = ctx.settings.glitch_fx;

        let Some(logo) = &ctx.assets.logo else {
            let font = ctx.assets.font(TITLE_FONT_SIZE, true);
            draw_glitch_text(fb, &font, TITLE_TEXT, logo_y, Color::WHITE, glitch_fx, &mut ctx.rng);
            return;
        };

        let x = (fb.width as i32 - logo.width as i32) / 2;
        let y = logo_y - logo.height as i32 / 2;
        if glitch_fx && ctx.rng.gen_bool(LOGO_GHOST_CHANCE) {
            let dx = ctx.rng.gen_range(-6..=6);
            fb.blit(logo, x + dx, y, BlendMode::Add);
        }
        fb.blit(logo, x, y, BlendMode::Opaque);
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn on_enter(&mut self, ctx: &mut GameContext) {
        ctx.audio.play_music(music::TITLE);
    }

    fn handle_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Transition {
        match self.menu.handle_event(event, &ctx.audio) {
            Some(TitleAction::WatchEnding) => Transition::Switch(SceneId::Credits { ending: true }),
            Some(TitleAction::Settings) => Transition::Switch(SceneId::Settings),
            Some(TitleAction::Credits) => Transition::Switch(SceneId::Credits { ending: false }),
            Some(TitleAction::Quit) => Transition::Quit,
            None => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut GameContext) -> Transition {
        self.menu.update(dt);
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        fb.clear(Color::BLACK);
        if ctx.settings.glitch_fx {
            glitch::scanlines(fb, &mut ctx.rng);
        }
        self.draw_logo(fb, ctx);
        let glitch_fx = ctx.settings.glitch_fx;
        self.menu.draw(fb, None, glitch_fx, &mut ctx.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::context;
    use macroquad::prelude::KeyCode;

    fn press(scene: &mut TitleScene, ctx: &mut GameContext, key: KeyCode) -> Transition {
        scene.handle_event(&GameEvent::KeyDown(key), ctx)
    }

    #[test]
    fn test_enter_plays_title_music() {
        let mut ctx = context();
        TitleScene::new().on_enter(&mut ctx);
        assert_eq!(ctx.audio.current_music(), Some(music::TITLE));
    }

    #[test]
    fn test_menu_transitions() {
        let mut ctx = context();
        let mut scene = TitleScene::new();
        assert_eq!(
            press(&mut scene, &mut ctx, KeyCode::Enter),
            Transition::Switch(SceneId::Credits { ending: true })
        );
        press(&mut scene, &mut ctx, KeyCode::Down);
        assert_eq!(press(&mut scene, &mut ctx, KeyCode::Enter), Transition::Switch(SceneId::Settings));
        press(&mut scene, &mut ctx, KeyCode::Down);
        assert_eq!(
            press(&mut scene, &mut ctx, KeyCode::Space),
            Transition::Switch(SceneId::Credits { ending: false })
        );
        press(&mut scene, &mut ctx, KeyCode::S);
        assert_eq!(press(&mut scene, &mut ctx, KeyCode::Enter), Transition::Quit);
    }

    #[test]
    fn test_up_from_top_wraps_to_quit() {
        let mut ctx = context();
        let mut scene = TitleScene::new();
        press(&mut scene, &mut ctx, KeyCode::Up);
        assert_eq!(press(&mut scene, &mut ctx, KeyCode::Enter), Transition::Quit);
    }

    #[test]
    fn test_text_logo_without_assets() {
        let mut ctx = context();
        ctx.settings.glitch_fx = false;
        let mut scene = TitleScene::new();
        let mut fb = Framebuffer::new(1280, 800);
        scene.draw(&mut fb, &mut ctx);
        // Title text straddles y = 184
        let lit = (0..1280).any(|x| fb.get_pixel(x, 184) == Some(Color::WHITE));
        assert!(lit);
    }

    #[test]
    fn test_png_logo_is_blitted() {
        let mut ctx = context();
        ctx.settings.glitch_fx = false;
        let mut logo = Framebuffer::new(10, 10);
        logo.clear(Color::CYAN);
        ctx.assets.logo = Some(logo);
        let mut scene = TitleScene::new();
        let mut fb = Framebuffer::new(1280, 800);
        scene.draw(&mut fb, &mut ctx);
        assert_eq!(fb.get_pixel(640, 184), Some(Color::CYAN));
    }
}
