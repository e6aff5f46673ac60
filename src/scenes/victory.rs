//! Victory screen shown after the ending roll

use macroquad::prelude::KeyCode;

use crate::config::music;
use crate::input::GameEvent;
use crate::render::{draw_center_text, draw_glitch_text, Color, Framebuffer};
use crate::scene::{GameContext, Scene, SceneId, Transition};

const PROMPT_BLINK: f32 = 0.5;

pub struct VictoryScene {
    blink_timer: f32,
    prompt_visible: bool,
}

impl VictoryScene {
    pub fn new() -> Self {
        Self {
            blink_timer: 0.0,
            prompt_visible: true,
        }
    }
}

impl Scene for VictoryScene {
    fn name(&self) -> &'static str {
        "victory"
    }

    fn on_enter(&mut self, ctx: &mut GameContext) {
        ctx.audio.play_music(music::VICTORY);
    }

    fn handle_event(&mut self, event: &GameEvent, _ctx: &mut GameContext) -> Transition {
        match event {
            GameEvent::KeyDown(KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space | KeyCode::Escape) => {
                Transition::Switch(SceneId::Title)
            }
            _ => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut GameContext) -> Transition {
        self.blink_timer += dt;
        if self.blink_timer >= PROMPT_BLINK {
            self.prompt_visible = !self.prompt_visible;
            self.blink_timer = 0.0;
        }
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        fb.clear(Color::BLACK);
        let h = fb.height as i32;
        let big = ctx.assets.font(72, true);
        let small = ctx.assets.font(28, false);

        draw_glitch_text(fb, &big, "VICTORY", h / 2 - 120, Color::CYAN, ctx.settings.glitch_fx, &mut ctx.rng);
        draw_center_text(fb, &small, "Reality has been restored.", h / 2, Color::WHITE);
        if self.prompt_visible {
            let prompt = ctx.assets.font(28, true);
            draw_center_text(fb, &prompt, "Press Enter to return to Title Screen", h - 100, Color::GREY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_support::context;

    #[test]
    fn test_confirm_keys_return_to_title() {
        let mut ctx = context();
        let mut scene = VictoryScene::new();
        for key in [KeyCode::Enter, KeyCode::Space, KeyCode::Escape] {
            assert_eq!(
                scene.handle_event(&GameEvent::KeyDown(key), &mut ctx),
                Transition::Switch(SceneId::Title)
            );
        }
        assert_eq!(scene.handle_event(&GameEvent::KeyDown(KeyCode::Q), &mut ctx), Transition::None);
        assert_eq!(scene.handle_event(&GameEvent::MouseDown, &mut ctx), Transition::None);
    }

    #[test]
    fn test_plays_victory_music() {
        let mut ctx = context();
        VictoryScene::new().on_enter(&mut ctx);
        assert_eq!(ctx.audio.current_music(), Some(music::VICTORY));
    }

    #[test]
    fn test_prompt_blinks() {
        let mut ctx = context();
        let mut scene = VictoryScene::new();
        scene.update(0.5, &mut ctx);
        assert!(!scene.prompt_visible);
        scene.update(0.5, &mut ctx);
        assert!(scene.prompt_visible);
    }
}
