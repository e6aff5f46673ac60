//! Photosensitivity warning shown at boot

use crate::input::GameEvent;
use crate::render::{draw_center_text, BitmapFont, Color, Framebuffer};
use crate::scene::{GameContext, Scene, SceneId, Transition};

/// Seconds before the notice can be dismissed
pub const WARNING_DURATION: f32 = 3.5;

const WARNING_TEXT: &str = "SEIZURE WARNING";
const INFO_TEXT: &str = "This game contains flashing lights and patterns that may trigger seizures.";
const CONTINUE_TEXT: &str = "Press any key to continue...";

pub struct SeizureWarningScene {
    elapsed: f32,
}

impl SeizureWarningScene {
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    fn can_continue(&self) -> bool {
        self.elapsed > WARNING_DURATION
    }
}

impl Scene for SeizureWarningScene {
    fn name(&self) -> &'static str {
        "seizure_warning"
    }

    fn handle_event(&mut self, event: &GameEvent, _ctx: &mut GameContext) -> Transition {
        if self.can_continue() && event.is_press() {
            Transition::Switch(SceneId::Title)
        } else {
            Transition::None
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut GameContext) -> Transition {
        self.elapsed += dt;
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, _ctx: &mut GameContext) {
        fb.clear(Color::BLACK);
        let mid = fb.height as i32 / 2;
        let big = BitmapFont::new(48, true);
        let small = BitmapFont::new(28, false);

        // Rows are anchored by their top edge
        let top = |font: &BitmapFont, y: i32| y + font.line_height() as i32 / 2;
        draw_center_text(fb, &big, WARNING_TEXT, top(&big, mid - 100), Color::RED);
        draw_center_text(fb, &small, INFO_TEXT, top(&small, mid), Color::WHITE);
        if self.can_continue() {
            draw_center_text(fb, &small, CONTINUE_TEXT, top(&small, mid + 80), Color::WHITE);
        }
    }
}
