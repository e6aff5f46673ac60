//! Credit roll
//!
//! The list scrolls up while the screen corrupts in stages. When the last
//! line is gone the screen shatters. From the title menu any key skips ahead
//! and the next key returns to the title; as the ending cutscene the roll
//! can't be skipped and hands over to the victory screen on a short timer.

use crate::config::{music, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::fx::{glitch, ShardPool, SHATTER_COUNT};
use crate::input::{GameEvent, TimerId};
use crate::render::{draw_center_text, BlendMode, Color, Framebuffer};
use crate::scene::{GameContext, Scene, SceneId, Transition};

pub const CREDITS: [&str; 18] = [
    "REALITY COLLAPSING",
    "A Game by James Griepentrog",
    "",
    "Programming: James Griepentrog",
    "",
    "Art: James Griepentrog",
    "",
    "Sound Effects: James Griepentrog",
    "",
    "Level Design: James Griepentrog",
    "",
    "Music Credits:",
    "All music in this game is sourced from Pixabay",
    "and is free to use under the CC0 license.",
    "",
    "Special Thanks: You!",
    "",
    "Thank you for playing!",
];

/// Pixels per second
const SCROLL_SPEED: f32 = 40.0;
const LINE_SPACING: i32 = 48;
/// Extra start depth per line for the ending roll
const ENDING_START_SPACING: f32 = 65.0;
const MENU_START_Y: f32 = 800.0;
const MENU_PROGRESS_DENOM: f32 = 600.0;

/// Progress thresholds for glitch levels 2..=7
const LEVEL_THRESHOLDS: [(f32, u8); 6] = [(0.2, 2), (0.4, 3), (0.6, 4), (0.75, 5), (0.85, 6), (0.92, 7)];

const PROMPT_TEXT: &str = "Press Enter to return to Title Screen";
const PROMPT_BLINK: f32 = 0.5;
const PROMPT_STRIP_HEIGHT: usize = 50;
/// Distance of the prompt strip's top edge from the bottom of the screen
const PROMPT_BOTTOM_OFFSET: i32 = 125;
/// Delay between the final shatter and the victory screen
const ENDING_HANDOFF_DELAY: f32 = 0.1;

pub struct CreditsScene {
    ending: bool,
    scroll_y: f32,
    done: bool,
    glitch_level: u8,
    frame_count: u64,
    prompt_blink_timer: f32,
    prompt_visible: bool,
    shards: ShardPool,
    /// Last composed credits frame, before shards and prompt
    frame: Framebuffer,
    prompt: Framebuffer,
}

impl CreditsScene {
    pub fn new(ending: bool) -> Self {
        Self {
            ending,
            scroll_y: start_scroll(ending, SCREEN_HEIGHT),
            done: false,
            glitch_level: 1,
            frame_count: 0,
            prompt_blink_timer: 0.0,
            prompt_visible: true,
            shards: ShardPool::new(),
            frame: Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            prompt: Framebuffer::transparent(SCREEN_WIDTH, PROMPT_STRIP_HEIGHT),
        }
    }

    /// Back to the start of the roll
    fn reset(&mut self) {
        self.scroll_y = start_scroll(self.ending, self.frame.height);
        self.done = false;
        self.glitch_level = 1;
        self.frame_count = 0;
        self.prompt_blink_timer = 0.0;
        self.prompt_visible = true;
        self.shards.clear();
    }

    fn progress(&self) -> f32 {
        let denom = if self.ending {
            self.frame.height as f32 + CREDITS.len() as f32 * LINE_SPACING as f32
        } else {
            MENU_PROGRESS_DENOM
        };
        (1.0 - self.scroll_y / denom).clamp(0.0, 1.0)
    }

    fn collapse(&mut self, ctx: &mut GameContext) {
        self.done = true;
        self.glitch_level = glitch::MAX_LEVEL;
        self.shards.spawn_from(&self.frame, SHATTER_COUNT, &mut ctx.rng);
        log::debug!("credits collapsed (ending: {})", self.ending);
    }

    fn draw_prompt(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        if self.prompt.width != fb.width {
            self.prompt.resize(fb.width, PROMPT_STRIP_HEIGHT);
        }
        self.prompt.clear_transparent();
        let font = ctx.assets.font(28, true);
        draw_center_text(&mut self.prompt, &font, PROMPT_TEXT, PROMPT_STRIP_HEIGHT as i32 / 2, Color::WHITE);
        if ctx.settings.glitch_fx {
            glitch::apply_prompt(&mut self.prompt, &mut ctx.rng);
        }
        fb.blit(&self.prompt, 0, fb.height as i32 - PROMPT_BOTTOM_OFFSET, BlendMode::Opaque);
    }
}

fn start_scroll(ending: bool, screen_h: usize) -> f32 {
    if ending {
        screen_h as f32 + CREDITS.len() as f32 * ENDING_START_SPACING
    } else {
        MENU_START_Y
    }
}

impl Scene for CreditsScene {
    fn name(&self) -> &'static str {
        if self.ending {
            "ending_credits"
        } else {
            "credits"
        }
    }

    fn on_enter(&mut self, ctx: &mut GameContext) {
        self.reset();
        ctx.audio.stop_music();
        ctx.audio.play_music(music::CREDITS);
    }

    fn handle_event(&mut self, event: &GameEvent, ctx: &mut GameContext) -> Transition {
        // The ending roll only listens for its hand-off timer
        if self.ending {
            return match event {
                GameEvent::Timer(TimerId::EndingCreditsDone) if self.done => Transition::Switch(SceneId::Victory),
                _ => Transition::None,
            };
        }

        if !matches!(event, GameEvent::KeyDown(_)) {
            return Transition::None;
        }
        if self.done {
            Transition::Switch(SceneId::Title)
        } else {
            self.collapse(ctx);
            Transition::None
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) -> Transition {
        self.frame_count += 1;

        if !self.done {
            self.scroll_y -= SCROLL_SPEED * dt;
            let p = self.progress();
            for &(threshold, level) in &LEVEL_THRESHOLDS {
                if p > threshold {
                    self.glitch_level = level;
                }
            }

            if self.scroll_y < -(CREDITS.len() as f32 * LINE_SPACING as f32) {
                self.collapse(ctx);
                if self.ending {
                    ctx.timers.schedule(TimerId::EndingCreditsDone, ENDING_HANDOFF_DELAY);
                }
            }
        } else {
            self.prompt_blink_timer += dt;
            if self.prompt_blink_timer >= PROMPT_BLINK {
                self.prompt_visible = !self.prompt_visible;
                self.prompt_blink_timer = 0.0;
            }
            self.shards.update(self.frame.height as f32);
        }
        Transition::None
    }

    fn draw(&mut self, fb: &mut Framebuffer, ctx: &mut GameContext) {
        if self.frame.width != fb.width || self.frame.height != fb.height {
            self.frame.resize(fb.width, fb.height);
        }
        self.frame.clear(Color::BLACK);

        let font = ctx.assets.font(36, true);
        let mut y = self.scroll_y as i32;
        for line in CREDITS {
            draw_center_text(&mut self.frame, &font, line, y, Color::WHITE);
            y += LINE_SPACING;
        }
        if ctx.settings.glitch_fx {
            glitch::apply_level(&mut self.frame, self.glitch_level, self.frame_count, &mut ctx.rng);
        }
        fb.blit(&self.frame, 0, 0, BlendMode::Opaque);

        if self.done {
            self.shards.render(fb);
            if self.prompt_visible {
                self.draw_prompt(fb, ctx);
            }
        }
    }
}
