//! Vertical keyboard menu
//!
//! Entries carry a plain action value; the owning scene matches on whatever
//! `handle_event` returns. Navigation wraps at both ends.

use macroquad::prelude::KeyCode;
use rand::Rng;

use crate::audio::Audio;
use crate::config::sfx;
use crate::input::GameEvent;
use crate::render::{BitmapFont, Color, Framebuffer};

const PANEL_COLOR: Color = Color::new(28, 28, 48);
const PANEL_ALPHA: u8 = 220;
const PANEL_RADIUS: i32 = 24;
const HIGHLIGHT_TOP: Color = Color::new(90, 120, 255);
const HIGHLIGHT_BOTTOM: Color = Color::new(180, 80, 255);
const HIGHLIGHT_ALPHA: u8 = 180;
const SOFT_SHADOW: Color = Color::new(40, 40, 60);
const MIN_FONT: u16 = 18;
const MAX_FONT: u16 = 36;

pub struct MenuEntry<A> {
    pub label: String,
    pub action: A,
    pub enabled: bool,
}

impl<A: Copy> MenuEntry<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The entry's action, unless it is disabled
    pub fn activate(&self) -> Option<A> {
        self.enabled.then_some(self.action)
    }

    fn is_resume(&self) -> bool {
        let label = self.label.to_lowercase();
        label == "resume" || label == "continue"
    }
}

/// Where a menu sits on screen and how big its text is
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub font_size: u16,
    pub spacing: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    /// Hit rect per entry: (x, y, w, h)
    pub entry_rects: Vec<(i32, i32, i32, i32)>,
}

impl MenuLayout {
    /// Fit `count` entries into 45% of the screen height, below the logo
    /// unless `y` pins the first entry's center line.
    pub fn compute(screen_w: usize, screen_h: usize, count: usize, y: Option<i32>) -> Self {
        let max_height = screen_h as f64 * 0.45;
        let spacing_for = |size: u16| (size as f64 * 1.6) as i32;

        let font_size = (MIN_FONT..=MAX_FONT)
            .rev()
            .find(|&size| (count as i32 * spacing_for(size)) as f64 <= max_height)
            .unwrap_or(MIN_FONT);
        let spacing = spacing_for(font_size);

        let width = (screen_w as f64 * 0.34) as i32;
        let x = (screen_w as i32 - width) / 2;
        // Logo sits at 23% and is about 200px tall
        let logo_bottom = (screen_h as f64 * 0.23) as i32 + 100;
        let y = y.unwrap_or_else(|| (logo_bottom + 12).max((screen_h as i32 - count as i32 * spacing) / 2));

        let entry_rects = (0..count as i32)
            .map(|i| (x, y + i * spacing - spacing / 2 + 4, width, spacing - 8))
            .collect();

        Self {
            font_size,
            spacing,
            x,
            y,
            width,
            entry_rects,
        }
    }

    /// Center line of entry `i`
    pub fn entry_y(&self, i: usize) -> i32 {
        self.y + i as i32 * self.spacing
    }
}

pub struct VerticalMenu<A> {
    pub entries: Vec<MenuEntry<A>>,
    pub selected: usize,
    /// 0..1 ease-in of the highlight after the selection moves
    pub anim_progress: f32,
}

impl<A: Copy> VerticalMenu<A> {
    pub fn new(entries: Vec<MenuEntry<A>>) -> Self {
        Self {
            entries,
            selected: 0,
            anim_progress: 1.0,
        }
    }

    pub fn selected_action(&self) -> Option<A> {
        self.entries.get(self.selected).map(|e| e.action)
    }

    /// Move the selection by `delta`, wrapping around
    pub fn move_selection(&mut self, delta: i32) {
        let n = self.entries.len() as i32;
        if n == 0 {
            return;
        }
        self.selected = (self.selected as i32 + delta).rem_euclid(n) as usize;
        self.anim_progress = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.anim_progress = (self.anim_progress + dt * 8.0).min(1.0);
    }

    /// Handle navigation and activation keys. Returns the triggered action.
    pub fn handle_event(&mut self, event: &GameEvent, audio: &Audio) -> Option<A> {
        if self.entries.is_empty() {
            return None;
        }
        let GameEvent::KeyDown(key) = event else {
            return None;
        };

        match key {
            KeyCode::W | KeyCode::Up => {
                self.move_selection(-1);
                audio.play_event(sfx::MENU_MOVE);
                None
            }
            KeyCode::S | KeyCode::Down => {
                self.move_selection(1);
                audio.play_event(sfx::MENU_MOVE);
                None
            }
            KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space => self.confirm(self.selected, audio),
            KeyCode::Escape => {
                // Escape resumes when the menu has a resume entry, else acts as confirm
                let target = self
                    .entries
                    .iter()
                    .position(|e| e.is_resume() && e.enabled)
                    .unwrap_or(self.selected);
                self.confirm(target, audio)
            }
            _ => None,
        }
    }

    fn confirm(&self, index: usize, audio: &Audio) -> Option<A> {
        let action = self.entries.get(index)?.activate()?;
        audio.play_event(sfx::MENU_CONFIRM);
        Some(action)
    }

    /// Draw the panel and entries. Returns the layout used.
    pub fn draw<R: Rng>(&self, fb: &mut Framebuffer, y: Option<i32>, glitch_fx: bool, rng: &mut R) -> MenuLayout {
        let layout = MenuLayout::compute(fb.width, fb.height, self.entries.len(), y);
        if self.entries.is_empty() {
            return layout;
        }
        let font = BitmapFont::new(layout.font_size, true);
        let (spacing, count) = (layout.spacing, self.entries.len() as i32);
        let center_x = fb.width as i32 / 2;

        fb.fill_rounded_rect_alpha(
            layout.x - 24,
            layout.y - 24,
            layout.width + 48,
            spacing * count + 24,
            PANEL_RADIUS,
            PANEL_COLOR,
            PANEL_ALPHA,
        );

        for (i, entry) in self.entries.iter().enumerate() {
            let rect_y = layout.entry_y(i);
            let color = if entry.enabled { Color::WHITE } else { Color::GREY };
            let is_selected = i == self.selected;

            if is_selected {
                let band_h = spacing - 8;
                fb.fill_ellipse_alpha(center_x - (layout.width + 8) / 2, rect_y + 3 - spacing / 2, layout.width + 8, spacing, Color::BLACK, 80);
                // Highlight slides in from half width while the selection animates
                let reveal = 0.5 + 0.5 * self.anim_progress;
                let band_w = (layout.width as f32 * reveal) as i32;
                let band_x = center_x - band_w / 2;
                let top = rect_y - spacing / 2 + 8;
                for row in 0..band_h {
                    let t = row as f32 / (band_h - 1).max(1) as f32;
                    let c = HIGHLIGHT_TOP.lerp(HIGHLIGHT_BOTTOM, t);
                    fb.fill_rect_alpha(band_x, top + row, band_w, 1, c, HIGHLIGHT_ALPHA);
                }
            }

            if glitch_fx {
                let ghosts = if is_selected { 3 } else { 2 };
                for _ in 0..ghosts {
                    let (ox, oy) = if is_selected {
                        (rng.gen_range(-3..=3), rng.gen_range(-2..=2))
                    } else {
                        (rng.gen_range(-2..=2), rng.gen_range(-1..=1))
                    };
                    let flicker = if is_selected {
                        let mut f = |c: u8| (c as i32 + rng.gen_range(-40..=40)).clamp(0, 255) as u8;
                        Color::new(f(color.r), f(color.g), f(color.b))
                    } else {
                        color
                    };
                    let shadow = if is_selected { Color::BLACK } else { SOFT_SHADOW };
                    draw_entry_text(fb, &font, &entry.label, center_x + ox, rect_y + oy, flicker, shadow);
                }
            }

            let shadow = if is_selected { Color::BLACK } else { SOFT_SHADOW };
            draw_entry_text(fb, &font, &entry.label, center_x, rect_y, color, shadow);

            if is_selected {
                let underline_y = rect_y + layout.font_size as i32 / 2;
                fb.draw_line_alpha(layout.x + 24, underline_y, layout.x + layout.width - 24, underline_y, Color::WHITE, 80);
            }
        }
        layout
    }
}

/// Label centered on (cx, cy) with a shadow 3px below
fn draw_entry_text(fb: &mut Framebuffer, font: &BitmapFont, text: &str, cx: i32, cy: i32, color: Color, shadow: Color) {
    let (w, h) = font.measure(text);
    let x = cx - w as i32 / 2;
    let y = cy - h as i32 / 2;
    font.draw(fb, text, x, y + 3, shadow);
    font.draw(fb, text, x, y, color);
}
