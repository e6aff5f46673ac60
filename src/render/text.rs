//! Centered text helpers with drop shadows

use rand::Rng;

use super::font::BitmapFont;
use super::framebuffer::{Color, Framebuffer};

const SHADOW_OFFSET: i32 = 3;

/// Top-left corner that centers `text` horizontally with its vertical center at `y`
fn centered_origin(fb: &Framebuffer, font: &BitmapFont, text: &str, x_offset: i32, y: i32) -> (i32, i32) {
    let (w, h) = font.measure(text);
    (fb.width as i32 / 2 - w as i32 / 2 + x_offset, y - h as i32 / 2)
}

/// Draw text centered on the buffer with a black drop shadow
pub fn draw_center_text(fb: &mut Framebuffer, font: &BitmapFont, text: &str, y: i32, color: Color) {
    let (x, top) = centered_origin(fb, font, text, 0, y);
    font.draw(fb, text, x, top + SHADOW_OFFSET, Color::BLACK);
    font.draw(fb, text, x, top, color);
}

/// Centered text with three jittered, color-shifted ghosts behind it
pub fn draw_glitch_text<R: Rng>(
    fb: &mut Framebuffer,
    font: &BitmapFont,
    text: &str,
    y: i32,
    color: Color,
    glitch_fx: bool,
    rng: &mut R,
) {
    if glitch_fx {
        for _ in 0..3 {
            let offset = rng.gen_range(-3..=3);
            let jitter = |c: u8, rng: &mut R| (c as i32 + rng.gen_range(-40..=40)).clamp(0, 255) as u8;
            let ghost = Color::new(color.r, jitter(color.g, rng), jitter(color.b, rng));
            let (x, top) = centered_origin(fb, font, text, offset, y + offset);
            font.draw(fb, text, x, top + SHADOW_OFFSET, Color::BLACK);
            font.draw(fb, text, x, top, ghost);
        }
    }
    draw_center_text(fb, font, text, y, color);
}
