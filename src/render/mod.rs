//! Software rendering
//!
//! - `framebuffer` - RGBA buffer, blending, blits, rotozoom
//! - `font` - built-in 5x7 bitmap font
//! - `text` - centered / glitched text helpers
//! - `sprite` - PNG decoding into framebuffers

pub mod font;
pub mod framebuffer;
pub mod sprite;
pub mod text;

pub use font::BitmapFont;
pub use framebuffer::{BlendMode, Color, Framebuffer};
pub use sprite::decode_sprite;
pub use text::{draw_center_text, draw_glitch_text};
