//! Built-in bitmap font
//!
//! 5x7 glyphs scaled up in whole pixels. Lower-case letters render with the
//! upper-case glyphs; anything outside the table renders as `?`.

use super::framebuffer::{Color, Framebuffer};

const GLYPH_W: usize = 5;
const GLYPH_H: usize = 7;
/// Horizontal advance in font dots (glyph plus one dot of spacing)
const ADVANCE: usize = 6;

/// A font at a given point size. Cheap to construct and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    pub size: u16,
    pub bold: bool,
    scale: usize,
}

impl BitmapFont {
    pub fn new(size: u16, bold: bool) -> Self {
        Self {
            size,
            bold,
            scale: ((size as usize + 6) / 12).max(1),
        }
    }

    /// Pixel size of one font dot
    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn line_height(&self) -> usize {
        GLYPH_H * self.scale
    }

    /// Width and height in pixels of `text` rendered on one line
    pub fn measure(&self, text: &str) -> (usize, usize) {
        let n = text.chars().count();
        if n == 0 {
            return (0, self.line_height());
        }
        // No trailing spacing after the last glyph
        let mut w = (n * ADVANCE - (ADVANCE - GLYPH_W)) * self.scale;
        if self.bold {
            w += 1;
        }
        (w, self.line_height())
    }

    /// Draw `text` with its top-left corner at (x, y)
    pub fn draw(&self, fb: &mut Framebuffer, text: &str, x: i32, y: i32, color: Color) {
        let s = self.scale as i32;
        for (i, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            let gx = x + (i * ADVANCE) as i32 * s;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let px = gx + col as i32 * s;
                    let py = y + row as i32 * s;
                    let w = if self.bold { s + 1 } else { s };
                    fb.fill_rect(px, py, w, s, color);
                }
            }
        }
    }
}

/// Glyph rows, top to bottom; bit 4 is the leftmost column
fn glyph(ch: char) -> [u8; GLYPH_H] {
    match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        ';' => [0, 0b01100, 0b01100, 0, 0b01100, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        '"' => [0b01010, 0b01010, 0, 0, 0, 0, 0],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        '=' => [0, 0, 0b11111, 0, 0b11111, 0, 0],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '*' => [0, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        _ => glyph('?'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_from_size() {
        assert_eq!(BitmapFont::new(18, false).scale(), 2);
        assert_eq!(BitmapFont::new(28, false).scale(), 2);
        assert_eq!(BitmapFont::new(36, true).scale(), 3);
        assert_eq!(BitmapFont::new(48, true).scale(), 4);
        assert_eq!(BitmapFont::new(4, false).scale(), 1);
    }

    #[test]
    fn test_measure() {
        let font = BitmapFont::new(36, false);
        assert_eq!(font.measure(""), (0, 21));
        assert_eq!(font.measure("A"), (15, 21));
        assert_eq!(font.measure("AB"), (33, 21));
        assert_eq!(BitmapFont::new(36, true).measure("AB").0, 34);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(glyph('q'), glyph('Q'));
        assert_eq!(glyph('~'), glyph('?'));
    }

    #[test]
    fn test_draw_marks_only_glyph_pixels() {
        let font = BitmapFont::new(12, false);
        let (w, h) = font.measure("I");
        let mut fb = Framebuffer::transparent(w, h);
        font.draw(&mut fb, "I", 0, 0, Color::WHITE);
        // Top row of 'I' is 01110: first column empty, second set
        assert_eq!(fb.alpha_at(0, 0), 0);
        assert_eq!(fb.get_pixel(1, 0), Some(Color::WHITE));
        assert_eq!(fb.alpha_at(1, 0), 255);
    }
}
