//! RGBA software framebuffer
//!
//! Every scene composes its frame here on the CPU, then the main loop uploads
//! the pixels to a texture once per frame. Glitch effects operate directly on
//! these buffers, so everything that touches pixels lives in this file.

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const CYAN: Color = Color { r: 0, g: 255, b: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255 };
    pub const GREY: Color = Color { r: 128, g: 128, b: 128 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        Self {
            r: (self.r as f32 * inv_t + other.r as f32 * t) as u8,
            g: (self.g as f32 * inv_t + other.g as f32 * t) as u8,
            b: (self.b as f32 * inv_t + other.b as f32 * t) as u8,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// How a blitted pixel combines with the pixel underneath
/// B = back pixel (destination), F = front pixel (source)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Opaque,   // F over B using F's alpha
    Add,      // B + F * alpha, clamped to 255
    Subtract, // B - F * alpha, clamped to 0
}

/// Framebuffer for software rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    /// Opaque black buffer
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self::transparent(width, height);
        fb.clear(Color::BLACK);
        fb
    }

    /// Fully transparent buffer (alpha 0 everywhere), used for overlays
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Clear framebuffer with transparent black (for alpha compositing)
    pub fn clear_transparent(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Read a pixel's color, ignoring alpha
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[self.index(x, y) + 3]
        } else {
            0
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Alpha blend: result = front * alpha + back * (1 - alpha)
    ///
    /// Coverage accumulates, so drawing onto a transparent overlay leaves the
    /// pixel with the drawn alpha rather than fully opaque.
    pub fn set_pixel_alpha(&mut self, x: usize, y: usize, color: Color, alpha: u8) {
        if x >= self.width || y >= self.height || alpha == 0 {
            return;
        }
        let idx = self.index(x, y);
        let a = alpha as u16;
        let inv_a = 255 - a;
        let back_a = self.pixels[idx + 3] as u16;

        self.pixels[idx] = ((color.r as u16 * a + self.pixels[idx] as u16 * inv_a) / 255) as u8;
        self.pixels[idx + 1] = ((color.g as u16 * a + self.pixels[idx + 1] as u16 * inv_a) / 255) as u8;
        self.pixels[idx + 2] = ((color.b as u16 * a + self.pixels[idx + 2] as u16 * inv_a) / 255) as u8;
        self.pixels[idx + 3] = (a + back_a * inv_a / 255).min(255) as u8;
    }

    /// Subtract `amount` from the RGB channels of one pixel (clamped to 0)
    pub fn darken_pixel(&mut self, x: usize, y: usize, amount: u8) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            for c in &mut self.pixels[idx..idx + 3] {
                *c = c.saturating_sub(amount);
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let (x0, y0, x1, y1) = self.clip_rect(x, y, w, h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }

    pub fn fill_rect_alpha(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, alpha: u8) {
        let (x0, y0, x1, y1) = self.clip_rect(x, y, w, h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel_alpha(px, py, color, alpha);
            }
        }
    }

    /// Clamp a rect to the buffer, returning (x0, y0, x1, y1) with exclusive max
    fn clip_rect(&self, x: i32, y: i32, w: i32, h: i32) -> (usize, usize, usize, usize) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        (x0.min(x1), y0.min(y1), x1, y1)
    }

    /// Rounded rectangle, blended with alpha
    pub fn fill_rounded_rect_alpha(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Color, alpha: u8) {
        let r = radius.min(w / 2).min(h / 2).max(0);
        for py in y.max(0)..(y + h).min(self.height as i32) {
            for px in x.max(0)..(x + w).min(self.width as i32) {
                // Distance from the nearest corner circle center, only inside corner boxes
                let cx = if px < x + r { x + r } else if px >= x + w - r { x + w - r - 1 } else { px };
                let cy = if py < y + r { y + r } else if py >= y + h - r { y + h - r - 1 } else { py };
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel_alpha(px as usize, py as usize, color, alpha);
                }
            }
        }
    }

    /// Filled ellipse inscribed in the given rect, blended with alpha
    pub fn fill_ellipse_alpha(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, alpha: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        let rx = w as f32 / 2.0;
        let ry = h as f32 / 2.0;
        let cx = x as f32 + rx;
        let cy = y as f32 + ry;
        for py in y.max(0)..(y + h).min(self.height as i32) {
            for px in x.max(0)..(x + w).min(self.width as i32) {
                let nx = (px as f32 + 0.5 - cx) / rx;
                let ny = (py as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.set_pixel_alpha(px as usize, py as usize, color, alpha);
                }
            }
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.draw_line_alpha(x0, y0, x1, y1, color, 255);
    }

    pub fn draw_line_alpha(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, alpha: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if self.in_bounds(x, y) {
                if alpha == 255 {
                    self.set_pixel(x as usize, y as usize, color);
                } else {
                    self.set_pixel_alpha(x as usize, y as usize, color, alpha);
                }
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Composite `src` onto this buffer with its top-left corner at (x, y).
    ///
    /// Source pixels with alpha 0 are skipped. In `Opaque` mode partially
    /// transparent pixels are alpha blended; `Add`/`Subtract` scale the source
    /// color by its alpha before combining.
    pub fn blit(&mut self, src: &Framebuffer, x: i32, y: i32, mode: BlendMode) {
        for sy in 0..src.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let s = src.index(sx, sy);
                let a = src.pixels[s + 3];
                if a == 0 {
                    continue;
                }
                let front = Color::new(src.pixels[s], src.pixels[s + 1], src.pixels[s + 2]);
                let (dxu, dyu) = (dx as usize, dy as usize);
                match mode {
                    BlendMode::Opaque if a == 255 => self.set_pixel(dxu, dyu, front),
                    BlendMode::Opaque => self.set_pixel_alpha(dxu, dyu, front, a),
                    BlendMode::Add | BlendMode::Subtract => {
                        let d = self.index(dxu, dyu);
                        let src_rgb = [front.r, front.g, front.b];
                        for c in 0..3 {
                            let f = (src_rgb[c] as u16 * a as u16 / 255) as u8;
                            let b = self.pixels[d + c];
                            self.pixels[d + c] = if mode == BlendMode::Add {
                                b.saturating_add(f)
                            } else {
                                b.saturating_sub(f)
                            };
                        }
                    }
                }
            }
        }
    }

    /// Copy a horizontal band of rows into a new buffer.
    ///
    /// The band is clamped to the buffer; returns None when nothing remains.
    pub fn copy_rows(&self, y: usize, h: usize) -> Option<Framebuffer> {
        if y >= self.height {
            return None;
        }
        let h = h.min(self.height - y);
        if h == 0 {
            return None;
        }
        let start = self.index(0, y);
        let end = self.index(0, y + h);
        Some(Framebuffer {
            pixels: self.pixels[start..end].to_vec(),
            width: self.width,
            height: h,
        })
    }

    /// Move the contents by (dx, dy). Uncovered pixels keep their old value.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let copy = self.clone();
        self.blit(&copy, dx, dy, BlendMode::Opaque);
    }

    /// Rotate (degrees, counter-clockwise) and scale about the center.
    ///
    /// The result has the same size as the source; output pixels whose
    /// pre-image falls outside the source are left transparent.
    pub fn rotozoom(&self, angle_deg: f32, scale: f32) -> Framebuffer {
        let mut out = Framebuffer::transparent(self.width, self.height);
        if scale <= 0.0 {
            return out;
        }
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let inv_scale = 1.0 / scale;

        for oy in 0..self.height {
            let ry = oy as f32 + 0.5 - cy;
            for ox in 0..self.width {
                let rx = ox as f32 + 0.5 - cx;
                // Inverse rotation; screen y points down so CCW flips the sign of sin
                let sx = (rx * cos - ry * sin) * inv_scale + cx;
                let sy = (rx * sin + ry * cos) * inv_scale + cy;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                let (sxu, syu) = (sx as usize, sy as usize);
                if sxu >= self.width || syu >= self.height {
                    continue;
                }
                let s = self.index(sxu, syu);
                let d = out.index(ox, oy);
                out.pixels[d..d + 4].copy_from_slice(&self.pixels[s..s + 4]);
            }
        }
        out
    }
}
