//! Screen glitch effects
//!
//! Each effect mutates a framebuffer in place. Randomness comes from the
//! caller's RNG so a seeded generator reproduces the exact same frame.
//! Effects that animate take the scene's frame counter.

use rand::Rng;

use crate::render::{BlendMode, Color, Framebuffer};

/// Highest glitch level, reached when the credits collapse
pub const MAX_LEVEL: u8 = 8;

/// Darken every pixel by random noise, scaled by an overlay alpha in [30, 70]
pub fn static_noise<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    let overlay_alpha: u16 = rng.gen_range(30..=70);
    for y in 0..fb.height {
        for x in 0..fb.width {
            let noise: u16 = rng.gen_range(0..=255);
            fb.darken_pixel(x, y, (noise * overlay_alpha / 255) as u8);
        }
    }
}

/// Add a copy of the frame, offset by up to `amount` pixels, onto itself
pub fn rgb_split<R: Rng>(fb: &mut Framebuffer, amount: i32, rng: &mut R) {
    let ox = rng.gen_range(-amount..=amount);
    let oy = rng.gen_range(-amount..=amount);

    let mut shifted = Framebuffer::new(fb.width, fb.height);
    shifted.blit(fb, ox, oy, BlendMode::Opaque);
    fb.blit(&shifted, 0, 0, BlendMode::Add);
}

/// Shift `count` random horizontal bands sideways by up to `max_shift`
pub fn slices<R: Rng>(fb: &mut Framebuffer, count: usize, max_shift: i32, rng: &mut R) {
    if fb.height < 4 {
        return;
    }
    for _ in 0..count {
        let y = rng.gen_range(0..=fb.height - 4);
        let slice_h = rng.gen_range(4..=20);
        let shift = rng.gen_range(-max_shift..=max_shift);
        shift_band(fb, y, slice_h, shift);
    }
}

/// Copy rows [y, y + h) and paste them back `shift` pixels to the side
fn shift_band(fb: &mut Framebuffer, y: usize, h: usize, shift: i32) {
    if let Some(band) = fb.copy_rows(y, h) {
        fb.blit(&band, shift, y as i32, BlendMode::Opaque);
    }
}

/// Darken every 4th row with a translucent black line
pub fn scanlines<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    let w = fb.width as i32;
    for y in (0..fb.height).step_by(4) {
        let alpha = rng.gen_range(40..=90);
        fb.draw_line_alpha(0, y as i32, w - 1, y as i32, Color::BLACK, alpha);
    }
}

/// Jolt the whole frame by up to 3 pixels
pub fn screen_shake<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    let ox = rng.gen_range(-3..=3);
    let oy = rng.gen_range(-3..=3);
    let copy = fb.clone();
    fb.blit(&copy, ox, oy, BlendMode::Opaque);
}

/// Four thin tracking-error bars
pub fn vhs<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    if fb.height == 0 {
        return;
    }
    for _ in 0..4 {
        let y = rng.gen_range(0..fb.height);
        let shift = rng.gen_range(-20..=20);
        shift_band(fb, y, 2, shift);
    }
}

/// Sinusoidal horizontal drift
pub fn meltdown(fb: &mut Framebuffer, frame: u64) {
    let offset = ((frame as f32 * 0.2).sin() * 5.0) as i32;
    fb.scroll(offset, 0);
}

/// Faint 50px grid
pub fn wireframe(fb: &mut Framebuffer) {
    let (w, h) = (fb.width as i32, fb.height as i32);
    let grey = Color::new(80, 80, 80);
    for y in (0..h).step_by(50) {
        fb.draw_line_alpha(0, y, w - 1, y, grey, 100);
    }
    for x in (0..w).step_by(50) {
        fb.draw_line_alpha(x, 0, x, h - 1, grey, 100);
    }
}

/// White flash with random strength
pub fn flash<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    let alpha = rng.gen_range(20..=120);
    fb.fill_rect_alpha(0, 0, fb.width as i32, fb.height as i32, Color::WHITE, alpha);
}

/// Slow wobbling rotation
pub fn vortex(fb: &mut Framebuffer, frame: u64) {
    let angle = (frame as f32 * 0.05).sin() * 3.0;
    let rotated = fb.rotozoom(angle, 1.02);
    fb.blit(&rotated, 0, 0, BlendMode::Opaque);
}

/// Pulsing zoom subtracted from the frame
pub fn blackhole(fb: &mut Framebuffer, frame: u64) {
    let scale = 1.0 + (frame as f32 * 0.1).sin() * 0.05;
    let zoomed = fb.rotozoom(0.0, scale);
    fb.blit(&zoomed, 0, 0, BlendMode::Subtract);
}

/// Five 6px bands smeared sideways
pub fn datamosh<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    if fb.height == 0 {
        return;
    }
    for _ in 0..5 {
        let y = rng.gen_range(0..fb.height);
        let shift = rng.gen_range(-30..=30);
        shift_band(fb, y, 6, shift);
    }
}

/// Stack effects cumulatively for a glitch level in 1..=8
pub fn apply_level<R: Rng>(fb: &mut Framebuffer, level: u8, frame: u64, rng: &mut R) {
    if level >= 1 {
        scanlines(fb, rng);
        if rng.gen_bool(0.5) {
            static_noise(fb, rng);
        }
    }
    if level >= 2 {
        slices(fb, 4, 30, rng);
        rgb_split(fb, 4, rng);
    }
    if level >= 3 {
        screen_shake(fb, rng);
    }
    if level >= 4 {
        vhs(fb, rng);
    }
    if level >= 5 {
        meltdown(fb, frame);
        wireframe(fb);
    }
    if level >= 6 {
        vortex(fb, frame);
        datamosh(fb, rng);
    }
    if level >= 7 {
        blackhole(fb, frame);
        if rng.gen_bool(0.5) {
            flash(fb, rng);
        }
    }
    if level >= MAX_LEVEL {
        vortex(fb, frame);
        blackhole(fb, frame);
        slices(fb, 8, 35, rng);
        rgb_split(fb, 12, rng);
        flash(fb, rng);
    }
}

/// Lighter stack used on prompt strips
pub fn apply_prompt<R: Rng>(fb: &mut Framebuffer, rng: &mut R) {
    scanlines(fb, rng);
    if rng.gen_bool(0.5) {
        static_noise(fb, rng);
    }
    slices(fb, 2, 12, rng);
    rgb_split(fb, 3, rng);
    screen_shake(fb, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn gradient(w: usize, h: usize) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                fb.set_pixel(x, y, Color::new((x * 7 % 256) as u8, (y * 11 % 256) as u8, 128));
            }
        }
        fb
    }

    #[test]
    fn test_scanlines_only_touch_every_fourth_row() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear(Color::WHITE);
        scanlines(&mut fb, &mut SmallRng::seed_from_u64(1));
        assert!(fb.get_pixel(3, 0).unwrap().r < 255);
        assert!(fb.get_pixel(3, 4).unwrap().r < 255);
        assert_eq!(fb.get_pixel(3, 1), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(3, 7), Some(Color::WHITE));
    }

    #[test]
    fn test_static_never_brightens() {
        let before = gradient(16, 16);
        let mut fb = before.clone();
        static_noise(&mut fb, &mut SmallRng::seed_from_u64(2));
        for (a, b) in fb.pixels.iter().zip(before.pixels.iter()) {
            assert!(a <= b);
        }
    }

    #[test]
    fn test_rgb_split_never_darkens() {
        let before = gradient(16, 16);
        let mut fb = before.clone();
        rgb_split(&mut fb, 4, &mut SmallRng::seed_from_u64(3));
        for (a, b) in fb.pixels.iter().zip(before.pixels.iter()) {
            assert!(a >= b);
        }
    }

    #[test]
    fn test_slices_on_tiny_buffers() {
        let mut fb = Framebuffer::new(10, 3);
        slices(&mut fb, 4, 30, &mut SmallRng::seed_from_u64(4));
        let mut fb = Framebuffer::new(10, 4);
        slices(&mut fb, 4, 30, &mut SmallRng::seed_from_u64(4));
        let mut fb = Framebuffer::new(10, 1);
        vhs(&mut fb, &mut SmallRng::seed_from_u64(4));
        datamosh(&mut fb, &mut SmallRng::seed_from_u64(4));
    }

    #[test]
    fn test_wireframe_grid_positions() {
        let mut fb = Framebuffer::new(120, 120);
        wireframe(&mut fb);
        assert_ne!(fb.get_pixel(10, 50), Some(Color::BLACK));
        assert_ne!(fb.get_pixel(100, 10), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(10, 10), Some(Color::BLACK));
    }

    #[test]
    fn test_meltdown_frame_zero_is_noop() {
        let before = gradient(20, 5);
        let mut fb = before.clone();
        meltdown(&mut fb, 0);
        assert_eq!(fb, before);
    }

    #[test]
    fn test_blackhole_at_rest_clears_frame() {
        // sin(0) = 0 so the zoom is 1:1 and the frame subtracts itself
        let mut fb = gradient(12, 12);
        blackhole(&mut fb, 0);
        assert!(fb.pixels.chunks(4).all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn test_apply_level_is_deterministic_for_seed() {
        let mut a = gradient(64, 48);
        let mut b = a.clone();
        apply_level(&mut a, MAX_LEVEL, 17, &mut SmallRng::seed_from_u64(99));
        apply_level(&mut b, MAX_LEVEL, 17, &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
        assert_eq!(a.pixels.len(), 64 * 48 * 4);
    }

    /// Effects a level adds on top of the level below it
    fn level_extras(fb: &mut Framebuffer, level: u8, frame: u64, rng: &mut SmallRng) {
        match level {
            1 => {
                scanlines(fb, rng);
                if rng.gen_bool(0.5) {
                    static_noise(fb, rng);
                }
            }
            2 => {
                slices(fb, 4, 30, rng);
                rgb_split(fb, 4, rng);
            }
            3 => screen_shake(fb, rng),
            4 => vhs(fb, rng),
            5 => {
                meltdown(fb, frame);
                wireframe(fb);
            }
            6 => {
                vortex(fb, frame);
                datamosh(fb, rng);
            }
            7 => {
                blackhole(fb, frame);
                if rng.gen_bool(0.5) {
                    flash(fb, rng);
                }
            }
            _ => {
                vortex(fb, frame);
                blackhole(fb, frame);
                slices(fb, 8, 35, rng);
                rgb_split(fb, 12, rng);
                flash(fb, rng);
            }
        }
    }

    #[test]
    fn test_levels_stack_cumulatively() {
        for level in 1..=MAX_LEVEL {
            for seed in [1, 2, 3] {
                let mut expected = gradient(64, 48);
                let mut rng = SmallRng::seed_from_u64(seed);
                for l in 1..=level {
                    level_extras(&mut expected, l, 9, &mut rng);
                }
                let mut actual = gradient(64, 48);
                apply_level(&mut actual, level, 9, &mut SmallRng::seed_from_u64(seed));
                assert_eq!(actual, expected, "level {} seed {}", level, seed);
            }
        }
    }

    #[test]
    fn test_level_one_only_darkens_in_place() {
        let before = gradient(64, 48);
        for seed in 0..8 {
            let mut fb = before.clone();
            apply_level(&mut fb, 1, 0, &mut SmallRng::seed_from_u64(seed));
            for (a, b) in fb.pixels.iter().zip(before.pixels.iter()) {
                assert!(a <= b);
            }
            // Scanline rows always darken
            assert!(fb.get_pixel(10, 4).unwrap().b < 128);
        }
    }

    #[test]
    fn test_wireframe_appears_at_level_five() {
        // Nothing below level 5 can brighten a black frame
        for level in 1..=4 {
            let mut fb = Framebuffer::new(120, 120);
            apply_level(&mut fb, level, 0, &mut SmallRng::seed_from_u64(11));
            assert!(fb.pixels.chunks(4).all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0), "level {}", level);
        }

        let mut fb = Framebuffer::new(120, 120);
        apply_level(&mut fb, 5, 0, &mut SmallRng::seed_from_u64(11));
        assert_ne!(fb.get_pixel(10, 50), Some(Color::BLACK));
        assert_ne!(fb.get_pixel(100, 10), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(10, 10), Some(Color::BLACK));
    }

    fn changed_rows(a: &Framebuffer, b: &Framebuffer) -> Vec<usize> {
        let row = a.width * 4;
        (0..a.height)
            .filter(|&y| a.pixels[y * row..(y + 1) * row] != b.pixels[y * row..(y + 1) * row])
            .collect()
    }

    /// Every pixel of a band effect's output row came from the same row
    fn assert_rows_keep_their_pixels(fb: &Framebuffer, before: &Framebuffer) {
        for y in 0..fb.height {
            let row: Vec<Color> = (0..before.width).filter_map(|x| before.get_pixel(x, y)).collect();
            for x in 0..fb.width {
                assert!(row.contains(&fb.get_pixel(x, y).unwrap()), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_vhs_shifts_at_most_four_thin_bars() {
        let before = gradient(64, 48);
        for seed in 0..8 {
            let mut fb = before.clone();
            vhs(&mut fb, &mut SmallRng::seed_from_u64(seed));
            let rows = changed_rows(&fb, &before);
            assert!(!rows.is_empty() && rows.len() <= 8, "{:?}", rows);
            assert_rows_keep_their_pixels(&fb, &before);
        }
    }

    #[test]
    fn test_datamosh_smears_at_most_five_bands() {
        let before = gradient(64, 48);
        for seed in 0..8 {
            let mut fb = before.clone();
            datamosh(&mut fb, &mut SmallRng::seed_from_u64(seed));
            let rows = changed_rows(&fb, &before);
            assert!(!rows.is_empty() && rows.len() <= 30, "{:?}", rows);
            assert_rows_keep_their_pixels(&fb, &before);
        }
    }

    #[test]
    fn test_screen_shake_moves_whole_frame() {
        let mut before = Framebuffer::new(48, 40);
        for y in 0..40 {
            for x in 0..48 {
                before.set_pixel(x, y, Color::new((x * 5) as u8, (y * 6) as u8, 0));
            }
        }
        for seed in 0..8 {
            let mut fb = before.clone();
            screen_shake(&mut fb, &mut SmallRng::seed_from_u64(seed));
            // A single offset within 3px explains the whole interior
            let found = (-3..=3).flat_map(|ox| (-3..=3).map(move |oy| (ox, oy))).any(|(ox, oy)| {
                (3..45).all(|x| {
                    (3..37).all(|y| {
                        fb.get_pixel(x, y) == before.get_pixel((x as i32 - ox) as usize, (y as i32 - oy) as usize)
                    })
                })
            });
            assert!(found, "seed {}", seed);
        }
    }

    #[test]
    fn test_vortex_zooms_about_center() {
        let before = gradient(64, 48);
        let mut fb = before.clone();
        // Frame 0 has no rotation, only the 1.02 zoom
        vortex(&mut fb, 0);
        assert_eq!(fb.get_pixel(32, 24), before.get_pixel(32, 24));
        assert_eq!(fb.get_pixel(0, 0), before.get_pixel(1, 0));
        assert!(fb.pixels.chunks(4).all(|p| p[3] == 255));

        let mut turned = before.clone();
        vortex(&mut turned, 30);
        assert_ne!(turned, fb);
    }

    #[test]
    fn test_prompt_stack_keeps_transparency_outside_text() {
        let mut strip = Framebuffer::transparent(40, 10);
        apply_prompt(&mut strip, &mut SmallRng::seed_from_u64(5));
        // Scanline rows pick up alpha, some rows between always stay see-through
        assert!(strip.pixels.chunks(4).any(|p| p[3] == 0));
        assert!(strip.pixels.chunks(4).any(|p| p[3] > 0));
    }
}
