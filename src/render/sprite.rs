//! PNG decoding into framebuffers

use image::imageops::FilterType;

use super::framebuffer::Framebuffer;

/// Decode a PNG (or any format the `image` features allow) into an RGBA buffer.
///
/// When `max_height` is given and the image is taller, it is scaled down
/// preserving aspect ratio.
pub fn decode_sprite(bytes: &[u8], max_height: Option<u32>) -> Result<Framebuffer, image::ImageError> {
    let mut img = image::load_from_memory(bytes)?.to_rgba8();

    if let Some(max_h) = max_height {
        if img.height() > max_h && max_h > 0 {
            let w = (img.width() as u64 * max_h as u64 / img.height() as u64).max(1) as u32;
            img = image::imageops::resize(&img, w, max_h, FilterType::Nearest);
        }
    }

    Ok(Framebuffer {
        width: img.width() as usize,
        height: img.height() as usize,
        pixels: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_keeps_size() {
        let fb = decode_sprite(&png_bytes(4, 2), None).unwrap();
        assert_eq!((fb.width, fb.height), (4, 2));
        assert_eq!(&fb.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_scales_down_tall_images() {
        let fb = decode_sprite(&png_bytes(40, 20), Some(10)).unwrap();
        assert_eq!((fb.width, fb.height), (20, 10));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_sprite(b"not a png", None).is_err());
    }
}
