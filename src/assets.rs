//! Asset lookup
//!
//! Resolves the assets folder for both development runs (`./assets`) and the
//! packaged layout where `assets/` sits next to the executable.

use std::path::{Path, PathBuf};

use crate::render::{decode_sprite, BitmapFont, Framebuffer};

/// Tallest the title logo is allowed to be, in pixels
const LOGO_MAX_HEIGHT: u32 = 200;

pub struct Assets {
    /// Title logo, if `branding/logo.png` exists and decodes
    pub logo: Option<Framebuffer>,
}

impl Assets {
    /// No files; text fallbacks are used everywhere
    pub fn empty() -> Self {
        Self { logo: None }
    }

    /// Find the assets folder in various locations (development, packaged)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn find_root() -> PathBuf {
        let candidates = [
            // Development: relative to cwd
            Some(PathBuf::from("assets")),
            // Packaged: next to executable
            std::env::current_exe().ok().and_then(|p| p.parent().map(|d| d.join("assets"))),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_dir() {
                return path;
            }
        }
        log::warn!("no assets directory found; running without music, sounds or logo");
        if let Ok(cwd) = std::env::current_dir() {
            log::warn!("current working directory: {:?}", cwd);
        }
        PathBuf::from("assets")
    }

    /// WASM: the page serves assets relative to index.html
    #[cfg(target_arch = "wasm32")]
    pub fn find_root() -> PathBuf {
        PathBuf::from("assets")
    }

    pub async fn load(root: &Path) -> Self {
        let logo_path = root.join("branding").join("logo.png");
        let logo = match macroquad::prelude::load_file(&logo_path.to_string_lossy()).await {
            Ok(bytes) => match decode_sprite(&bytes, Some(LOGO_MAX_HEIGHT)) {
                Ok(sprite) => {
                    log::info!("loaded logo {}x{}", sprite.width, sprite.height);
                    Some(sprite)
                }
                Err(e) => {
                    log::warn!("failed to decode {:?}: {}", logo_path, e);
                    None
                }
            },
            Err(e) => {
                log::info!("no logo at {:?} ({}), using text logo", logo_path, e);
                None
            }
        };
        Self { logo }
    }

    pub fn font(&self, size: u16, bold: bool) -> BitmapFont {
        BitmapFont::new(size, bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_logo() {
        assert!(Assets::empty().logo.is_none());
    }

    #[test]
    fn test_font_scales_with_size() {
        let assets = Assets::empty();
        assert_eq!(assets.font(36, true).scale(), 3);
        assert_eq!(assets.font(12, false).scale(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_find_root_ends_in_assets() {
        assert!(Assets::find_root().ends_with("assets"));
    }
}
