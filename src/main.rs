//! REALITY COLLAPSING
//!
//! Front end of a glitch-themed platformer: boot warning, title menu,
//! settings, and the credit roll that doubles as the ending cutscene.
//! Everything is drawn into a 1280x800 software framebuffer and presented
//! letterboxed in the window.

// No console window for release builds on Windows
#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod assets;
mod audio;
mod config;
mod debug;
mod fx;
mod input;
mod render;
mod scene;
mod scenes;
mod settings;
mod storage;
mod ui;

use macroquad::prelude::*;
use ::rand::rngs::SmallRng;
use ::rand::SeedableRng;

use app::Game;
use assets::Assets;
use audio::Audio;
use config::{SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use debug::DebugOverlay;
use input::{GameEvent, InputSystem, TimerQueue};
use scene::GameContext;
use settings::Settings;
use storage::LocalStorage;

const LETTERBOX: Color = Color::new(0.0, 0.0, 0.0, 1.0);

fn window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_string(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        #[cfg(not(target_arch = "wasm32"))]
        fullscreen: false,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

/// Settings location, or `None` to keep settings in memory for the session
fn settings_storage() -> Option<LocalStorage> {
    match LocalStorage::user_config() {
        Ok(storage) => Some(storage),
        Err(e) => {
            log::warn!("settings will not be saved: {}", e);
            None
        }
    }
}

fn load_settings(storage: Option<&LocalStorage>) -> Settings {
    let Some(storage) = storage else {
        return Settings::default();
    };
    match Settings::load(storage) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("could not load settings ({}), using defaults", e);
            Settings::default()
        }
    }
}

/// Largest rect with the framebuffer's aspect ratio that fits the window
fn letterbox_rect(fb_w: f32, fb_h: f32, win_w: f32, win_h: f32) -> Rect {
    let fb_aspect = fb_w / fb_h;
    if fb_aspect > win_w / win_h {
        let h = win_w / fb_aspect;
        Rect::new(0.0, (win_h - h) * 0.5, win_w, h)
    } else {
        let w = win_h * fb_aspect;
        Rect::new((win_w - w) * 0.5, 0.0, w, win_h)
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_logging();
    log::info!("{} v{}", WINDOW_TITLE, VERSION);

    // Window close becomes a Quit event so settings get saved on the way out
    prevent_quit();

    let storage = settings_storage();
    let settings = load_settings(storage.as_ref());

    let assets_root = Assets::find_root();
    let assets = Assets::load(&assets_root).await;
    let mut audio = Audio::load(&assets_root).await;
    audio.set_volumes(settings.music_volume, settings.sfx_volume);

    let mut applied_fullscreen = settings.fullscreen;
    if applied_fullscreen {
        set_fullscreen(true);
    }

    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let ctx = GameContext {
        settings,
        audio,
        assets,
        timers: TimerQueue::new(),
        rng: SmallRng::seed_from_u64(seed),
        input: Default::default(),
        storage,
    };

    let mut game = Game::new(ctx);
    let mut input = InputSystem::new();
    let mut overlay = DebugOverlay::new();

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        for event in input.poll() {
            if event == GameEvent::KeyDown(KeyCode::F3) {
                overlay.toggle();
                continue;
            }
            game.push_event(event);
        }
        if is_quit_requested() {
            game.push_event(GameEvent::Quit);
        }
        game.ctx.input = input.state;

        if !game.step(get_frame_time()) {
            break;
        }

        if game.ctx.settings.fullscreen != applied_fullscreen {
            applied_fullscreen = game.ctx.settings.fullscreen;
            set_fullscreen(applied_fullscreen);
        }

        let fb = game.render();
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        let dest = letterbox_rect(fb.width as f32, fb.height as f32, screen_width(), screen_height());

        clear_background(LETTERBOX);
        draw_texture_ex(
            &texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        );
        overlay.draw(game.scene_name(), &game.ctx.input, input.has_gamepad());

        // FPS limiting
        if let Some(target_frame_time) = game.ctx.settings.fps_limit.frame_time() {
            #[cfg(not(target_arch = "wasm32"))]
            {
                // Sleep for the bulk, then spin-wait for precision
                let spin_margin = 0.002;
                while get_time() - frame_start + spin_margin < target_frame_time {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while get_time() - frame_start < target_frame_time {
                    std::hint::spin_loop();
                }
            }
            // WASM: the browser paces frames
            #[cfg(target_arch = "wasm32")]
            let _ = (target_frame_time, frame_start);
        }

        next_frame().await;
    }

    log::info!("bye");
}
