//! Compile-time configuration constants.

/// Window / logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 1280;

/// Window / logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 800;

/// Window title.
pub const WINDOW_TITLE: &str = "Reality Collapsing";

/// Directory name under the user's config dir.
pub const APP_DIR_NAME: &str = "reality-collapsing";

/// Settings file name inside the config dir.
pub const SETTINGS_FILE: &str = "settings.ron";

/// Largest frame delta fed to scene updates, in seconds.
/// Keeps scrolling from jumping after a window drag or breakpoint.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Music track names (files are `assets/music/<name>.ogg`).
pub mod music {
    pub const TITLE: &str = "title";
    pub const CREDITS: &str = "credits";
    pub const VICTORY: &str = "victory";

    pub const ALL: [&str; 3] = [TITLE, CREDITS, VICTORY];
}

/// Sound event names (files are `assets/sfx/<name>.wav`).
pub mod sfx {
    pub const MENU_MOVE: &str = "menu_move";
    pub const MENU_CONFIRM: &str = "menu_confirm";

    pub const ALL: [&str; 2] = [MENU_MOVE, MENU_CONFIRM];
}
