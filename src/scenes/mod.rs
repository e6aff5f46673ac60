//! Concrete scenes
//!
//! - `seizure_warning` - photosensitivity notice shown at boot
//! - `title` - logo and main menu
//! - `settings_menu` - options, saved on exit
//! - `credits` - glitching credit roll, also used as the ending cutscene
//! - `victory` - shown after the ending credits

mod credits;
mod seizure_warning;
mod settings_menu;
mod title;
mod victory;

pub use credits::CreditsScene;
pub use seizure_warning::SeizureWarningScene;
pub use settings_menu::SettingsScene;
pub use title::TitleScene;
pub use victory::VictoryScene;

use crate::scene::{Scene, SceneId};

/// Build a fresh scene for `id`
pub fn build(id: SceneId) -> Box<dyn Scene> {
    match id {
        SceneId::SeizureWarning => Box::new(SeizureWarningScene::new()),
        SceneId::Title => Box::new(TitleScene::new()),
        SceneId::Settings => Box::new(SettingsScene::new()),
        SceneId::Credits { ending } => Box::new(CreditsScene::new(ending)),
        SceneId::Victory => Box::new(VictoryScene::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_names() {
        assert_eq!(build(SceneId::SeizureWarning).name(), "seizure_warning");
        assert_eq!(build(SceneId::Title).name(), "title");
        assert_eq!(build(SceneId::Settings).name(), "settings");
        assert_eq!(build(SceneId::Credits { ending: false }).name(), "credits");
        assert_eq!(build(SceneId::Credits { ending: true }).name(), "ending_credits");
        assert_eq!(build(SceneId::Victory).name(), "victory");
    }
}
