//! Game action definitions

/// All actions that can be triggered by input
///
/// Keyboard / gamepad (Xbox layout):
/// - W, Up / D-pad up, left stick up = MenuUp, Up
/// - S, Down / D-pad down, left stick down = MenuDown, Down
/// - Enter, Space / A = Accept
/// - Escape, Backspace / B = Back
/// - Escape, P / Start = Pause
/// - J, X / X, RB = Shoot
/// - A, Left / D-pad left = MoveLeft
/// - D, Right / D-pad right = MoveRight
/// - Space, W, Up / A = Jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Menus
    MenuUp,
    MenuDown,
    Accept,
    Back,
    Pause,

    // Gameplay
    Shoot,
    MoveLeft,
    MoveRight,
    Up,
    Down,
    Jump,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::MenuUp,
        Action::MenuDown,
        Action::Accept,
        Action::Back,
        Action::Pause,
        Action::Shoot,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Up,
        Action::Down,
        Action::Jump,
    ];
}
