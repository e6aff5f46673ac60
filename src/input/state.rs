//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input each frame,
//! combining them into one `InputState` snapshot. Gamepad menu presses are
//! also turned into synthetic key presses so menus only have to understand
//! keyboard events.

use macroquad::prelude::*;

use super::event::GameEvent;
use super::gamepad::{button, Gamepad};
use super::Action;

/// Stick deflection that counts as a digital direction
const STICK_THRESHOLD: f32 = 0.5;

/// One frame's worth of held inputs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub menu_up: bool,
    pub menu_down: bool,
    pub accept: bool,
    pub back: bool,
    pub pause: bool,
    pub shoot: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    /// Horizontal movement in [-1, 1], negative is left
    pub move_axis: f32,
    /// Vertical movement in [-1, 1], negative is up
    pub vertical_axis: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::MenuUp => self.menu_up,
            Action::MenuDown => self.menu_down,
            Action::Accept => self.accept,
            Action::Back => self.back,
            Action::Pause => self.pause,
            Action::Shoot => self.shoot,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Jump => self.jump,
        }
    }

    fn set(&mut self, action: Action, value: bool) {
        let slot = match action {
            Action::MenuUp => &mut self.menu_up,
            Action::MenuDown => &mut self.menu_down,
            Action::Accept => &mut self.accept,
            Action::Back => &mut self.back,
            Action::Pause => &mut self.pause,
            Action::Shoot => &mut self.shoot,
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Jump => &mut self.jump,
        };
        *slot |= value;
    }

    /// Derive digital directions and axes from a stick position.
    /// `stick.y` is screen-space: positive is down.
    pub fn apply_stick(&mut self, stick: Vec2) {
        if stick.y <= -STICK_THRESHOLD {
            self.menu_up = true;
            self.up = true;
        }
        if stick.y >= STICK_THRESHOLD {
            self.menu_down = true;
            self.down = true;
        }
        if stick.x <= -STICK_THRESHOLD {
            self.move_left = true;
        }
        if stick.x >= STICK_THRESHOLD {
            self.move_right = true;
        }
        if stick.x.abs() > self.move_axis.abs() {
            self.move_axis = stick.x.clamp(-1.0, 1.0);
        }
        if stick.y.abs() > self.vertical_axis.abs() {
            self.vertical_axis = stick.y.clamp(-1.0, 1.0);
        }
    }

    /// Fill axes from digital directions when no analog input set them
    fn resolve_axes(&mut self) {
        if self.move_axis == 0.0 {
            self.move_axis = (self.move_right as i32 - self.move_left as i32) as f32;
        }
        if self.vertical_axis == 0.0 {
            self.vertical_axis = (self.down as i32 - self.up as i32) as f32;
        }
    }

    /// Keys to synthesize for menu actions that went from released to held
    pub fn menu_presses(prev: &InputState, cur: &InputState) -> Vec<KeyCode> {
        let mut keys = Vec::new();
        if cur.menu_up && !prev.menu_up {
            keys.push(KeyCode::Up);
        }
        if cur.menu_down && !prev.menu_down {
            keys.push(KeyCode::Down);
        }
        if cur.accept && !prev.accept {
            keys.push(KeyCode::Enter);
        }
        if (cur.back && !prev.back) || (cur.pause && !prev.pause) {
            keys.push(KeyCode::Escape);
        }
        keys
    }
}

fn keyboard_down(action: Action) -> bool {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_key_down(*k));
    match action {
        Action::MenuUp => any(&[KeyCode::W, KeyCode::Up]),
        Action::MenuDown => any(&[KeyCode::S, KeyCode::Down]),
        Action::Accept => any(&[KeyCode::Enter, KeyCode::Space]),
        Action::Back => any(&[KeyCode::Escape, KeyCode::Backspace]),
        Action::Pause => any(&[KeyCode::Escape, KeyCode::P]),
        Action::Shoot => any(&[KeyCode::J, KeyCode::X]),
        Action::MoveLeft => any(&[KeyCode::A, KeyCode::Left]),
        Action::MoveRight => any(&[KeyCode::D, KeyCode::Right]),
        Action::Up => any(&[KeyCode::W, KeyCode::Up]),
        Action::Down => any(&[KeyCode::S, KeyCode::Down]),
        Action::Jump => any(&[KeyCode::Space, KeyCode::W, KeyCode::Up]),
    }
}

fn gamepad_down(gamepad: &Gamepad, action: Action) -> bool {
    match action {
        Action::MenuUp | Action::Up => gamepad.is_button_down(button::DPAD_UP),
        Action::MenuDown | Action::Down => gamepad.is_button_down(button::DPAD_DOWN),
        Action::Accept | Action::Jump => gamepad.is_button_down(button::A),
        Action::Back => gamepad.is_button_down(button::B),
        Action::Pause => gamepad.is_button_down(button::START),
        Action::Shoot => gamepad.is_button_down(button::X) || gamepad.is_button_down(button::RB),
        Action::MoveLeft => gamepad.is_button_down(button::DPAD_LEFT),
        Action::MoveRight => gamepad.is_button_down(button::DPAD_RIGHT),
    }
}

/// Owns the input devices and produces per-frame state and events
pub struct InputSystem {
    gamepad: Gamepad,
    /// Combined keyboard + gamepad state for the current frame
    pub state: InputState,
    prev_pad: InputState,
}

impl InputSystem {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
            state: InputState::new(),
            prev_pad: InputState::new(),
        }
    }

    /// Call once per frame. Returns the discrete events raised this frame.
    pub fn poll(&mut self) -> Vec<GameEvent> {
        self.gamepad.poll();

        let mut pad = InputState::new();
        if self.gamepad.has_gamepad() {
            for action in Action::ALL {
                pad.set(action, gamepad_down(&self.gamepad, action));
            }
            pad.apply_stick(self.gamepad.left_stick());
        }

        let mut state = pad;
        for action in Action::ALL {
            state.set(action, keyboard_down(action));
        }
        state.resolve_axes();
        self.state = state;

        let mut events: Vec<GameEvent> = get_keys_pressed()
            .into_iter()
            .map(GameEvent::KeyDown)
            .collect();
        events.extend(
            InputState::menu_presses(&self.prev_pad, &pad)
                .into_iter()
                .map(GameEvent::KeyDown),
        );
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            events.push(GameEvent::MouseDown);
        }
        self.prev_pad = pad;
        events
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_presses_only_on_rising_edge() {
        let prev = InputState::new();
        let mut cur = InputState::new();
        cur.menu_down = true;
        cur.accept = true;
        assert_eq!(InputState::menu_presses(&prev, &cur), vec![KeyCode::Down, KeyCode::Enter]);
        assert!(InputState::menu_presses(&cur, &cur).is_empty());
    }

    #[test]
    fn test_back_and_pause_collapse_to_one_escape() {
        let prev = InputState::new();
        let cur = InputState { back: true, pause: true, ..Default::default() };
        assert_eq!(InputState::menu_presses(&prev, &cur), vec![KeyCode::Escape]);
    }

    #[test]
    fn test_stick_sets_directions_and_axes() {
        let mut s = InputState::new();
        s.apply_stick(Vec2::new(-0.8, 0.6));
        assert!(s.move_left && !s.move_right);
        assert!(s.menu_down && s.down && !s.menu_up);
        assert!((s.move_axis + 0.8).abs() < 1e-6);
        assert!((s.vertical_axis - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_small_stick_leaves_digital_untouched() {
        let mut s = InputState::new();
        s.apply_stick(Vec2::new(0.3, -0.2));
        assert!(!s.move_right && !s.menu_up);
        assert!((s.move_axis - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_axes_from_digital() {
        let mut s = InputState { move_right: true, up: true, ..Default::default() };
        s.resolve_axes();
        assert_eq!(s.move_axis, 1.0);
        assert_eq!(s.vertical_axis, -1.0);
        assert!(s.get(Action::MoveRight));
    }
}
