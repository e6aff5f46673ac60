//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend; every query reports an idle pad

use macroquad::prelude::Vec2;

// Standard gamepad button indices (matches Web Gamepad API standard mapping)
// These correspond to Xbox layout used by most platforms
pub mod button {
    pub const A: u32 = 0;           // ActionDown / South
    pub const B: u32 = 1;           // ActionRight / East
    pub const X: u32 = 2;           // ActionLeft / West
    pub const Y: u32 = 3;           // ActionUp / North
    pub const LB: u32 = 4;          // Left Bumper
    pub const RB: u32 = 5;          // Right Bumper
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Radial stick deadzone
pub const DEADZONE: f32 = 0.15;

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        /// None when the platform backend failed to initialize
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    log::warn!("gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn poll(&mut self) {
            // Process gilrs events to update internal state
            if let Some(gilrs) = self.gilrs.as_mut() {
                while let Some(event) = gilrs.next_event() {
                    log::trace!("gamepad event: {:?}", event.event);
                }
            }
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn to_gilrs(button: u32) -> Option<GilrsButton> {
            Some(match button {
                super::button::A => GilrsButton::South,
                super::button::B => GilrsButton::East,
                super::button::X => GilrsButton::West,
                super::button::Y => GilrsButton::North,
                super::button::LB => GilrsButton::LeftTrigger,
                super::button::RB => GilrsButton::RightTrigger,
                super::button::SELECT => GilrsButton::Select,
                super::button::START => GilrsButton::Start,
                super::button::DPAD_UP => GilrsButton::DPadUp,
                super::button::DPAD_DOWN => GilrsButton::DPadDown,
                super::button::DPAD_LEFT => GilrsButton::DPadLeft,
                super::button::DPAD_RIGHT => GilrsButton::DPadRight,
                _ => return None,
            })
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            let (Some(gp), Some(b)) = (self.active(), Self::to_gilrs(button)) else {
                return false;
            };
            gp.is_pressed(b)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Screen-space: down is positive
            apply_deadzone(x, y, DEADZONE)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;
