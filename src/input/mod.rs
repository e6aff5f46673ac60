//! Input handling with gamepad support
//!
//! Action-based held state plus discrete events. Menus consume key events;
//! gamepad menu presses arrive as the equivalent keys.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard and mouse only

mod actions;
mod event;
mod gamepad;
mod state;

pub use actions::*;
pub use event::{EventQueue, GameEvent, TimerId, TimerQueue};
pub use state::{InputState, InputSystem};
