//! Discrete events and one-shot timers
//!
//! Events are collected during the frame (input polling, fired timers) and
//! drained once by the game loop, which hands each to the active scene.

use macroquad::prelude::KeyCode;

/// Identifies a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Ending credits finished; hand over to the victory screen
    EndingCreditsDone,
}

/// Something that happened this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    KeyDown(KeyCode),
    MouseDown,
    Timer(TimerId),
    Quit,
}

impl GameEvent {
    /// Any key or button press the player can use to dismiss a screen
    pub fn is_press(&self) -> bool {
        matches!(self, GameEvent::KeyDown(_) | GameEvent::MouseDown)
    }
}

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending one-shot timers, counted down by frame time
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(TimerId, f32)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `id` once after `seconds`. Rescheduling an id replaces it.
    pub fn schedule(&mut self, id: TimerId, seconds: f32) {
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.push((id, seconds));
    }

    /// Advance all timers and return the ones that expired, in schedule order
    pub fn tick(&mut self, dt: f32) -> Vec<TimerId> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|(id, remaining)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                fired.push(*id);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
