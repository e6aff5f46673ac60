//! F3 debug overlay
//!
//! Drawn with macroquad directly on top of the presented frame, so it is not
//! affected by glitch effects or letterboxing.

use macroquad::prelude::*;

use crate::input::{Action, InputState};

const FONT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 22.0;
const PADDING: f32 = 8.0;

#[derive(Debug, Default)]
pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::debug!("debug overlay {}", if self.visible { "on" } else { "off" });
    }

    pub fn draw(&self, scene: &str, input: &InputState, has_gamepad: bool) {
        if !self.visible {
            return;
        }
        let physical_mem = memory_stats::memory_stats().map(|m| m.physical_mem);
        let mut lines = overlay_lines(get_fps(), get_frame_time(), scene, physical_mem, has_gamepad);
        lines.push(held_line(input));

        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as f32 * FONT_SIZE * 0.5 + PADDING * 2.0;
        let height = lines.len() as f32 * LINE_HEIGHT + PADDING * 2.0;
        draw_rectangle(0.0, 0.0, width, height, Color::from_rgba(0, 0, 0, 180));
        for (i, line) in lines.iter().enumerate() {
            let y = PADDING + (i as f32 + 1.0) * LINE_HEIGHT - 6.0;
            draw_text(line, PADDING, y, FONT_SIZE, Color::from_rgba(120, 255, 120, 255));
        }
    }
}

/// Text rows shown by the overlay
fn overlay_lines(fps: i32, frame_time: f32, scene: &str, physical_mem: Option<usize>, has_gamepad: bool) -> Vec<String> {
    let mem = match physical_mem {
        Some(bytes) => format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
        None => "n/a".to_string(),
    };
    vec![
        format!("FPS: {} ({:.2} ms)", fps, frame_time * 1000.0),
        format!("Scene: {}", scene),
        format!("Memory: {}", mem),
        format!("Gamepad: {}", if has_gamepad { "connected" } else { "none" }),
    ]
}

fn held_line(input: &InputState) -> String {
    let held: Vec<String> = Action::ALL
        .iter()
        .filter(|&&a| input.get(a))
        .map(|a| format!("{:?}", a))
        .collect();
    format!("Held: {} (axis {:.2}, {:.2})", held.join(" "), input.move_axis, input.vertical_axis)
}
