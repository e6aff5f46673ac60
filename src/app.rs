//! Game driver
//!
//! Owns the active scene, the shared context and the framebuffer. Each frame
//! fired timers are turned into events, queued events are dispatched to the
//! scene, then the scene updates and draws.

use crate::config::{MAX_FRAME_DT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{EventQueue, GameEvent};
use crate::render::Framebuffer;
use crate::scene::{GameContext, Scene, SceneId, Transition};
use crate::scenes;

pub struct Game {
    pub ctx: GameContext,
    scene: Box<dyn Scene>,
    scene_id: SceneId,
    events: EventQueue<GameEvent>,
    fb: Framebuffer,
    running: bool,
}

impl Game {
    /// Start at the seizure warning, or the title if the player opted out
    pub fn new(ctx: GameContext) -> Self {
        let first = if ctx.settings.skip_seizure_warning {
            SceneId::Title
        } else {
            SceneId::SeizureWarning
        };
        let mut game = Self {
            ctx,
            scene: scenes::build(first),
            scene_id: first,
            events: EventQueue::new(),
            fb: Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            running: true,
        };
        game.scene.on_enter(&mut game.ctx);
        log::info!("starting at scene '{}'", game.scene.name());
        game
    }

    /// Leave the current scene and enter a freshly built one.
    /// Timers scheduled by the old scene are dropped.
    pub fn change_scene(&mut self, id: SceneId) {
        self.scene.on_exit(&mut self.ctx);
        self.ctx.timers.cancel_all();
        let from = self.scene.name();
        self.scene = scenes::build(id);
        self.scene_id = id;
        self.scene.on_enter(&mut self.ctx);
        log::info!("scene '{}' -> '{}'", from, self.scene.name());
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.send(event);
    }

    /// Advance one frame. Returns false once the game should exit.
    pub fn step(&mut self, dt: f32) -> bool {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        for id in self.ctx.timers.tick(dt) {
            self.events.send(GameEvent::Timer(id));
        }

        let pending: Vec<GameEvent> = self.events.drain().collect();
        for event in pending {
            if event == GameEvent::Quit {
                self.running = false;
                break;
            }
            let transition = self.scene.handle_event(&event, &mut self.ctx);
            self.apply(transition);
            if !self.running {
                break;
            }
        }

        if self.running {
            let transition = self.scene.update(dt, &mut self.ctx);
            self.apply(transition);
        }

        if !self.running {
            self.scene.on_exit(&mut self.ctx);
            log::info!("quitting from scene '{}'", self.scene.name());
        }
        self.running
    }

    /// Draw the current scene into the framebuffer
    pub fn render(&mut self) -> &Framebuffer {
        self.scene.draw(&mut self.fb, &mut self.ctx);
        &self.fb
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Switch(id) => self.change_scene(id),
            Transition::Quit => self.running = false,
        }
    }

    pub fn scene_id(&self) -> SceneId {
        self.scene_id
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene.name()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
