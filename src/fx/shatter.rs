//! Screen shatter particles
//!
//! When the credits collapse, the last frame breaks into colored shards that
//! burst upward and fall. Shards live in a fixed-size pool; a shard is freed
//! once it drops below the bottom of the screen.

use rand::Rng;

use crate::render::{Color, Framebuffer};

/// Maximum number of live shards
pub const MAX_SHARDS: usize = 256;

/// Shards spawned per collapse
pub const SHATTER_COUNT: usize = 120;

const GRAVITY: f32 = 0.35;

/// A single shard in the pool
#[derive(Debug, Clone, Copy)]
pub struct Shard {
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per frame
    pub dx: f32,
    pub dy: f32,
    pub color: Color,
    /// Square size in pixels (1-3)
    pub size: u8,
    /// Is this shard slot active?
    pub alive: bool,
}

impl Default for Shard {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            color: Color::WHITE,
            size: 1,
            alive: false,
        }
    }
}

impl Shard {
    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.dy += GRAVITY;
    }
}

/// The shard pool
pub struct ShardPool {
    pub shards: [Shard; MAX_SHARDS],
}

impl ShardPool {
    pub fn new() -> Self {
        Self {
            shards: [Shard::default(); MAX_SHARDS],
        }
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.shards.iter().position(|s| !s.alive)
    }

    /// Spawn one shard at (x, y) with a random upward burst
    pub fn spawn_one<R: Rng>(&mut self, x: f32, y: f32, color: Color, rng: &mut R) {
        if let Some(idx) = self.find_free_slot() {
            self.shards[idx] = Shard {
                x,
                y,
                dx: rng.gen_range(-6.0..6.0),
                dy: rng.gen_range(-10.0..-4.0),
                color,
                size: rng.gen_range(1..=3),
                alive: true,
            };
        }
    }

    /// Break `count` random pixels of `frame` into shards
    pub fn spawn_from<R: Rng>(&mut self, frame: &Framebuffer, count: usize, rng: &mut R) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        for _ in 0..count {
            let x = rng.gen_range(0..frame.width);
            let y = rng.gen_range(0..frame.height);
            let color = frame.get_pixel(x, y).unwrap_or(Color::WHITE);
            self.spawn_one(x as f32, y as f32, color, rng);
        }
    }

    /// Advance one frame; shards below `floor_y` are freed
    pub fn update(&mut self, floor_y: f32) {
        for shard in &mut self.shards {
            if !shard.alive {
                continue;
            }
            shard.step();
            if shard.y > floor_y {
                shard.alive = false;
            }
        }
    }

    pub fn render(&self, fb: &mut Framebuffer) {
        for shard in self.shards.iter().filter(|s| s.alive) {
            let size = shard.size as i32;
            fb.fill_rect(shard.x as i32, shard.y as i32, size, size, shard.color);
        }
    }

    pub fn alive_count(&self) -> usize {
        self.shards.iter().filter(|s| s.alive).count()
    }

    /// Kill all shards
    pub fn clear(&mut self) {
        for s in &mut self.shards {
            s.alive = false;
        }
    }
}

impl Default for ShardPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_from_samples_frame_colors() {
        let mut frame = Framebuffer::new(32, 32);
        frame.clear(Color::MAGENTA);
        let mut pool = ShardPool::new();
        pool.spawn_from(&frame, SHATTER_COUNT, &mut SmallRng::seed_from_u64(1));

        assert_eq!(pool.alive_count(), SHATTER_COUNT);
        for s in pool.shards.iter().filter(|s| s.alive) {
            assert_eq!(s.color, Color::MAGENTA);
            assert!(s.dy < -4.0 + f32::EPSILON && s.dy >= -10.0);
            assert!((1..=3).contains(&s.size));
        }
    }

    #[test]
    fn test_pool_caps_at_capacity() {
        let frame = Framebuffer::new(8, 8);
        let mut pool = ShardPool::new();
        let mut rng = SmallRng::seed_from_u64(2);
        pool.spawn_from(&frame, MAX_SHARDS + 50, &mut rng);
        assert_eq!(pool.alive_count(), MAX_SHARDS);
    }

    #[test]
    fn test_gravity_pulls_shards_down() {
        let mut pool = ShardPool::new();
        let mut rng = SmallRng::seed_from_u64(3);
        pool.spawn_one(100.0, 100.0, Color::WHITE, &mut rng);
        let dy0 = pool.shards[0].dy;
        pool.update(1000.0);
        assert!((pool.shards[0].dy - (dy0 + GRAVITY)).abs() < 1e-5);
        assert!(pool.shards[0].y < 100.0);
    }

    #[test]
    fn test_shards_freed_below_floor() {
        let mut pool = ShardPool::new();
        let mut rng = SmallRng::seed_from_u64(4);
        pool.spawn_one(10.0, 10.0, Color::WHITE, &mut rng);
        for _ in 0..200 {
            pool.update(50.0);
        }
        assert_eq!(pool.alive_count(), 0);
    }

    #[test]
    fn test_clear() {
        let frame = Framebuffer::new(8, 8);
        let mut pool = ShardPool::new();
        pool.spawn_from(&frame, 10, &mut SmallRng::seed_from_u64(5));
        pool.clear();
        assert_eq!(pool.alive_count(), 0);
    }
}
