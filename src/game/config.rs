use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed arena and timing configuration, supplied once at startup.
///
/// All distances are in world/pixel units. The intervals are in seconds;
/// the boost/brake values mirror the classic controls: holding the brake
/// key pins the tick interval at a fixed value, each boost key press
/// shrinks it by one step down to a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Width of the game window
    pub width: f32,
    /// Height of the game window
    pub height: f32,
    /// Size of game objects (snake segments, food)
    pub square_size: f32,
    /// Thickness of the game boundaries
    pub wall_thickness: f32,
    /// Extra inset subtracted from the bottom wall only. The bottom wall
    /// is visibly thinner than the others; keep the offset as-is.
    pub bottom_margin_offset: f32,
    /// Distance the head moves in a single tick
    pub move_stride: f32,
    /// Segments appended when small food is eaten
    pub growth_small: usize,
    /// Segments appended when big food is eaten
    pub growth_big: usize,
    /// Baseline tick interval in seconds
    pub base_interval: f32,
    /// Tick interval while the brake key is held
    pub brake_interval: f32,
    /// Interval decrement applied per boost key press
    pub boost_step: f32,
    /// Boost stops decrementing once the interval is at or below this
    pub interval_floor: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            square_size: 20.0,
            wall_thickness: 60.0,
            bottom_margin_offset: 17.0,
            move_stride: 2.5,
            growth_small: 25,
            growth_big: 75,
            base_interval: 0.012,
            brake_interval: 0.5,
            boost_step: 0.005,
            interval_floor: 0.003,
        }
    }
}

impl ArenaConfig {
    /// Create a configuration with a custom window size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Baseline tick interval as a [`Duration`]
    pub fn base_tick(&self) -> Duration {
        Duration::from_secs_f32(self.base_interval)
    }

    /// Center of the arena, where the snake starts
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when the position lies inside the playable interior.
    ///
    /// The bottom edge is inset less than the other three; see
    /// [`ArenaConfig::bottom_margin_offset`].
    pub fn in_bounds(&self, pos: glam::Vec2) -> bool {
        pos.x >= self.wall_thickness
            && pos.x < self.width - self.wall_thickness
            && pos.y >= self.wall_thickness - self.bottom_margin_offset
            && pos.y < self.height - self.wall_thickness
    }
}
