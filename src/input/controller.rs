use std::time::Duration;

use crate::game::{ArenaConfig, Direction};

/// Pressed/released state of the six game keys, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Shrinks the tick interval one step per press (Space)
    pub boost: bool,
    /// Pins the tick interval at a fixed value while held (Left Ctrl)
    pub brake: bool,
}

/// Maps raw key state to a buffered direction and the current tick
/// interval.
///
/// Direction buffering rejects 180-degree reversals of the committed
/// heading here, so the engine can apply the pending direction without
/// re-checking. Both modifiers use a per-key latch to tell a fresh press
/// from a hold; the boost decrement fires on press edges only.
pub struct InputController {
    pending: Direction,
    interval: f32,
    base_interval: f32,
    brake_interval: f32,
    boost_step: f32,
    interval_floor: f32,
    boost_latched: bool,
    brake_latched: bool,
}

impl InputController {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            pending: Direction::Right,
            interval: config.base_interval,
            base_interval: config.base_interval,
            brake_interval: config.brake_interval,
            boost_step: config.boost_step,
            interval_floor: config.interval_floor,
            boost_latched: false,
            brake_latched: false,
        }
    }

    /// The direction the engine should commit on its next tick
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Current speed-derived tick interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(self.interval)
    }

    /// Fold one frame of key state into the pending direction and speed.
    pub fn update(&mut self, keys: &KeyState, current: Direction) {
        self.update_speed(keys);
        self.update_direction(keys, current);
    }

    fn update_direction(&mut self, keys: &KeyState, current: Direction) {
        let requested = if keys.up {
            Some(Direction::Up)
        } else if keys.down {
            Some(Direction::Down)
        } else if keys.left {
            Some(Direction::Left)
        } else if keys.right {
            Some(Direction::Right)
        } else {
            None
        };

        if let Some(dir) = requested {
            // Reversing straight through the body is ignored.
            if !current.is_opposite(dir) {
                self.pending = dir;
            }
        }
    }

    fn update_speed(&mut self, keys: &KeyState) {
        if keys.boost && !self.boost_latched {
            self.boost_latched = true;
            if self.interval > self.interval_floor {
                self.interval -= self.boost_step;
            }
        } else if !keys.boost {
            self.boost_latched = false;
            if !self.brake_latched {
                self.interval = self.base_interval;
            }
        }

        if keys.brake && !self.brake_latched {
            self.brake_latched = true;
            self.interval = self.brake_interval;
        } else if !keys.brake {
            self.brake_latched = false;
            if !self.boost_latched {
                self.interval = self.base_interval;
            }
        }
    }
}
