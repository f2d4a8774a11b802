use anyhow::{bail, Result};
use glam::Vec2;
use rand::Rng;

use super::config::ArenaConfig;
use super::state::{FoodKind, Snake};

/// Rejection attempts before falling back to a deterministic grid scan.
/// Only reachable once the snake covers most of the arena.
const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Picks random food positions that keep clear of the snake body.
pub struct FoodSpawner {
    config: ArenaConfig,
    rng: rand::rngs::ThreadRng,
}

impl FoodSpawner {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Pick a position for a new food item.
    ///
    /// Samples uniform integer coordinates inset from the walls, rejecting
    /// candidates within `square_size` of any snake segment. After
    /// [`MAX_SPAWN_ATTEMPTS`] rejections a grid scan finds a free cell
    /// deterministically; a fully occupied arena is a fatal error rather
    /// than a hang.
    pub fn spawn(&mut self, kind: FoodKind, snake: &Snake) -> Result<Vec2> {
        let (x_span, y_span) = self.sample_spans()?;
        let low = self.sample_origin();

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let x = low.x as i32 + self.rng.gen_range(0..x_span);
            let y = low.y as i32 + self.rng.gen_range(0..y_span);
            let candidate = Vec2::new(x as f32, y as f32);

            if !snake.occupies(candidate, self.config.square_size) {
                tracing::debug!(?kind, x, y, "food spawned");
                return Ok(candidate);
            }
        }

        tracing::warn!(
            ?kind,
            attempts = MAX_SPAWN_ATTEMPTS,
            "random food placement exhausted, scanning for a free cell"
        );
        match self.scan_free_cell(snake) {
            Some(candidate) => Ok(candidate),
            None => bail!("no free cell left in the arena to place food"),
        }
    }

    /// Lower-left corner of the sampling region
    fn sample_origin(&self) -> Vec2 {
        let inset = self.config.wall_thickness + 2.0 * self.config.square_size;
        Vec2::new(inset, inset)
    }

    /// Inclusive integer spans of the sampling region along each axis
    fn sample_spans(&self) -> Result<(i32, i32)> {
        let inset = 2 * (self.config.wall_thickness as i32 + 2 * self.config.square_size as i32);
        let x_span = self.config.width as i32 - inset + 1;
        let y_span = self.config.height as i32 - inset + 1;
        if x_span <= 0 || y_span <= 0 {
            bail!(
                "arena {}x{} leaves no room to place food inside the walls",
                self.config.width,
                self.config.height
            );
        }
        Ok((x_span, y_span))
    }

    /// Walk the sampling region in `square_size` steps and return the
    /// first cell the snake does not occupy.
    fn scan_free_cell(&self, snake: &Snake) -> Option<Vec2> {
        let (x_span, y_span) = self.sample_spans().ok()?;
        let low = self.sample_origin();
        let step = self.config.square_size as i32;

        for y in (0..y_span).step_by(step as usize) {
            for x in (0..x_span).step_by(step as usize) {
                let candidate = Vec2::new(low.x + x as f32, low.y + y as f32);
                if !snake.occupies(candidate, self.config.square_size) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}
