use glam::Vec2;

use super::config::ArenaConfig;
use super::direction::Direction;

/// A positioned, oriented game object. Snake segments and food share the
/// type; food ignores its direction (orientation only matters when a
/// segment sprite is drawn).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub direction: Direction,
}

impl Entity {
    pub fn new(position: Vec2, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// The snake: head at index 0, tail last.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Entity>,
}

impl Snake {
    /// Create a one-segment snake at the given position and heading
    pub fn new(position: Vec2, direction: Direction) -> Self {
        Self {
            segments: vec![Entity::new(position, direction)],
        }
    }

    pub fn head(&self) -> Entity {
        self.segments[0]
    }

    pub fn tail(&self) -> Entity {
        *self
            .segments
            .last()
            .expect("snake is non-empty after initialization")
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Entity] {
        &self.segments
    }

    /// Body segments (excluding the head)
    pub fn body(&self) -> &[Entity] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Shift-register pass: every segment takes the position and direction
    /// its predecessor held before this call. Must run before the head
    /// moves, iterating tail-to-neck so no predecessor is overwritten
    /// before it is read.
    pub fn propagate(&mut self) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
    }

    /// Displace the head one stride along the given heading
    pub fn advance_head(&mut self, direction: Direction, stride: f32) {
        let head = &mut self.segments[0];
        head.direction = direction;
        head.position += direction.unit() * stride;
    }

    /// Append `count` exact duplicates of the current tail. They occupy
    /// the same spot until propagation unspools them over later ticks.
    pub fn grow(&mut self, count: usize) {
        let segment = self.tail();
        self.segments
            .extend(std::iter::repeat(segment).take(count));
    }

    /// True when any non-head segment lies within `threshold` of `pos`
    pub fn body_hits(&self, pos: Vec2, threshold: f32) -> bool {
        self.body()
            .iter()
            .any(|seg| seg.position.distance(pos) < threshold)
    }

    /// True when any segment (head included) lies within `threshold`
    pub fn occupies(&self, pos: Vec2, threshold: f32) -> bool {
        self.segments
            .iter()
            .any(|seg| seg.position.distance(pos) < threshold)
    }

    #[cfg(test)]
    pub(crate) fn set_segment_position(&mut self, idx: usize, pos: Vec2) {
        self.segments[idx].position = pos;
    }
}

/// Which food was eaten or spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Small,
    Big,
}

/// One of the two food singletons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSlot {
    pub entity: Entity,
    pub on_screen: bool,
}

impl FoodSlot {
    fn hidden() -> Self {
        Self {
            entity: Entity::new(Vec2::ZERO, Direction::Right),
            on_screen: false,
        }
    }

    pub fn place(&mut self, position: Vec2) {
        self.entity.position = position;
    }
}

/// Marker for the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Head,
    Body,
    FoodSmall,
    FoodBig,
}

/// Read-only render snapshot of one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEntity {
    pub kind: EntityKind,
    pub position: Vec2,
    pub direction: Direction,
}

/// Complete session state. Created once at startup, mutated only by the
/// tick engine, terminal once `game_over` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub small_food: FoodSlot,
    pub big_food: FoodSlot,
    pub current_direction: Direction,
    pub score: u32,
    pub small_food_eaten: u8,
    pub ticks: u64,
    pub game_over: bool,
}

impl GameState {
    /// Snake of length 1 centered in the arena, heading right. The first
    /// small food is placed by the engine before the loop starts.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            snake: Snake::new(config.center(), Direction::Right),
            small_food: FoodSlot::hidden(),
            big_food: FoodSlot::hidden(),
            current_direction: Direction::Right,
            score: 0,
            small_food_eaten: 0,
            ticks: 0,
            game_over: false,
        }
    }

    /// Snapshot of everything drawable, head first, then body, then
    /// whichever food is on-screen.
    pub fn render_entities(&self) -> Vec<RenderEntity> {
        let mut out = Vec::with_capacity(self.snake.len() + 1);
        for (i, seg) in self.snake.segments().iter().enumerate() {
            out.push(RenderEntity {
                kind: if i == 0 {
                    EntityKind::Head
                } else {
                    EntityKind::Body
                },
                position: seg.position,
                direction: seg.direction,
            });
        }
        if self.big_food.on_screen {
            out.push(RenderEntity {
                kind: EntityKind::FoodBig,
                position: self.big_food.entity.position,
                direction: self.big_food.entity.direction,
            });
        } else if self.small_food.on_screen {
            out.push(RenderEntity {
                kind: EntityKind::FoodSmall,
                position: self.small_food.entity.position,
                direction: self.small_food.entity.direction,
            });
        }
        out
    }
}
