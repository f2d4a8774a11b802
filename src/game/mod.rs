//! Core game logic for arcade snake.
//!
//! Everything in here is deterministic given a seeded RNG and carries no
//! I/O or rendering dependencies. The tick engine advances the session
//! state only when enough wall-clock time has accumulated, so the caller
//! may poll it at any framerate.

pub mod config;
pub mod direction;
pub mod engine;
pub mod spawner;
pub mod state;

pub use config::ArenaConfig;
pub use direction::Direction;
pub use engine::{CollisionKind, TickEngine, TickInfo};
pub use spawner::FoodSpawner;
pub use state::{Entity, EntityKind, FoodKind, FoodSlot, GameState, RenderEntity, Snake};
