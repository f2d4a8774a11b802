//! Arcade snake with variable game speed and big-food rounds.
//!
//! The `game` module is the simulation core: a fixed-interval tick engine,
//! decoupled from the render framerate and free of any I/O. The `input`,
//! `render`, `metrics` and `modes` modules are the terminal plumbing
//! around it.

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
