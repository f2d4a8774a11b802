pub mod controller;

pub use controller::{InputController, KeyState};
