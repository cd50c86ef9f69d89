//! Flappy Bird game core.
//!
//! The bird falls under gravity and flaps upward on Space. Pipes scroll in
//! from the right every few seconds; passing one scores a point and touching
//! one, or the floor, ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
