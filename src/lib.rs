//! Flappy Bird - Terminal Arcade Game Library
//!
//! This module exposes the game logic for testing and external use.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod high_score;
pub mod input;
pub mod scene;

pub use constants::*;
pub use game::{process_tick, FlappyGame, Phase, TickEvent, TickInput};
pub use high_score::{FileScoreStore, MemoryScoreStore, ScoreStore};
