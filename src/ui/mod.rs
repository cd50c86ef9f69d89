//! Terminal UI. Reads the scene only; never touches game state.

pub mod flappy_scene;

pub use flappy_scene::render_flappy;
