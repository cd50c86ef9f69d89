//! What to draw for a given game state.
//!
//! The scene is a plain description in logical units: a background colour,
//! the bird box, two barrier boxes per pipe and some overlay text. Renderers
//! only read the game through this.

use crate::game::{FlappyGame, Phase, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
pub const BIRD_YELLOW: Rgb = Rgb(255, 255, 0);
pub const PIPE_GREEN: Rgb = Rgb(0, 128, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    /// Not drawn on the start screen.
    pub bird: Option<Rect>,
    /// Upper and lower barrier of every live pipe.
    pub barriers: Vec<Rect>,
    pub overlay: Vec<String>,
}

pub fn build_scene(game: &FlappyGame) -> Scene {
    let overlay = match game.phase {
        Phase::Start => vec![
            format!("High Score: {}", game.high_score),
            "Press Enter to start".to_string(),
        ],
        Phase::Playing => vec![format!("Score: {}", game.score)],
        Phase::Over => vec![
            format!("Game Over! Score: {}", game.score),
            "Press Enter to restart".to_string(),
        ],
    };

    if game.phase == Phase::Start {
        return Scene {
            background: SKY_BLUE,
            bird: None,
            barriers: Vec::new(),
            overlay,
        };
    }

    let barriers = game
        .pipes
        .iter()
        .flat_map(|pipe| [pipe.upper_rect(), pipe.lower_rect()])
        .collect();

    Scene {
        background: SKY_BLUE,
        bird: Some(game.bird_rect()),
        barriers,
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Pipe;

    #[test]
    fn test_start_scene() {
        let game = FlappyGame::new(9);
        let scene = build_scene(&game);
        assert_eq!(scene.background, SKY_BLUE);
        assert!(scene.bird.is_none());
        assert!(scene.barriers.is_empty());
        assert_eq!(scene.overlay, vec!["High Score: 9", "Press Enter to start"]);
    }

    #[test]
    fn test_playing_scene() {
        let mut game = FlappyGame::new(9);
        game.phase = Phase::Playing;
        game.score = 4;
        game.pipes.push(Pipe::new(200.0, 180.0));
        game.pipes.push(Pipe::new(20.0, 300.0));

        let scene = build_scene(&game);
        assert_eq!(scene.bird, Some(game.bird_rect()));
        assert_eq!(scene.barriers.len(), 4);
        assert_eq!(scene.barriers[0], Rect::new(200, 0, 260, 130));
        assert_eq!(scene.barriers[1], Rect::new(200, 230, 260, 480));
        assert_eq!(scene.overlay, vec!["Score: 4"]);
    }

    #[test]
    fn test_over_scene() {
        let mut game = FlappyGame::new(2);
        game.phase = Phase::Over;
        game.score = 11;
        let scene = build_scene(&game);
        assert!(scene.bird.is_some());
        assert_eq!(
            scene.overlay,
            vec!["Game Over! Score: 11", "Press Enter to restart"]
        );
    }
}
