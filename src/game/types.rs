//! Flappy Bird data structures.
//!
//! The whole simulation lives in one [`FlappyGame`] value that the game loop
//! owns and passes explicitly to the update functions in [`super::logic`].

use crate::constants::*;

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to press confirm.
    Start,
    Playing,
    /// The run ended; confirm restarts.
    Over,
}

/// A single pipe obstacle (top + bottom pair with a gap).
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge. Only ever decreases.
    pub x: f64,
    /// Vertical center of the gap, fixed at spawn.
    pub gap_y: f64,
    /// Whether this pipe has already awarded its point.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, gap_y: f64) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    /// Trailing (right) edge.
    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    /// Barrier from the top of the screen down to the gap.
    pub fn upper_rect(&self) -> Rect {
        Rect::new(
            self.x as i32,
            0,
            self.right() as i32,
            (self.gap_y - PIPE_GAP / 2.0) as i32,
        )
    }

    /// Barrier from the gap down to the bottom of the screen.
    pub fn lower_rect(&self) -> Rect {
        Rect::new(
            self.x as i32,
            (self.gap_y + PIPE_GAP / 2.0) as i32,
            self.right() as i32,
            SCREEN_HEIGHT as i32,
        )
    }
}

/// Integer axis-aligned box, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Builds a rect from two corners, swapping coordinates if needed.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// True if the two rects share a non-empty area. Touching edges don't count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub phase: Phase,

    // Bird state
    /// Vertical center of the bird. 0 = ceiling, grows downward.
    pub bird_y: f64,
    /// Vertical velocity in units/tick (positive = downward).
    pub bird_velocity: f64,

    /// Live pipes, oldest first.
    pub pipes: Vec<Pipe>,

    pub score: u32,
    /// Best score ever seen, carried across restarts.
    pub high_score: u32,

    /// Ticks since this run was created, counted in every phase.
    pub tick_count: u64,
}

impl FlappyGame {
    /// Create a fresh game in the Start phase.
    pub fn new(high_score: u32) -> Self {
        Self {
            phase: Phase::Start,
            bird_y: BIRD_START_Y,
            bird_velocity: 0.0,
            pipes: Vec::new(),
            score: 0,
            high_score,
            tick_count: 0,
        }
    }

    /// The bird's collision box, centered on its fixed column.
    pub fn bird_rect(&self) -> Rect {
        let half = BIRD_SIZE / 2.0;
        Rect::new(
            (BIRD_X - half) as i32,
            (self.bird_y - half) as i32,
            (BIRD_X + half) as i32,
            (self.bird_y + half) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let game = FlappyGame::new(12);
        assert_eq!(game.phase, Phase::Start);
        assert_eq!(game.bird_y, SCREEN_HEIGHT / 2.0);
        assert_eq!(game.bird_velocity, 0.0);
        assert!(game.pipes.is_empty());
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 12);
        assert_eq!(game.tick_count, 0);
    }

    #[test]
    fn test_bird_rect_centered_on_column() {
        let game = FlappyGame::new(0);
        assert_eq!(game.bird_rect(), Rect::new(150, 230, 170, 250));
    }

    #[test]
    fn test_pipe_rects_frame_the_gap() {
        let pipe = Pipe::new(100.0, 240.0);
        assert_eq!(pipe.upper_rect(), Rect::new(100, 0, 160, 190));
        assert_eq!(pipe.lower_rect(), Rect::new(100, 290, 160, 480));
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(9, 9, 20, 20)));
        assert!(!a.overlaps(&Rect::new(10, 0, 20, 10))); // shared edge
        assert!(!a.overlaps(&Rect::new(0, 20, 10, 30)));
        assert!(!a.overlaps(&Rect::new(5, 5, 5, 8))); // empty
    }

    #[test]
    fn test_rect_new_normalizes_corners() {
        let r = Rect::new(10, 20, 0, 5);
        assert_eq!((r.min_x, r.min_y, r.max_x, r.max_y), (0, 5, 10, 20));
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 15);
    }
}
