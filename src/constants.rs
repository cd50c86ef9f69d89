// Play area (logical units)
pub const SCREEN_WIDTH: f64 = 320.0;
pub const SCREEN_HEIGHT: f64 = 480.0;

// Bird
pub const BIRD_SIZE: f64 = 20.0;
pub const BIRD_X: f64 = SCREEN_WIDTH / 2.0; // Fixed column, horizontal center
pub const BIRD_START_Y: f64 = SCREEN_HEIGHT / 2.0;

// Physics, per tick
pub const GRAVITY: f64 = 0.5;
pub const JUMP_VELOCITY: f64 = -8.0;

// Pipes
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 100.0;
pub const PIPE_SPEED: f64 = 2.0;
pub const PIPE_SPAWN_TICKS: u64 = 180;
pub const PIPE_GAP_OFFSETS: [f64; 3] = [-60.0, 0.0, 60.0];

// Timing
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

// Files
pub const HIGH_SCORE_FILENAME: &str = "highscore.txt";
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "flappy.log";
