//! Integration test: Game loop mechanics
//!
//! Drives whole runs through `process_tick`: starting, flying through pipes,
//! crashing, saving the best score and restarting.

use flappy::game::{CrashCause, Phase};
use flappy::{
    process_tick, FileScoreStore, FlappyGame, MemoryScoreStore, ScoreStore, TickEvent, TickInput,
    BIRD_SIZE, BIRD_START_Y, BIRD_X, GRAVITY, SCREEN_HEIGHT,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;

const IDLE: TickInput = TickInput {
    confirm: false,
    jump: false,
};
const CONFIRM: TickInput = TickInput {
    confirm: true,
    jump: false,
};

/// Flaps whenever the bird would end the next tick more than 25 units below
/// the center of the next gap. Keeps the bird well inside every gap.
fn autopilot(game: &FlappyGame) -> TickInput {
    let target = game
        .pipes
        .iter()
        .find(|p| p.right() >= BIRD_X - BIRD_SIZE / 2.0)
        .map(|p| p.gap_y)
        .unwrap_or(SCREEN_HEIGHT / 2.0);
    let predicted = game.bird_y + game.bird_velocity + GRAVITY;
    TickInput {
        confirm: false,
        jump: predicted > target + 25.0,
    }
}

fn run_ticks(
    game: &mut FlappyGame,
    rng: &mut ChaCha8Rng,
    store: &dyn ScoreStore,
    count: u32,
    pilot: impl Fn(&FlappyGame) -> TickInput,
) -> Vec<TickEvent> {
    let mut all_events = Vec::new();
    for _ in 0..count {
        let input = pilot(game);
        all_events.extend(process_tick(game, input, rng, store));
    }
    all_events
}

fn temp_dir(test_id: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "flappy-it-{}-{}",
        test_id,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// Falling
// =============================================================================

#[test]
fn test_idle_bird_hits_floor_on_expected_tick() {
    let store = MemoryScoreStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut game = FlappyGame::new(0);

    process_tick(&mut game, CONFIRM, &mut rng, &store);
    assert_eq!(game.phase, Phase::Playing);

    // y after n ticks = 240 + 0.25 * n * (n + 1); reaches 460 at n = 30
    run_ticks(&mut game, &mut rng, &store, 29, |_| IDLE);
    assert_eq!(game.phase, Phase::Playing);
    assert!(game.bird_y < SCREEN_HEIGHT - BIRD_SIZE);

    let events = run_ticks(&mut game, &mut rng, &store, 1, |_| IDLE);
    assert_eq!(game.phase, Phase::Over);
    assert_eq!(
        events,
        vec![TickEvent::Crashed {
            cause: CrashCause::Floor
        }]
    );
    // Score 0 never beats a best of 0
    assert!(store.saved().is_empty());
}

#[test]
fn test_over_phase_freezes_simulation() {
    let store = MemoryScoreStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut game = FlappyGame::new(0);
    game.phase = Phase::Playing;
    game.bird_y = SCREEN_HEIGHT;

    run_ticks(&mut game, &mut rng, &store, 1, |_| IDLE);
    assert_eq!(game.phase, Phase::Over);
    let frozen_y = game.bird_y;

    run_ticks(&mut game, &mut rng, &store, 500, |_| IDLE);
    assert_eq!(game.phase, Phase::Over);
    assert_eq!(game.bird_y, frozen_y);
    assert!(game.pipes.is_empty());
}

// =============================================================================
// Flying through pipes
// =============================================================================

#[test]
fn test_autopilot_scores_through_pipes() {
    let store = MemoryScoreStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut game = FlappyGame::new(0);
    process_tick(&mut game, CONFIRM, &mut rng, &store);

    let events = run_ticks(&mut game, &mut rng, &store, 1200, autopilot);

    assert_eq!(game.phase, Phase::Playing, "autopilot crashed: {:?}", events);
    assert!(game.score >= 5, "score was {}", game.score);

    let scored: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            TickEvent::Scored { score } => Some(*score),
            _ => None,
        })
        .collect();
    let expected: Vec<u32> = (1..=game.score).collect();
    assert_eq!(scored, expected);

    // Never more than two pipes alive at once with this spacing
    assert!(game.pipes.len() <= 2);
}

#[test]
fn test_same_seed_same_run() {
    let store_a = MemoryScoreStore::new();
    let store_b = MemoryScoreStore::new();
    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);
    let mut a = FlappyGame::new(0);
    let mut b = FlappyGame::new(0);
    a.phase = Phase::Playing;
    b.phase = Phase::Playing;

    let events_a = run_ticks(&mut a, &mut rng_a, &store_a, 800, autopilot);
    let events_b = run_ticks(&mut b, &mut rng_b, &store_b, 800, autopilot);

    assert_eq!(events_a, events_b);
    assert_eq!(a.pipes, b.pipes);
    assert_eq!(a.score, b.score);
}

// =============================================================================
// High score lifecycle
// =============================================================================

#[test]
fn test_crash_saves_best_then_restart_keeps_it() {
    let store = MemoryScoreStore::with_value(1);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut game = FlappyGame::new(store.load());
    assert_eq!(game.high_score, 1);
    process_tick(&mut game, CONFIRM, &mut rng, &store);

    // Fly until two pipes are behind us, then let go
    let mut ticks = 0;
    while game.score < 2 && ticks < 2000 {
        let input = autopilot(&game);
        process_tick(&mut game, input, &mut rng, &store);
        ticks += 1;
    }
    assert_eq!(game.score, 2);

    let mut events = Vec::new();
    while game.phase == Phase::Playing {
        events.extend(process_tick(&mut game, IDLE, &mut rng, &store));
    }
    assert!(events.contains(&TickEvent::NewBest { best: game.score }));
    assert_eq!(store.saved(), vec![game.score]);
    assert_eq!(store.load(), game.score);

    let final_score = game.score;
    let events = run_ticks(&mut game, &mut rng, &store, 1, |_| CONFIRM);
    assert_eq!(events, vec![TickEvent::Restarted]);
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.score, 0);
    assert!(game.pipes.is_empty());
    assert_eq!(game.bird_y, BIRD_START_Y);
    assert_eq!(game.high_score, final_score);
    // Restart doesn't write again
    assert_eq!(store.saved().len(), 1);
}

#[test]
fn test_best_score_survives_process_restart() {
    let dir = temp_dir("restart");
    let path = dir.join("highscore.txt");

    {
        let store = FileScoreStore::with_path(&path);
        assert_eq!(store.load(), 0);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = FlappyGame::new(store.load());
        game.phase = Phase::Playing;
        game.score = 42;
        game.bird_y = SCREEN_HEIGHT;
        process_tick(&mut game, IDLE, &mut rng, &store);
        assert_eq!(game.phase, Phase::Over);
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "42");

    let store = FileScoreStore::with_path(&path);
    let game = FlappyGame::new(store.load());
    assert_eq!(game.high_score, 42);
    assert_eq!(game.phase, Phase::Start);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_failed_save_does_not_stop_play() {
    let store = MemoryScoreStore::failing();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut game = FlappyGame::new(0);
    game.phase = Phase::Playing;
    game.score = 9;
    game.bird_y = SCREEN_HEIGHT;

    let events = process_tick(&mut game, IDLE, &mut rng, &store);
    assert!(events.contains(&TickEvent::SaveFailed));
    assert_eq!(game.high_score, 9);

    process_tick(&mut game, CONFIRM, &mut rng, &store);
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.high_score, 9);
}
