//! Game logic for Flappy Bird: phase transitions, physics, pipes and scoring.

use super::types::{FlappyGame, Phase, Pipe};
use crate::constants::*;
use crate::high_score::ScoreStore;
use rand::Rng;

/// Key edges latched since the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Enter: starts and restarts a run.
    pub confirm: bool,
    /// Space: flap while playing.
    pub jump: bool,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Floor,
    Pipe,
}

/// Things that happened during one tick, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed { cause: CrashCause },
    NewBest { best: u32 },
    /// The new best could not be written. In-memory state is unaffected.
    SaveFailed,
    Restarted,
}

/// Process one game tick.
///
/// The tick counter advances in every phase. While playing, the floor check
/// does not stop the rest of the tick: pipes still move, score and collide
/// before the phase change takes effect on the next call.
pub fn process_tick<R: Rng>(
    game: &mut FlappyGame,
    input: TickInput,
    rng: &mut R,
    store: &dyn ScoreStore,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    game.tick_count += 1;

    match game.phase {
        Phase::Start => {
            if input.confirm {
                game.phase = Phase::Playing;
                events.push(TickEvent::Started);
            }
        }
        Phase::Playing => play_tick(game, input, rng, store, &mut events),
        Phase::Over => {
            if input.confirm {
                restart(game);
                events.push(TickEvent::Restarted);
            }
        }
    }

    events
}

fn play_tick<R: Rng>(
    game: &mut FlappyGame,
    input: TickInput,
    rng: &mut R,
    store: &dyn ScoreStore,
    events: &mut Vec<TickEvent>,
) {
    game.bird_velocity += GRAVITY;
    game.bird_y += game.bird_velocity;

    // Flap replaces velocity, it doesn't add to it
    if input.jump {
        game.bird_velocity = JUMP_VELOCITY;
        events.push(TickEvent::Flapped);
    }

    if game.bird_y >= SCREEN_HEIGHT - BIRD_SIZE {
        end_run(game, CrashCause::Floor, events);
    }

    if game.bird_y < 0.0 {
        game.bird_y = 0.0;
        game.bird_velocity = 0.0;
    }

    if game.tick_count % PIPE_SPAWN_TICKS == 0 {
        spawn_pipe(game, rng);
    }

    advance_pipes(game, events);
    prune_pipes(game);

    if game.phase == Phase::Over {
        record_high_score(game, store, events);
    }
}

/// Append a pipe at the right edge with its gap at one of three heights.
pub fn spawn_pipe<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    let offset = PIPE_GAP_OFFSETS[rng.gen_range(0..PIPE_GAP_OFFSETS.len())];
    game.pipes
        .push(Pipe::new(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0 + offset));
}

/// Scroll every pipe, award points and check collisions. Every pipe is
/// processed even after a collision.
pub fn advance_pipes(game: &mut FlappyGame, events: &mut Vec<TickEvent>) {
    let bird = game.bird_rect();
    let mut crashed = false;

    for pipe in &mut game.pipes {
        pipe.x -= PIPE_SPEED;

        if !pipe.passed && pipe.right() < BIRD_X {
            pipe.passed = true;
            game.score += 1;
            events.push(TickEvent::Scored { score: game.score });
        }

        if bird.overlaps(&pipe.upper_rect()) || bird.overlaps(&pipe.lower_rect()) {
            crashed = true;
        }
    }

    if crashed {
        end_run(game, CrashCause::Pipe, events);
    }
}

/// Drop pipes whose right edge has gone past the left side of the screen.
pub fn prune_pipes(game: &mut FlappyGame) {
    game.pipes.retain(|p| p.right() >= 0.0);
}

fn end_run(game: &mut FlappyGame, cause: CrashCause, events: &mut Vec<TickEvent>) {
    if game.phase == Phase::Playing {
        game.phase = Phase::Over;
        events.push(TickEvent::Crashed { cause });
    }
}

/// Promote the run's score to the best score and persist it. A failed write
/// is logged and otherwise ignored.
fn record_high_score(game: &mut FlappyGame, store: &dyn ScoreStore, events: &mut Vec<TickEvent>) {
    if game.score <= game.high_score {
        return;
    }

    game.high_score = game.score;
    events.push(TickEvent::NewBest {
        best: game.high_score,
    });

    if let Err(e) = store.save(game.high_score) {
        log::error!("Error saving high score {}: {}", game.high_score, e);
        events.push(TickEvent::SaveFailed);
    }
}

/// Reset everything except the best score and go straight back to playing.
pub fn restart(game: &mut FlappyGame) {
    *game = FlappyGame::new(game.high_score);
    game.phase = Phase::Playing;
}
