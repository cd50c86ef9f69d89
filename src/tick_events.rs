//! Logs [`TickEvent`]s.
//!
//! This is a binary-only module (not part of `lib.rs`) because it only feeds
//! the log file written by the game binary.

use flappy::game::{FlappyGame, TickEvent};

pub fn log_tick_events(game: &FlappyGame, events: &[TickEvent]) {
    for event in events {
        match event {
            TickEvent::Started => log::info!("Run started (best {})", game.high_score),
            TickEvent::Flapped => log::trace!("Flap at y={:.1}", game.bird_y),
            TickEvent::Scored { score } => log::debug!("Scored, now {}", score),
            TickEvent::Crashed { cause } => {
                log::info!(
                    "Crashed into {:?} at tick {} with score {}",
                    cause,
                    game.tick_count,
                    game.score
                )
            }
            TickEvent::NewBest { best } => log::info!("New high score: {}", best),
            TickEvent::SaveFailed => log::warn!("High score kept in memory only"),
            TickEvent::Restarted => log::info!("Run restarted"),
        }
    }
}
