//! Single-player use cases: create a game, submit guesses, read a game.
//!
//! Each public method validates its input, then runs as one unit of work in
//! `with_txn`. Step functions take `&DatabaseTransaction` and never commit.

mod create_game;
mod get_game;
mod submit_guess;
pub mod views;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Coordinates, GameMode};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
pub use views::{GameView, PanoramaView, RoundView};

pub const MIN_ROUND_SECONDS: u16 = 10;
pub const MAX_ROUND_SECONDS: u16 = 300;

#[derive(Debug, Clone)]
pub struct CreateGameInput {
    pub player_id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    pub round_seconds: u16,
}

#[derive(Debug, Clone)]
pub struct CreateGameOutput {
    pub id: Uuid,
    pub player_id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    pub created_at: OffsetDateTime,
    pub first_round: RoundView,
}

#[derive(Debug, Clone)]
pub struct SubmitGuessInput {
    pub game_id: Uuid,
    pub round_id: Uuid,
    pub player_id: Uuid,
    pub guess: Coordinates,
}

#[derive(Debug, Clone)]
pub struct SubmitGuessOutput {
    pub score: u32,
    pub total_score: u32,
    pub distance_meters: f64,
    pub game_ended: bool,
    pub next_round: Option<RoundView>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SinglePlayerService;

impl SinglePlayerService {
    pub fn new() -> Self {
        Self
    }
}

/// Range-check a round duration in seconds.
pub fn round_seconds_from(raw: i64) -> Result<u16, AppError> {
    u16::try_from(raw)
        .ok()
        .filter(|secs| (MIN_ROUND_SECONDS..=MAX_ROUND_SECONDS).contains(secs))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRoundDuration,
                format!(
                    "invalid round duration: {raw}s (must be between {MIN_ROUND_SECONDS} and {MAX_ROUND_SECONDS})"
                ),
            )
            .into()
        })
}
