//! DTOs for games_sea adapter.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::single_player_games::{GameMode, GameStatus};
use crate::entities::single_player_rounds::RoundStatus;

/// Full row for a new game; ids and timestamps are assigned by the caller.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: Uuid,
    pub player_id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    pub status: GameStatus,
    pub score: i32,
    pub current_round: i16,
    pub total_rounds: i16,
    pub round_seconds: i32,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Full row for a new round, inserted alongside its game.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub id: Uuid,
    pub game_id: Uuid,
    pub location_id: Uuid,
    pub round_number: i16,
    pub status: RoundStatus,
    pub round_seconds: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Mutable game columns. Everything else is fixed at creation.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: Uuid,
    pub status: GameStatus,
    pub score: i32,
    pub current_round: i16,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
}
