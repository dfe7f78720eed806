//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::narrow;
use crate::adapters::games_sea::{self as games_adapter, GameCreate, GameUpdate, RoundCreate};
use crate::domain::{Game, GameMode, GameStatus};
use crate::entities::single_player_games as games;
use crate::errors::domain::DomainError;
use crate::repos::rounds::to_db_status as round_status_to_db;

impl From<games::GameStatus> for GameStatus {
    fn from(status: games::GameStatus) -> Self {
        match status {
            games::GameStatus::Pending => GameStatus::Pending,
            games::GameStatus::InProgress => GameStatus::InProgress,
            games::GameStatus::Completed => GameStatus::Completed,
        }
    }
}

impl From<GameStatus> for games::GameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Pending => games::GameStatus::Pending,
            GameStatus::InProgress => games::GameStatus::InProgress,
            GameStatus::Completed => games::GameStatus::Completed,
        }
    }
}

impl From<games::GameMode> for GameMode {
    fn from(mode: games::GameMode) -> Self {
        match mode {
            games::GameMode::Move => GameMode::Move,
            games::GameMode::NoMove => GameMode::NoMove,
            games::GameMode::Nmpz => GameMode::Nmpz,
        }
    }
}

impl From<GameMode> for games::GameMode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Move => games::GameMode::Move,
            GameMode::NoMove => games::GameMode::NoMove,
            GameMode::Nmpz => games::GameMode::Nmpz,
        }
    }
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    /// Loaded games carry no rounds.
    fn try_from(m: games::Model) -> Result<Self, Self::Error> {
        Ok(Game {
            id: m.id,
            player_id: m.player_id,
            map_id: m.map_id,
            mode: m.mode.into(),
            status: m.status.into(),
            current_round: narrow(m.current_round, "current_round")?,
            total_rounds: narrow(m.total_rounds, "total_rounds")?,
            round_seconds: narrow(m.round_seconds, "round_seconds")?,
            score: narrow(m.score, "score")?,
            started_at: m.started_at,
            ended_at: m.ended_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
            rounds: Vec::new(),
        })
    }
}

fn load(model: Option<games::Model>) -> Result<Option<Game>, DomainError> {
    model.map(Game::try_from).transpose()
}

/// Insert the game row and every round it currently owns.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<(), DomainError> {
    let dto = GameCreate {
        id: game.id,
        player_id: game.player_id,
        map_id: game.map_id,
        mode: game.mode.into(),
        status: game.status.into(),
        score: narrow(game.score, "score")?,
        current_round: i16::from(game.current_round),
        total_rounds: i16::from(game.total_rounds),
        round_seconds: i32::from(game.round_seconds),
        started_at: game.started_at,
        ended_at: game.ended_at,
        created_at: game.created_at,
        updated_at: game.updated_at,
    };
    let rounds = game
        .rounds
        .iter()
        .map(|r| RoundCreate {
            id: r.id,
            game_id: r.game_id,
            location_id: r.location_id,
            round_number: i16::from(r.round_number),
            status: round_status_to_db(r.status),
            round_seconds: i32::from(r.round_seconds),
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .collect();

    games_adapter::create_game_with_rounds(conn, dto, rounds).await?;
    Ok(())
}

/// Persist status, score, round counter and timestamps. Rounds are saved separately.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<(), DomainError> {
    let dto = GameUpdate {
        id: game.id,
        status: game.status.into(),
        score: narrow(game.score, "score")?,
        current_round: i16::from(game.current_round),
        started_at: game.started_at,
        ended_at: game.ended_at,
        updated_at: game.updated_at,
    };
    games_adapter::update_game(conn, dto).await?;
    Ok(())
}

pub async fn find_active_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    load(games_adapter::find_active_by_player(conn, player_id).await?)
}

/// Non-locking read for views.
pub async fn find_by_id_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    player_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    load(games_adapter::find_by_id_and_player(conn, game_id, player_id).await?)
}

/// Locks the game row until the transaction ends.
pub async fn find_by_id_and_player_locked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    player_id: Uuid,
) -> Result<Option<Game>, DomainError> {
    load(games_adapter::find_by_id_and_player_for_update(conn, game_id, player_id).await?)
}
