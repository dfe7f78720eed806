//! SeaORM adapter for single-player games - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::entities::{single_player_games as games, single_player_rounds as rounds};

pub mod dto;

pub use dto::{GameCreate, GameUpdate, RoundCreate};

/// Insert a game and its rounds. Both must already carry their ids.
pub async fn create_game_with_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: GameCreate,
    game_rounds: Vec<RoundCreate>,
) -> Result<(), DbErr> {
    let game_active = games::ActiveModel {
        id: Set(game.id),
        player_id: Set(game.player_id),
        map_id: Set(game.map_id),
        mode: Set(game.mode),
        status: Set(game.status),
        score: Set(game.score),
        current_round: Set(game.current_round),
        total_rounds: Set(game.total_rounds),
        round_seconds: Set(game.round_seconds),
        started_at: Set(game.started_at),
        ended_at: Set(game.ended_at),
        created_at: Set(game.created_at),
        updated_at: Set(game.updated_at),
    };
    games::Entity::insert(game_active)
        .exec_without_returning(conn)
        .await?;

    if game_rounds.is_empty() {
        return Ok(());
    }

    let round_actives = game_rounds.into_iter().map(|r| rounds::ActiveModel {
        id: Set(r.id),
        game_id: Set(r.game_id),
        location_id: Set(r.location_id),
        round_number: Set(r.round_number),
        status: Set(r.status),
        guess_latitude: Set(None),
        guess_longitude: Set(None),
        distance_meters: Set(0.0),
        score: Set(0),
        round_seconds: Set(r.round_seconds),
        started_at: Set(None),
        ended_at: Set(None),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    });
    rounds::Entity::insert_many(round_actives)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// The player's pending or in-progress game, if any.
pub async fn find_active_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: uuid::Uuid,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find()
        .filter(games::Column::PlayerId.eq(player_id))
        .filter(
            games::Column::Status.is_in([games::GameStatus::Pending, games::GameStatus::InProgress]),
        )
        .one(conn)
        .await
}

pub async fn find_by_id_and_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: uuid::Uuid,
    player_id: uuid::Uuid,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find_by_id(game_id)
        .filter(games::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// Same as [`find_by_id_and_player`] but takes a row lock (`FOR UPDATE`) held
/// until the surrounding transaction ends.
pub async fn find_by_id_and_player_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: uuid::Uuid,
    player_id: uuid::Uuid,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find_by_id(game_id)
        .filter(games::Column::PlayerId.eq(player_id))
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<(), DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(dto.status))
        .col_expr(games::Column::Score, Expr::value(dto.score))
        .col_expr(games::Column::CurrentRound, Expr::value(dto.current_round))
        .col_expr(games::Column::StartedAt, Expr::value(dto.started_at))
        .col_expr(games::Column::EndedAt, Expr::value(dto.ended_at))
        .col_expr(games::Column::UpdatedAt, Expr::value(dto.updated_at))
        .filter(games::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("single_player_games {}", dto.id)));
    }
    Ok(())
}
