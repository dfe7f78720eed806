//! SeaORM adapter for single-player rounds.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::single_player_rounds as rounds;

/// Mutable round columns.
#[derive(Debug, Clone)]
pub struct RoundUpdate {
    pub id: Uuid,
    pub status: rounds::RoundStatus,
    pub guess_latitude: Option<f64>,
    pub guess_longitude: Option<f64>,
    pub distance_meters: f64,
    pub score: i32,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
}

/// Locks the round row only; joined rows are read separately so no outer join
/// ever sits under `FOR UPDATE`.
pub async fn find_by_id_and_game_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    game_id: Uuid,
) -> Result<Option<rounds::Model>, DbErr> {
    rounds::Entity::find_by_id(round_id)
        .filter(rounds::Column::GameId.eq(game_id))
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn find_by_game_and_number_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    round_number: i16,
) -> Result<Option<rounds::Model>, DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::GameId.eq(game_id))
        .filter(rounds::Column::RoundNumber.eq(round_number))
        .lock_exclusive()
        .one(conn)
        .await
}

/// All rounds of a game ordered by round number.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<rounds::Model>, DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::GameId.eq(game_id))
        .order_by_asc(rounds::Column::RoundNumber)
        .all(conn)
        .await
}

pub async fn update_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundUpdate,
) -> Result<(), DbErr> {
    let result = rounds::Entity::update_many()
        .col_expr(rounds::Column::Status, Expr::value(dto.status))
        .col_expr(rounds::Column::GuessLatitude, Expr::value(dto.guess_latitude))
        .col_expr(rounds::Column::GuessLongitude, Expr::value(dto.guess_longitude))
        .col_expr(rounds::Column::DistanceMeters, Expr::value(dto.distance_meters))
        .col_expr(rounds::Column::Score, Expr::value(dto.score))
        .col_expr(rounds::Column::StartedAt, Expr::value(dto.started_at))
        .col_expr(rounds::Column::EndedAt, Expr::value(dto.ended_at))
        .col_expr(rounds::Column::UpdatedAt, Expr::value(dto.updated_at))
        .filter(rounds::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("single_player_rounds {}", dto.id)));
    }
    Ok(())
}
