//! Round repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::narrow;
use crate::adapters::rounds_sea::{self as rounds_adapter, RoundUpdate};
use crate::domain::{Round, RoundStatus};
use crate::entities::single_player_rounds as rounds;
use crate::errors::domain::DomainError;

pub(crate) fn to_db_status(status: RoundStatus) -> rounds::RoundStatus {
    match status {
        RoundStatus::Pending => rounds::RoundStatus::Pending,
        RoundStatus::InProgress => rounds::RoundStatus::InProgress,
        RoundStatus::Completed => rounds::RoundStatus::Completed,
    }
}

impl From<rounds::RoundStatus> for RoundStatus {
    fn from(status: rounds::RoundStatus) -> Self {
        match status {
            rounds::RoundStatus::Pending => RoundStatus::Pending,
            rounds::RoundStatus::InProgress => RoundStatus::InProgress,
            rounds::RoundStatus::Completed => RoundStatus::Completed,
        }
    }
}

impl TryFrom<rounds::Model> for Round {
    type Error = DomainError;

    fn try_from(m: rounds::Model) -> Result<Self, Self::Error> {
        Ok(Round {
            id: m.id,
            game_id: m.game_id,
            location_id: m.location_id,
            round_number: narrow(m.round_number, "round_number")?,
            status: m.status.into(),
            guess_latitude: m.guess_latitude,
            guess_longitude: m.guess_longitude,
            distance_meters: m.distance_meters,
            score: narrow(m.score, "score")?,
            round_seconds: narrow(m.round_seconds, "round_seconds")?,
            started_at: m.started_at,
            ended_at: m.ended_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

fn load(model: Option<rounds::Model>) -> Result<Option<Round>, DomainError> {
    model.map(Round::try_from).transpose()
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &Round,
) -> Result<(), DomainError> {
    let dto = RoundUpdate {
        id: round.id,
        status: to_db_status(round.status),
        guess_latitude: round.guess_latitude,
        guess_longitude: round.guess_longitude,
        distance_meters: round.distance_meters,
        score: narrow(round.score, "score")?,
        started_at: round.started_at,
        ended_at: round.ended_at,
        updated_at: round.updated_at,
    };
    rounds_adapter::update_round(conn, dto).await?;
    Ok(())
}

/// Locks the round row until the transaction ends.
pub async fn find_by_id_and_game_locked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: Uuid,
    game_id: Uuid,
) -> Result<Option<Round>, DomainError> {
    load(rounds_adapter::find_by_id_and_game_for_update(conn, round_id, game_id).await?)
}

pub async fn find_by_game_and_number_locked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
    round_number: u8,
) -> Result<Option<Round>, DomainError> {
    load(
        rounds_adapter::find_by_game_and_number_for_update(conn, game_id, i16::from(round_number))
            .await?,
    )
}

pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: Uuid,
) -> Result<Vec<Round>, DomainError> {
    rounds_adapter::find_all_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(Round::try_from)
        .collect()
}
