use sea_orm::DatabaseTransaction;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{GameView, RoundView, SinglePlayerService};
use crate::db::txn::with_txn;
use crate::domain::RoundStatus;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{games, locations, rounds};
use crate::state::app_state::AppState;

impl SinglePlayerService {
    /// Read a game and its rounds. Games owned by other players are not found.
    pub async fn get_game(
        &self,
        cancel: Option<&CancellationToken>,
        state: &AppState,
        player_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameView, AppError> {
        with_txn(cancel, state, move |txn| {
            Box::pin(Self::get_game_in_txn(txn, player_id, game_id))
        })
        .await
    }

    async fn get_game_in_txn(
        txn: &DatabaseTransaction,
        player_id: Uuid,
        game_id: Uuid,
    ) -> Result<GameView, AppError> {
        let game = games::find_by_id_and_player(txn, game_id, player_id)
            .await
            .map_err(AppError::stage("failed to find game"))?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "game not found"))?;

        let game_rounds = rounds::find_all_by_game(txn, game.id)
            .await
            .map_err(AppError::stage("failed to find rounds"))?;

        let mut views = Vec::with_capacity(game_rounds.len());
        for round in &game_rounds {
            let location = if round.status == RoundStatus::Pending {
                None
            } else {
                locations::find_by_id(txn, round.location_id)
                    .await
                    .map_err(AppError::stage("failed to find location"))?
            };
            views.push(RoundView::build(round, location.as_ref()));
        }

        Ok(GameView::build(&game, views))
    }
}
