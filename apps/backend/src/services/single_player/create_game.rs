use sea_orm::DatabaseTransaction;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{
    round_seconds_from, CreateGameInput, CreateGameOutput, RoundView, SinglePlayerService,
};
use crate::db::txn::with_txn;
use crate::domain::{Game, TOTAL_ROUNDS};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{games, locations, rounds};
use crate::state::app_state::AppState;

impl SinglePlayerService {
    /// Create a game for the player, draw its rounds and start the first one.
    ///
    /// Fails with a conflict if the player already has a pending or
    /// in-progress game.
    pub async fn create_game(
        &self,
        cancel: Option<&CancellationToken>,
        state: &AppState,
        input: CreateGameInput,
    ) -> Result<CreateGameOutput, AppError> {
        round_seconds_from(i64::from(input.round_seconds))?;

        let output = with_txn(cancel, state, move |txn| {
            Box::pin(Self::create_game_in_txn(txn, input))
        })
        .await?;

        info!(
            game_id = %output.id,
            map_id = %output.map_id,
            mode = %output.mode,
            "single-player game created"
        );
        Ok(output)
    }

    async fn create_game_in_txn(
        txn: &DatabaseTransaction,
        input: CreateGameInput,
    ) -> Result<CreateGameOutput, AppError> {
        let active = games::find_active_by_player(txn, input.player_id)
            .await
            .map_err(AppError::stage("failed to find user in game"))?;
        if let Some(active) = active {
            debug!(game_id = %active.id, status = ?active.status, "player already has an active game");
            return Err(
                DomainError::conflict(ConflictKind::ActiveGame, "user already in a game").into(),
            );
        }

        let sampled = locations::sample_by_map(txn, input.map_id, TOTAL_ROUNDS)
            .await
            .map_err(AppError::stage("failed to find random locations"))?;
        if sampled.is_empty() {
            return Err(DomainError::not_found(NotFoundKind::Map, "map has no locations").into());
        }
        debug!(map_id = %input.map_id, count = sampled.len(), "sampled locations");

        let mut game = Game::new(input.player_id, input.map_id, input.mode, input.round_seconds);
        game.add_rounds_from_locations(&sampled);

        games::create(txn, &game)
            .await
            .map_err(AppError::stage("failed to create game"))?;

        game.start()?;
        let first_round = game.start_next_round()?.clone();

        games::update(txn, &game)
            .await
            .map_err(AppError::stage("failed to update game"))?;
        rounds::update(txn, &first_round)
            .await
            .map_err(AppError::stage("failed to update round"))?;

        let location = sampled.iter().find(|l| l.id == first_round.location_id);

        Ok(CreateGameOutput {
            id: game.id,
            player_id: game.player_id,
            map_id: game.map_id,
            mode: game.mode,
            created_at: game.created_at,
            first_round: RoundView::build(&first_round, location),
        })
    }
}
