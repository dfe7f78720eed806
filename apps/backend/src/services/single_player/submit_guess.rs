use sea_orm::DatabaseTransaction;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{RoundView, SinglePlayerService, SubmitGuessInput, SubmitGuessOutput};
use crate::db::txn::with_txn;
use crate::domain::score_from_distance;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::repos::{games, locations, rounds};
use crate::state::app_state::AppState;

impl SinglePlayerService {
    /// Score a guess for the current round and move the game forward.
    ///
    /// Locks the game row, then the round, then the next round. A second
    /// guess for the same round waits for the first to commit and then fails
    /// the round status check.
    pub async fn submit_guess(
        &self,
        cancel: Option<&CancellationToken>,
        state: &AppState,
        input: SubmitGuessInput,
    ) -> Result<SubmitGuessOutput, AppError> {
        input.guess.validate()?;

        let game_id = input.game_id;
        let round_id = input.round_id;
        let output = with_txn(cancel, state, move |txn| {
            Box::pin(Self::submit_guess_in_txn(txn, input))
        })
        .await?;

        info!(
            game_id = %game_id,
            round_id = %round_id,
            score = output.score,
            total_score = output.total_score,
            game_ended = output.game_ended,
            "guess submitted"
        );
        Ok(output)
    }

    async fn submit_guess_in_txn(
        txn: &DatabaseTransaction,
        input: SubmitGuessInput,
    ) -> Result<SubmitGuessOutput, AppError> {
        let mut game = games::find_by_id_and_player_locked(txn, input.game_id, input.player_id)
            .await
            .map_err(AppError::stage("failed to find game"))?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "game not found"))?;
        if !game.is_in_progress() {
            return Err(DomainError::validation(
                ValidationKind::GameNotInProgress,
                "game is not in progress",
            )
            .into());
        }

        let mut round = rounds::find_by_id_and_game_locked(txn, input.round_id, game.id)
            .await
            .map_err(AppError::stage("failed to find round"))?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Round, "round not found"))?;
        if !round.is_in_progress() {
            return Err(DomainError::validation(
                ValidationKind::RoundNotInProgress,
                "round is not in progress",
            )
            .into());
        }

        let location = locations::find_by_id(txn, round.location_id)
            .await
            .map_err(AppError::stage("failed to find location"))?;
        let (distance, score) = match &location {
            Some(location) => {
                let distance = input.guess.distance_to(&location.coordinates());
                (distance, score_from_distance(distance))
            }
            None => {
                warn!(round_id = %round.id, location_id = %round.location_id, "round location missing; scoring zero");
                (0.0, 0)
            }
        };
        debug!(round_id = %round.id, distance, score, "guess scored");

        round.apply_guess(input.guess.latitude, input.guess.longitude, distance, score);
        round.finish()?;
        rounds::update(txn, &round)
            .await
            .map_err(AppError::stage("failed to update round"))?;

        game.add_score(i64::from(score));

        let mut next_round = None;
        let game_ended = if game.has_next_round() {
            let mut next = rounds::find_by_game_and_number_locked(txn, game.id, game.current_round + 1)
                .await
                .map_err(AppError::stage("failed to find next round"))?
                .ok_or_else(|| {
                    DomainError::infra(InfraErrorKind::DataCorruption, "next round not found")
                })?;
            next.start()?;
            game.advance_round()?;
            rounds::update(txn, &next)
                .await
                .map_err(AppError::stage("failed to update next round"))?;

            let next_location = locations::find_by_id(txn, next.location_id)
                .await
                .map_err(AppError::stage("failed to find location"))?;
            next_round = Some(RoundView::build(&next, next_location.as_ref()));
            false
        } else {
            game.complete()?;
            true
        };

        games::update(txn, &game)
            .await
            .map_err(AppError::stage("failed to update game"))?;

        Ok(SubmitGuessOutput {
            score,
            total_score: game.score,
            distance_meters: distance,
            game_ended,
            next_round,
        })
    }
}
