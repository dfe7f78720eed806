use std::str::FromStr;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Coordinates, GameMode};
use crate::error::AppError;
use crate::extractors::{CurrentPlayer, ValidatedJson};
use crate::services::single_player::{
    round_seconds_from, CreateGameInput, CreateGameOutput, RoundView, SinglePlayerService,
    SubmitGuessInput, SubmitGuessOutput,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub map_id: Uuid,
    pub mode: String,
    pub round_seconds_duration: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub id: Uuid,
    pub player_id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub first_round: RoundView,
}

impl From<CreateGameOutput> for CreateGameResponse {
    fn from(out: CreateGameOutput) -> Self {
        Self {
            id: out.id,
            player_id: out.player_id,
            map_id: out.map_id,
            mode: out.mode,
            created_at: out.created_at,
            first_round: out.first_round,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitGuessRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct SubmitGuessResponse {
    pub score: u32,
    pub total_score: u32,
    pub distance_meters: f64,
    pub game_ended: bool,
    pub next_round: Option<RoundView>,
}

impl From<SubmitGuessOutput> for SubmitGuessResponse {
    fn from(out: SubmitGuessOutput) -> Self {
        Self {
            score: out.score,
            total_score: out.total_score,
            distance_meters: out.distance_meters,
            game_ended: out.game_ended,
            next_round: out.next_round,
        }
    }
}

async fn create_game(
    player: CurrentPlayer,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = CreateGameInput {
        player_id: player.player_id,
        map_id: body.map_id,
        mode: GameMode::from_str(&body.mode)?,
        round_seconds: round_seconds_from(body.round_seconds_duration)?,
    };

    let output = SinglePlayerService::new()
        .create_game(Some(&app_state.shutdown), &app_state, input)
        .await?;

    Ok(HttpResponse::Created().json(CreateGameResponse::from(output)))
}

async fn get_game(
    player: CurrentPlayer,
    path: web::Path<Uuid>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();

    let view = SinglePlayerService::new()
        .get_game(Some(&app_state.shutdown), &app_state, player.player_id, game_id)
        .await?;

    Ok(HttpResponse::Ok().json(view))
}

async fn submit_guess(
    player: CurrentPlayer,
    path: web::Path<(Uuid, Uuid)>,
    body: ValidatedJson<SubmitGuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (game_id, round_id) = path.into_inner();
    let input = SubmitGuessInput {
        game_id,
        round_id,
        player_id: player.player_id,
        guess: Coordinates::new(body.latitude, body.longitude),
    };

    let output = SinglePlayerService::new()
        .submit_guess(Some(&app_state.shutdown), &app_state, input)
        .await?;

    Ok(HttpResponse::Ok().json(SubmitGuessResponse::from(output)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/games", web::post().to(create_game))
        .route("/games/{game_id}", web::get().to(get_game))
        .route(
            "/games/{game_id}/rounds/{round_id}/guess",
            web::post().to(submit_guess),
        );
}
