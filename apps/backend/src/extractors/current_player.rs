use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;
use uuid::Uuid;

use super::auth_token::AuthToken;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// The authenticated player, read from a verified bearer JWT whose `sub` is
/// the player id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentPlayer {
    pub player_id: Uuid,
}

impl CurrentPlayer {
    fn extract(req: &HttpRequest) -> Result<Self, AppError> {
        let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
            AppError::internal(ErrorCode::Internal, "AppState not available")
        })?;

        let token = AuthToken::from_headers(req)?;
        let claims = verify_access_token(&token.token, &state.security)?;

        let player_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            debug!("jwt subject is not a player id");
            AppError::unauthorized_invalid_jwt()
        })?;

        Ok(CurrentPlayer { player_id })
    }
}

impl FromRequest for CurrentPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
