use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::AppError;

/// Bearer token taken from the Authorization header, not yet verified.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    pub fn from_header_value(value: &str) -> Result<Self, AppError> {
        let mut parts = value.split_whitespace();
        let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AppError::unauthorized_missing_bearer());
        };
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AppError::unauthorized_missing_bearer());
        }

        Ok(AuthToken {
            token: token.to_string(),
        })
    }

    pub fn from_headers(req: &HttpRequest) -> Result<Self, AppError> {
        req.headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(AppError::unauthorized_missing_bearer)
            .and_then(|value| {
                value
                    .to_str()
                    .map_err(|_| AppError::unauthorized_missing_bearer())
            })
            .and_then(AuthToken::from_header_value)
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}
