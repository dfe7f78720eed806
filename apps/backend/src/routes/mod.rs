use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod single_player;

/// Register every route. `main.rs` and the route tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed ids in the path render as problem details, not actix's plain 404.
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "path extraction failed");
        AppError::bad_request(ErrorCode::BadRequest, "Invalid path parameter").into()
    }));

    cfg.configure(health::configure_routes);

    // Single-player routes: /api/single-player/**
    cfg.service(web::scope("/api/single-player").configure(single_player::configure_routes));
}
