use actix_web::{web, App, HttpServer};
use guessr_backend::config::app::AppConfig;
use guessr_backend::infra::state::build_state;
use guessr_backend::middleware::{RequestTrace, TraceSpan};
use guessr_backend::routes;
use guessr_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(config.db_profile)
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .with_txn_timeout(config.txn_timeout)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };
    info!(
        host = %config.host,
        port = config.port,
        txn_timeout_ms = config.txn_timeout.as_millis() as u64,
        "database connected; starting server"
    );

    let shutdown = app_state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received; cancelling in-flight work");
            shutdown.cancel();
        }
    });

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
