//! # Pinboard API Server
//!
//! Serves the bulletin board (page shell + JSON API) and the contact book
//! (form views) from one Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;
mod templates;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env())
        .context("failed to install the log subscriber")?;

    let config = AppConfig::from_env();

    tracing::info!(
        board = %config.prefixes.board,
        contacts = %config.prefixes.contacts,
        "Starting pinboard server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config)
        .await
        .context("failed to load templates")?;
    let prefixes = config.prefixes.clone();

    HttpServer::new(move || {
        let prefixes = prefixes.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(move |cfg| handlers::configure_routes(cfg, &prefixes))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server terminated with an error")
}
