use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::io;
use std::sync::Arc;

use minilog::auth::TokenService;
use minilog::config::Config;
use minilog::db::MemoryStore;
use minilog::handlers;
use minilog::seed;
use minilog::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .init();

    info!("Starting minilog backend...");
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store = Arc::new(MemoryStore::new());
    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_secs);
    let state = web::Data::new(AppState::new(store, tokens, config.bcrypt_cost));

    if config.seed_users > 0 {
        seed::seed(&state, config.seed_users, config.seed_articles)
            .await
            .map_err(|e| {
                error!("Seeding failed: {}", e);
                io::Error::other(e)
            })?;
    }

    info!(
        "Listening on {}:{} with {} workers",
        config.host, config.port, config.workers
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::routes)
    })
    .workers(config.workers)
    .bind(config.bind_address())?
    .run()
    .await
}
