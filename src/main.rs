use std::sync::Arc;

use config::{db, logger::initialize_logger, settings::Settings, startup::AppState};

use tracing::info;

mod app;
mod config;
mod controllers;
mod dtos;
mod error;
mod flows;
mod models;
mod repositories;
mod routes;
mod storage;
mod verifier;

#[cfg(test)]
mod tests;

use crate::storage::mongo::MongoStore;
use crate::verifier::remote::RemoteVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    initialize_logger();

    info!("🚀 Server starting initialization...");

    let settings = Settings::from_env()?;

    // Initialize Database
    let database = db::init_database(&settings).await?;
    let store = Arc::new(MongoStore::new(database));

    // Verification engine adapter
    let verifier = Arc::new(RemoteVerifier::new(&settings.verifier_url));

    // Initialize App State
    let app_state = AppState::new(store, verifier, &settings);

    let app = app::create_app(app_state);

    info!("🚀 Server started successfully at {}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
