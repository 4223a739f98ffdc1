//! Backend entry-point: loads settings, connects the profile store, and serves
//! the REST endpoints and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::MongoStore;
use backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    let store = if settings.in_memory {
        warn!("serving profiles from memory; data is lost on exit");
        None
    } else {
        let store = MongoStore::connect(&settings.mongo_config())
            .await
            .map_err(std::io::Error::other)?;
        store.ping().await.map_err(std::io::Error::other)?;
        info!(database = settings.database(), "connected to MongoDB");
        config = config.with_store(store.clone());
        Some(store)
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    info!(addr = %config.bind_addr(), "listening");
    drop(config);

    let outcome = server.await;
    health_state.mark_unhealthy();
    if let Some(store) = store {
        store.shutdown().await;
    }
    outcome
}
