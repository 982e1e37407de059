//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;

use filmvault::auth::JwtKeys;
use filmvault::config::Config;
use filmvault::db::{self, AccountStore, MemoryStore, MovieStore, PgStore};
use filmvault::{create_app, AppState};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (accounts, movies): (Arc<dyn AccountStore>, Arc<dyn MovieStore>) =
        match &config.database_url {
            Some(url) => {
                let store = Arc::new(PgStore::new(db::create_pool(url).await?));
                (store.clone() as Arc<dyn AccountStore>, store as Arc<dyn MovieStore>)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store");
                let store = Arc::new(MemoryStore::new());
                (store.clone() as Arc<dyn AccountStore>, store as Arc<dyn MovieStore>)
            }
        };

    let state = AppState::new(accounts, movies, JwtKeys::new(&config.jwt_secret))
        .with_ownership_check(config.enforce_ownership);

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(
        addr = %config.server_addr,
        enforce_ownership = config.enforce_ownership,
        "listening"
    );
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
