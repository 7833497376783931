//! Entry point: load config, wire dependencies, and run the server.

use accounts::auth::JwtKeys;
use accounts::config::{Config, StoreKind};
use accounts::db::{self, PgUserRepository, UserRepository};
use accounts::repositories::MemoryUserRepository;
use accounts::{create_app, AccountService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let repo: Arc<dyn UserRepository> = match config.store {
        StoreKind::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgUserRepository::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory user store; accounts are lost on exit");
            Arc::new(MemoryUserRepository::new())
        }
    };

    let jwt_keys = JwtKeys::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let accounts = AccountService::new(repo, jwt_keys.clone(), config.request_timeout);
    let state = AppState {
        accounts,
        jwt_keys,
        cookie_secure: config.cookie_secure,
    };

    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, store = ?config.store, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
