use anyhow::{Context, Result};
use folio_core::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        storage::FileStore,
        time::Clock,
    },
    services::ApplicationServices,
};
use folio_core::config::AppConfig;
use folio_core::domain::{portfolio::PortfolioRepository, user::UserRepository};
use folio_core::infrastructure::{
    database,
    repositories::{PostgresPortfolioRepository, PostgresUserRepository},
    security::{password::Argon2PasswordHasher, token::JwtTokenManager},
    storage::LocalFileStore,
    time::SystemClock,
};
use folio_core::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url())
        .await
        .context("failed to connect to the database")?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let portfolio_repo: Arc<dyn PortfolioRepository> =
        Arc::new(PostgresPortfolioRepository::new(pool.clone()));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_ttl = chrono::Duration::from_std(config.token_ttl())
        .context("TOKEN_TTL_SECONDS is out of range")?;
    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(
        config.token_secret(),
        config.token_algorithm(),
        token_ttl,
    )?);
    let file_store: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(
        config.upload_dir().clone(),
        config.max_upload_bytes(),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&user_repo),
        Arc::clone(&portfolio_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&token_manager),
        Arc::clone(&file_store),
        Arc::clone(&clock),
    ));

    let state = HttpState {
        services,
        settings: HttpSettings {
            max_upload_bytes: config.max_upload_bytes(),
            allowed_origins: config.allowed_origins().to_vec(),
            public_api_urls: config.public_api_urls().to_vec(),
        },
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        upload_dir = %config.upload_dir().display(),
        "listening on {address}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
