//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use api::{ApiConfig, build_app, config::BootstrapUser};
use articles::{ArticleRepository, InMemoryArticleRepository, PgArticleRepository};
use auth::{
    AuthConfig, BootstrapUserUseCase, InMemoryAuthRepository, PgAuthRepository, TokenRepository,
    UserRepository,
};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,articles=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let app = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            prepare(
                PgAuthRepository::new(pool.clone()),
                PgArticleRepository::new(pool),
                &config,
            )
            .await?
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
            prepare(
                InMemoryAuthRepository::new(),
                InMemoryArticleRepository::new(),
                &config,
            )
            .await?
        }
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer());

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Startup housekeeping, then the composed router
async fn prepare<AR, RR>(auth_repo: AR, article_repo: RR, config: &ApiConfig) -> anyhow::Result<Router>
where
    AR: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    RR: ArticleRepository + Clone + Send + Sync + 'static,
{
    // Errors here should not prevent server startup
    match auth_repo.cleanup_expired().await {
        Ok(tokens) => {
            tracing::info!(tokens_deleted = tokens, "Auth token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth token cleanup failed, continuing anyway");
        }
    }

    if let Some(bootstrap) = &config.bootstrap_user {
        bootstrap_user(&auth_repo, &config.auth, bootstrap).await?;
    }

    Ok(build_app(auth_repo, article_repo, config.auth.clone()))
}

async fn bootstrap_user<AR>(
    auth_repo: &AR,
    auth_config: &AuthConfig,
    bootstrap: &BootstrapUser,
) -> anyhow::Result<()>
where
    AR: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = BootstrapUserUseCase::new(Arc::new(auth_repo.clone()), Arc::new(auth_config.clone()));
    match use_case
        .execute(&bootstrap.user_name, bootstrap.password.clone())
        .await
    {
        Ok(Some(user)) => {
            tracing::info!(user_id = %user.id, "Bootstrap user created");
        }
        Ok(None) => {
            tracing::debug!("Bootstrap user already exists");
        }
        Err(e) => {
            anyhow::bail!("Bootstrap user rejected: {e}");
        }
    }
    Ok(())
}
