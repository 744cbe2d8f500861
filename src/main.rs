use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odds_board::articles::ArticleLibrary;
use odds_board::board::FeaturedSettings;
use odds_board::catalog::GameCatalog;
use odds_board::config::Config;
use odds_board::db::SqliteRecordStore;
use odds_board::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odds_board=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting odds-board");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded (zone {}, featured by {} x{})",
        config.default_time_zone.name(),
        config.featured_metric,
        config.featured_limit
    );

    // Initialize database
    let store = Arc::new(SqliteRecordStore::new(&config.database_url).await?);
    info!("Database initialized");

    let catalog = Arc::new(GameCatalog::new(
        store,
        config.odds_cache_ttl,
        config.schedule_cache_ttl,
    ));

    let state = AppState {
        catalog,
        articles: ArticleLibrary::new(&config.articles_dir),
        default_time_zone: config.default_time_zone,
        featured: FeaturedSettings {
            metric: config.featured_metric,
            limit: config.featured_limit,
        },
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, web::router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server failed")?;

    info!("Shutting down odds-board");
    Ok(())
}
