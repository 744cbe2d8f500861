pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use crate::articles::ArticleLibrary;
use crate::board::FeaturedSettings;
use crate::catalog::GameCatalog;
use crate::navigation::{parse_time_zone, WindowParseError};

pub use error::AppError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<GameCatalog>,
    pub articles: ArticleLibrary,
    pub default_time_zone: Tz,
    pub featured: FeaturedSettings,
}

impl AppState {
    /// Zone requested by the client, or the configured default
    pub fn time_zone(&self, requested: Option<&str>) -> Result<Tz, WindowParseError> {
        match requested {
            Some(name) if !name.trim().is_empty() => parse_time_zone(name),
            _ => Ok(self.default_time_zone),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/games", get(handlers::list_games))
        .route("/api/games/:id", get(handlers::game_detail))
        .route("/api/games/:id/adjacent", get(handlers::adjacent_game))
        .route("/api/schedule", get(handlers::schedule))
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:slug", get(handlers::article))
        .route("/api/refresh", post(handlers::refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
