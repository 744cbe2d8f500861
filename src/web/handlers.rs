use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{AppError, NO_GAME_DATA};
use super::AppState;
use crate::articles::{Article, ArticlePage};
use crate::board::{build_detail, build_listing, game_previews, GameDetail, Listing};
use crate::matching::deduplicate;
use crate::models::{GameRecord, SortColumn, SortDirection};
use crate::navigation::{Direction, NavigationSequence, Tab};
use crate::odds::SortState;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub tab: Option<String>,
    pub tz: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub tz: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdjacentQuery {
    pub direction: Option<String>,
    /// Keyboard key, `ArrowLeft` or `ArrowRight`
    pub key: Option<String>,
    pub tz: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdjacentResponse {
    pub direction: Direction,
    pub id: Option<String>,
}

/// `GET /api/games`
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Listing>, AppError> {
    let tab = match query.tab.as_deref() {
        Some(tab) => tab.parse::<Tab>()?,
        None => Tab::default(),
    };
    let tz = state.time_zone(query.tz.as_deref())?;

    let odds = state.catalog.odds_results().await?;
    let arenas = state.catalog.arena_records().await?;

    Ok(Json(build_listing(
        tab,
        &odds,
        &arenas,
        Utc::now(),
        tz,
        state.featured,
    )))
}

/// `GET /api/games/:id`
pub async fn game_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<GameDetail>, AppError> {
    let sort = sort_state(query.sort.as_deref(), query.dir.as_deref())?;
    let tz = state.time_zone(query.tz.as_deref())?;

    let Some(matchup) = state.catalog.matchup_records(&id).await? else {
        debug!("No odds records for game {}", id);
        return Err(AppError::NotFound(NO_GAME_DATA.to_string()));
    };
    let odds = state.catalog.odds_results().await?;
    let arenas = state.catalog.arena_records().await?;

    build_detail(&id, &matchup, &odds, &arenas, Utc::now(), tz, sort)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NO_GAME_DATA.to_string()))
}

/// `GET /api/games/:id/adjacent`
pub async fn adjacent_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AdjacentQuery>,
) -> Result<Json<AdjacentResponse>, AppError> {
    let direction = match (query.direction.as_deref(), query.key.as_deref()) {
        (Some(direction), _) => direction.parse::<Direction>()?,
        (None, Some(key)) => Direction::from_key(key)
            .ok_or_else(|| AppError::BadRequest(format!("unbound key: {}", key)))?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "direction or key is required".to_string(),
            ))
        }
    };
    let tz = state.time_zone(query.tz.as_deref())?;

    let Some(matchup) = state.catalog.matchup_records(&id).await? else {
        return Ok(Json(AdjacentResponse {
            direction,
            id: None,
        }));
    };
    let anchor = matchup.first().map_or(id.as_str(), |r| r.id.as_str());

    let odds = state.catalog.odds_results().await?;
    let sequence = NavigationSequence::build(&game_previews(&odds), Utc::now(), tz);

    Ok(Json(AdjacentResponse {
        direction,
        id: sequence.adjacent(anchor, direction).map(str::to_string),
    }))
}

/// `GET /api/schedule`
pub async fn schedule(State(state): State<AppState>) -> Result<Json<Vec<GameRecord>>, AppError> {
    let games = state.catalog.games().await?;

    let mut games = deduplicate(&games);
    games.sort_by_key(|g| g.commence_time);

    Ok(Json(games))
}

/// `GET /api/articles`
pub async fn list_articles(State(state): State<AppState>) -> Json<&'static [Article]> {
    Json(state.articles.index())
}

/// `GET /api/articles/:slug`
pub async fn article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticlePage>, AppError> {
    state
        .articles
        .load(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Article not found: {}", slug)))
}

/// `POST /api/refresh`
pub async fn refresh(State(state): State<AppState>) -> StatusCode {
    state.catalog.refresh().await;
    info!("Caches refreshed on request");
    StatusCode::NO_CONTENT
}

/// Sort from `?sort=&dir=`. A column without a direction gets the column's
/// default, a direction without a column applies to the default column.
fn sort_state(column: Option<&str>, direction: Option<&str>) -> Result<SortState, AppError> {
    let column = match column {
        Some(column) => column.parse::<SortColumn>()?,
        None => SortState::default().column,
    };
    let direction = match direction {
        Some(direction) => direction.parse::<SortDirection>()?,
        None => column.default_direction(),
    };
    Ok(SortState::new(column, direction))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::response::IntoResponse;
    use chrono::{DateTime, Duration};

    use super::*;
    use crate::articles::ArticleLibrary;
    use crate::board::FeaturedSettings;
    use crate::catalog::GameCatalog;
    use crate::db::memory::MemoryRecordSource;
    use crate::models::{ArenaRecord, MatchupRecord};
    use crate::navigation::DEFAULT_TIME_ZONE;
    use crate::ranking::FeaturedMetric;

    fn record(id: &str, home: &str, start: DateTime<Utc>, book: &str, prob: f64) -> MatchupRecord {
        MatchupRecord {
            id: id.to_string(),
            home_team: home.to_string(),
            away_team: "Guests".to_string(),
            commence_time: start,
            bookmaker: book.to_string(),
            home_odds: -120.0,
            away_odds: 100.0,
            home_win_prob: prob,
            away_win_prob: 1.0 - prob,
            home_ev: 1.5,
            away_ev: -2.0,
            home_kelly: Some(0.02),
            away_kelly: None,
        }
    }

    fn state_with(source: MemoryRecordSource) -> AppState {
        AppState {
            catalog: Arc::new(GameCatalog::new(Arc::new(source), None, None)),
            articles: ArticleLibrary::new(concat!(env!("CARGO_MANIFEST_DIR"), "/content/articles")),
            default_time_zone: DEFAULT_TIME_ZONE,
            featured: FeaturedSettings {
                metric: FeaturedMetric::Kelly,
                limit: 4,
            },
        }
    }

    fn state() -> AppState {
        // Far enough ahead that every record stays in the upcoming window
        let start = Utc::now() + Duration::hours(30);
        let odds = vec![
            record("g1-dk", "Hosts", start, "DraftKings", 0.55),
            record("g1-fd", "Hosts", start, "FanDuel", 0.60),
            record("g2-dk", "Others", start + Duration::hours(5), "DraftKings", 0.40),
        ];
        let arenas = vec![ArenaRecord {
            home_team: "HOSTS".to_string(),
            away_team: "guests".to_string(),
            game_time: start + Duration::hours(3),
            arena: "Main Hall".to_string(),
        }];
        let mut source = MemoryRecordSource::new(odds, arenas);
        source.games = vec![
            GameRecord {
                id: "late".to_string(),
                home_team: "B".to_string(),
                away_team: "C".to_string(),
                commence_time: start + Duration::hours(2),
            },
            GameRecord {
                id: "early".to_string(),
                home_team: "A".to_string(),
                away_team: "C".to_string(),
                commence_time: start,
            },
            GameRecord {
                id: "early-copy".to_string(),
                home_team: "A".to_string(),
                away_team: "C".to_string(),
                commence_time: start,
            },
        ];
        state_with(source)
    }

    #[tokio::test]
    async fn test_upcoming_listing() {
        let query = ListingQuery {
            tab: Some("upcoming".to_string()),
            tz: Some("America/Chicago".to_string()),
        };
        let Json(listing) = list_games(State(state()), Query(query)).await.unwrap();

        assert_eq!(listing.tab, Tab::Upcoming);
        assert_eq!(listing.time_zone, "America/Chicago");
        let ids: Vec<&str> = listing.games.iter().map(|g| g.record.id.as_str()).collect();
        assert_eq!(ids, vec!["g1-dk", "g2-dk"]);
        assert_eq!(listing.games[0].arena, "Main Hall");
    }

    #[tokio::test]
    async fn test_listing_rejects_unknown_tab_and_zone() {
        let query = ListingQuery {
            tab: Some("Yesterday".to_string()),
            tz: None,
        };
        let err = list_games(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let query = ListingQuery {
            tab: None,
            tz: Some("Mars/Olympus_Mons".to_string()),
        };
        let err = list_games(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_detail_and_missing_game() {
        let query = DetailQuery {
            sort: Some("probability".to_string()),
            ..Default::default()
        };
        let Json(detail) = game_detail(State(state()), Path("g1-fd".to_string()), Query(query))
            .await
            .unwrap();

        assert_eq!(detail.sort.direction, SortDirection::Descending);
        assert_eq!(detail.odds.home[0].book, "FanDuel");
        assert_eq!(detail.best_team, "Hosts");
        assert_eq!(detail.navigation.next_id.as_deref(), Some("g2-dk"));

        let err = game_detail(
            State(state()),
            Path("nope".to_string()),
            Query(DetailQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), NO_GAME_DATA);
    }

    #[tokio::test]
    async fn test_detail_rejects_unknown_sort() {
        let query = DetailQuery {
            sort: Some("vig".to_string()),
            ..Default::default()
        };
        let err = game_detail(State(state()), Path("g1-dk".to_string()), Query(query))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_adjacent_by_direction_and_key() {
        let query = AdjacentQuery {
            direction: Some("next".to_string()),
            ..Default::default()
        };
        let Json(next) = adjacent_game(State(state()), Path("g2-dk".to_string()), Query(query))
            .await
            .unwrap();
        assert_eq!(next.id.as_deref(), Some("g1-dk"));

        let query = AdjacentQuery {
            key: Some("ArrowLeft".to_string()),
            ..Default::default()
        };
        let Json(prev) = adjacent_game(State(state()), Path("g1-fd".to_string()), Query(query))
            .await
            .unwrap();
        assert_eq!(prev.direction, Direction::Prev);
        assert_eq!(prev.id.as_deref(), Some("g2-dk"));

        let query = AdjacentQuery {
            direction: Some("prev".to_string()),
            ..Default::default()
        };
        let Json(missing) = adjacent_game(State(state()), Path("zzz".to_string()), Query(query))
            .await
            .unwrap();
        assert!(missing.id.is_none());
    }

    #[tokio::test]
    async fn test_adjacent_requires_direction() {
        let err = adjacent_game(
            State(state()),
            Path("g1-dk".to_string()),
            Query(AdjacentQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_schedule_is_deduplicated_and_sorted() {
        let Json(games) = schedule(State(state())).await.unwrap();
        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_articles() {
        let Json(index) = list_articles(State(state())).await;
        assert_eq!(index.len(), 3);

        let Json(page) = article(State(state()), Path("moneyline-bets".to_string()))
            .await
            .unwrap();
        assert_eq!(page.article.title, "Moneyline Bets");

        let err = article(State(state()), Path("teasers".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let state = state_with(MemoryRecordSource::failing());
        let err = list_games(State(state), Query(ListingQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_refresh_reloads_store() {
        let state = state();
        schedule(State(state.clone())).await.unwrap();
        assert_eq!(refresh(State(state.clone())).await, StatusCode::NO_CONTENT);
        schedule(State(state)).await.unwrap();
    }

    #[test]
    fn test_sort_state_from_query() {
        let sort = sort_state(Some("book"), None).unwrap();
        assert_eq!(sort, SortState::new(SortColumn::Book, SortDirection::Ascending));

        let sort = sort_state(None, Some("asc")).unwrap();
        assert_eq!(sort, SortState::new(SortColumn::Edge, SortDirection::Ascending));

        assert_eq!(sort_state(None, None).unwrap(), SortState::default());
        assert!(sort_state(None, Some("sideways")).is_err());
    }
}
