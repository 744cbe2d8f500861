use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::cache::{Cache, TtlCache};
use crate::db::RecordSource;
use crate::models::{ArenaRecord, GameRecord, MatchupRecord};

pub type OddsSnapshot = Arc<Vec<MatchupRecord>>;
pub type ArenaSnapshot = Arc<Vec<ArenaRecord>>;
pub type GameSnapshot = Arc<Vec<GameRecord>>;

/// Cached view of the record store. Every page request reads through here.
pub struct GameCatalog {
    source: Arc<dyn RecordSource>,
    odds: Arc<dyn Cache<OddsSnapshot>>,
    arenas: Arc<dyn Cache<ArenaSnapshot>>,
    games: Arc<dyn Cache<GameSnapshot>>,
}

impl GameCatalog {
    /// Catalog with TTL caches: `odds_ttl` for odds records and
    /// `schedule_ttl` for arena and schedule records (`None` = no expiry)
    pub fn new(
        source: Arc<dyn RecordSource>,
        odds_ttl: Option<Duration>,
        schedule_ttl: Option<Duration>,
    ) -> Self {
        Self::with_caches(
            source,
            Arc::new(TtlCache::new("ev_results", odds_ttl)),
            Arc::new(TtlCache::new("upcoming_games", schedule_ttl)),
            Arc::new(TtlCache::new("games", schedule_ttl)),
        )
    }

    pub fn with_caches(
        source: Arc<dyn RecordSource>,
        odds: Arc<dyn Cache<OddsSnapshot>>,
        arenas: Arc<dyn Cache<ArenaSnapshot>>,
        games: Arc<dyn Cache<GameSnapshot>>,
    ) -> Self {
        Self {
            source,
            odds,
            arenas,
            games,
        }
    }

    pub async fn odds_results(&self) -> Result<OddsSnapshot> {
        self.odds
            .get_or_populate(Box::pin(async {
                let records = self.source.odds_results().await?;
                info!("Loaded {} odds records", records.len());
                Ok::<_, anyhow::Error>(Arc::new(records))
            }))
            .await
    }

    pub async fn arena_records(&self) -> Result<ArenaSnapshot> {
        self.arenas
            .get_or_populate(Box::pin(async {
                let records = self.source.arena_records().await?;
                info!("Loaded {} arena records", records.len());
                Ok::<_, anyhow::Error>(Arc::new(records))
            }))
            .await
    }

    pub async fn games(&self) -> Result<GameSnapshot> {
        self.games
            .get_or_populate(Box::pin(async {
                let records = self.source.games().await?;
                info!("Loaded {} schedule records", records.len());
                Ok::<_, anyhow::Error>(Arc::new(records))
            }))
            .await
    }

    /// Every bookmaker record of the game `id` belongs to, or `None` when the
    /// id is unknown
    pub async fn matchup_records(&self, id: &str) -> Result<Option<Vec<MatchupRecord>>> {
        let odds = self.odds_results().await?;

        let Some(base) = odds.iter().find(|r| r.id == id) else {
            return Ok(None);
        };

        Ok(Some(
            odds.iter()
                .filter(|r| {
                    r.home_team == base.home_team
                        && r.away_team == base.away_team
                        && r.commence_time == base.commence_time
                })
                .cloned()
                .collect(),
        ))
    }

    /// Drop every cached collection
    pub async fn refresh(&self) {
        self.odds.invalidate().await;
        self.arenas.invalidate().await;
        self.games.invalidate().await;
        info!("Catalog caches cleared");
    }
}
