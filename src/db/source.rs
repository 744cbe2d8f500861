use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ArenaRecord, GameRecord, MatchupRecord};

/// Read access to the three collections the board is built from.
///
/// Each call returns the whole collection in no particular order.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Per-bookmaker odds records (`ev_results`)
    async fn odds_results(&self) -> Result<Vec<MatchupRecord>>;

    /// Venue records (`upcoming_games`)
    async fn arena_records(&self) -> Result<Vec<ArenaRecord>>;

    /// Schedule records (`games`)
    async fn games(&self) -> Result<Vec<GameRecord>>;
}
