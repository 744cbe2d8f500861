use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::source::RecordSource;
use crate::models::{ArenaRecord, GameRecord, MatchupRecord};

/// Fixed in-memory collections that count how often each one is read
#[derive(Default)]
pub struct MemoryRecordSource {
    pub odds: Vec<MatchupRecord>,
    pub arenas: Vec<ArenaRecord>,
    pub games: Vec<GameRecord>,
    pub fail: bool,
    pub odds_reads: AtomicUsize,
    pub arena_reads: AtomicUsize,
    pub game_reads: AtomicUsize,
}

impl MemoryRecordSource {
    pub fn new(odds: Vec<MatchupRecord>, arenas: Vec<ArenaRecord>) -> Self {
        Self {
            odds,
            arenas,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordSource for MemoryRecordSource {
    async fn odds_results(&self) -> Result<Vec<MatchupRecord>> {
        self.odds_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("store unavailable");
        }
        Ok(self.odds.clone())
    }

    async fn arena_records(&self) -> Result<Vec<ArenaRecord>> {
        self.arena_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("store unavailable");
        }
        Ok(self.arenas.clone())
    }

    async fn games(&self) -> Result<Vec<GameRecord>> {
        self.game_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("store unavailable");
        }
        Ok(self.games.clone())
    }
}
