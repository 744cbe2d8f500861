use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::{debug, info, warn};

use super::source::RecordSource;
use crate::models::{ArenaRecord, GameRecord, MatchupRecord};

/// SQLite-backed record store holding the `ev_results`, `upcoming_games`
/// and `games` collections
pub struct SqliteRecordStore {
    pool: Pool<Sqlite>,
}

impl SqliteRecordStore {
    /// Connect to the database and make sure the tables exist
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create data directory if needed
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create database directory")?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .create_if_missing(true);

        // Every in-memory connection is its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("Record store initialized");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ev_results (
                id TEXT PRIMARY KEY,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                commence_time TEXT NOT NULL,
                bookmaker TEXT NOT NULL,
                home_odds REAL NOT NULL,
                away_odds REAL NOT NULL,
                home_win_prob REAL NOT NULL,
                away_win_prob REAL NOT NULL,
                home_ev REAL NOT NULL,
                away_ev REAL NOT NULL,
                home_kelly REAL,
                away_kelly REAL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create ev_results table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS upcoming_games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                game_time TEXT NOT NULL,
                arena TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create upcoming_games table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                commence_time TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create games table")?;

        Ok(())
    }

    /// Insert or replace odds records by id
    pub async fn insert_odds_results(&self, records: &[MatchupRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO ev_results (
                    id,
                    home_team,
                    away_team,
                    commence_time,
                    bookmaker,
                    home_odds,
                    away_odds,
                    home_win_prob,
                    away_win_prob,
                    home_ev,
                    away_ev,
                    home_kelly,
                    away_kelly
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.home_team)
            .bind(&record.away_team)
            .bind(record.commence_time.to_rfc3339())
            .bind(&record.bookmaker)
            .bind(record.home_odds)
            .bind(record.away_odds)
            .bind(record.home_win_prob)
            .bind(record.away_win_prob)
            .bind(record.home_ev)
            .bind(record.away_ev)
            .bind(record.home_kelly)
            .bind(record.away_kelly)
            .execute(&mut *tx)
            .await
            .context("Failed to insert odds record")?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Append venue records
    pub async fn insert_arena_records(&self, records: &[ArenaRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO upcoming_games (home_team, away_team, game_time, arena)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&record.home_team)
            .bind(&record.away_team)
            .bind(record.game_time.to_rfc3339())
            .bind(&record.arena)
            .execute(&mut *tx)
            .await
            .context("Failed to insert arena record")?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Insert or replace schedule records by id
    pub async fn insert_games(&self, records: &[GameRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO games (id, home_team, away_team, commence_time)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.home_team)
            .bind(&record.away_team)
            .bind(record.commence_time.to_rfc3339())
            .execute(&mut *tx)
            .await
            .context("Failed to insert game record")?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }
}

#[async_trait]
impl RecordSource for SqliteRecordStore {
    async fn odds_results(&self) -> Result<Vec<MatchupRecord>> {
        let rows = sqlx::query_as::<_, OddsRow>("SELECT * FROM ev_results ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch ev_results")?;

        debug!("Fetched {} ev_results rows", rows.len());
        Ok(rows.into_iter().filter_map(OddsRow::into_record).collect())
    }

    async fn arena_records(&self) -> Result<Vec<ArenaRecord>> {
        let rows = sqlx::query_as::<_, ArenaRow>(
            "SELECT home_team, away_team, game_time, arena FROM upcoming_games ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch upcoming_games")?;

        debug!("Fetched {} upcoming_games rows", rows.len());
        Ok(rows.into_iter().filter_map(ArenaRow::into_record).collect())
    }

    async fn games(&self) -> Result<Vec<GameRecord>> {
        let rows = sqlx::query_as::<_, GameRow>("SELECT * FROM games ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch games")?;

        debug!("Fetched {} games rows", rows.len());
        Ok(rows.into_iter().filter_map(GameRow::into_record).collect())
    }
}

fn parse_timestamp(table: &str, id: &str, raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("Skipping {} row {}: bad timestamp {:?} ({})", table, id, raw, e);
            None
        }
    }
}

/// Database row representations
#[derive(sqlx::FromRow)]
struct OddsRow {
    id: String,
    home_team: String,
    away_team: String,
    commence_time: String,
    bookmaker: String,
    home_odds: f64,
    away_odds: f64,
    home_win_prob: f64,
    away_win_prob: f64,
    home_ev: f64,
    away_ev: f64,
    home_kelly: Option<f64>,
    away_kelly: Option<f64>,
}

impl OddsRow {
    fn into_record(self) -> Option<MatchupRecord> {
        let commence_time = parse_timestamp("ev_results", &self.id, &self.commence_time)?;

        Some(MatchupRecord {
            id: self.id,
            home_team: self.home_team,
            away_team: self.away_team,
            commence_time,
            bookmaker: self.bookmaker,
            home_odds: self.home_odds,
            away_odds: self.away_odds,
            home_win_prob: self.home_win_prob,
            away_win_prob: self.away_win_prob,
            home_ev: self.home_ev,
            away_ev: self.away_ev,
            home_kelly: self.home_kelly,
            away_kelly: self.away_kelly,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ArenaRow {
    home_team: String,
    away_team: String,
    game_time: String,
    arena: String,
}

impl ArenaRow {
    fn into_record(self) -> Option<ArenaRecord> {
        let label = format!("{} vs {}", self.home_team, self.away_team);
        let game_time = parse_timestamp("upcoming_games", &label, &self.game_time)?;

        Some(ArenaRecord {
            home_team: self.home_team,
            away_team: self.away_team,
            game_time,
            arena: self.arena,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GameRow {
    id: String,
    home_team: String,
    away_team: String,
    commence_time: String,
}

impl GameRow {
    fn into_record(self) -> Option<GameRecord> {
        let commence_time = parse_timestamp("games", &self.id, &self.commence_time)?;

        Some(GameRecord {
            id: self.id,
            home_team: self.home_team,
            away_team: self.away_team,
            commence_time,
        })
    }
}
