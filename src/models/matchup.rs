use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel arena text used when no schedule record matches a game
pub const ARENA_UNAVAILABLE: &str = "Location not available";

/// Anything identified by home team, away team and scheduled start
pub trait Matchup {
    fn home_team(&self) -> &str;
    fn away_team(&self) -> &str;
    fn commence_time(&self) -> DateTime<Utc>;

    /// Composite identity of a game: exact team names plus the ISO-8601
    /// millisecond UTC serialization of the start time
    fn matchup_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.home_team(),
            self.away_team(),
            self.commence_time()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// One bookmaker's odds for one game, as stored in `ev_results`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    /// Opaque record identifier
    #[serde(alias = "_id")]
    pub id: String,

    pub home_team: String,

    pub away_team: String,

    /// Scheduled start
    pub commence_time: DateTime<Utc>,

    /// Bookmaker offering these prices
    pub bookmaker: String,

    /// American moneyline for the home side (e.g. -150, +130)
    pub home_odds: f64,

    /// American moneyline for the away side
    pub away_odds: f64,

    /// Model win probability for the home side (0.0 - 1.0)
    pub home_win_prob: f64,

    /// Model win probability for the away side (0.0 - 1.0)
    pub away_win_prob: f64,

    /// Edge for a home bet, signed percent
    pub home_ev: f64,

    /// Edge for an away bet, signed percent
    pub away_ev: f64,

    /// Kelly bankroll fraction for a home bet
    #[serde(default)]
    pub home_kelly: Option<f64>,

    /// Kelly bankroll fraction for an away bet
    #[serde(default)]
    pub away_kelly: Option<f64>,
}

impl MatchupRecord {
    /// Larger of the two Kelly fractions, if any side has one
    pub fn max_kelly(&self) -> Option<f64> {
        match (self.home_kelly, self.away_kelly) {
            (Some(h), Some(a)) => Some(h.max(a)),
            (h, a) => h.or(a),
        }
    }

    /// Larger of the two win probabilities
    pub fn max_win_prob(&self) -> f64 {
        self.home_win_prob.max(self.away_win_prob)
    }

    pub fn preview(&self) -> GamePreview {
        GamePreview {
            id: self.id.clone(),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            commence_time: self.commence_time,
        }
    }
}

impl Matchup for MatchupRecord {
    fn home_team(&self) -> &str {
        &self.home_team
    }

    fn away_team(&self) -> &str {
        &self.away_team
    }

    fn commence_time(&self) -> DateTime<Utc> {
        self.commence_time
    }
}

/// Venue information from `upcoming_games`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaRecord {
    pub home_team: String,

    pub away_team: String,

    /// Start time as published by the schedule feed; may differ from the
    /// odds feed by a few hours
    pub game_time: DateTime<Utc>,

    /// Venue name
    pub arena: String,
}

/// Entry of the generic `games` schedule collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
}

impl Matchup for GameRecord {
    fn home_team(&self) -> &str {
        &self.home_team
    }

    fn away_team(&self) -> &str {
        &self.away_team
    }

    fn commence_time(&self) -> DateTime<Utc> {
        self.commence_time
    }
}

/// Odds record with its arena attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedGame {
    #[serde(flatten)]
    pub record: MatchupRecord,

    /// Matched venue or [`ARENA_UNAVAILABLE`]
    pub arena: String,
}

impl Matchup for MergedGame {
    fn home_team(&self) -> &str {
        &self.record.home_team
    }

    fn away_team(&self) -> &str {
        &self.record.away_team
    }

    fn commence_time(&self) -> DateTime<Utc> {
        self.record.commence_time
    }
}

/// Minimal game summary shown in navigation panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePreview {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
}

impl Matchup for GamePreview {
    fn home_team(&self) -> &str {
        &self.home_team
    }

    fn away_team(&self) -> &str {
        &self.away_team
    }

    fn commence_time(&self) -> DateTime<Utc> {
        self.commence_time
    }
}
