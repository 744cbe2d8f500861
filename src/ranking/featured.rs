use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Matchup, MatchupRecord};

/// Number of games shown on the Featured tab
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// Value used to pick and order Featured games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedMetric {
    /// Larger of the home/away Kelly fractions
    #[default]
    Kelly,
    /// Larger of the home/away win probabilities
    Probability,
}

impl FeaturedMetric {
    /// Score of one record. Records without any Kelly value rank below all
    /// records that have one.
    pub fn score(&self, record: &MatchupRecord) -> f64 {
        match self {
            FeaturedMetric::Kelly => record.max_kelly().unwrap_or(f64::NEG_INFINITY),
            FeaturedMetric::Probability => record.max_win_prob(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeaturedMetric::Kelly => "kelly",
            FeaturedMetric::Probability => "probability",
        }
    }
}

impl fmt::Display for FeaturedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown featured metric: {0} (expected kelly or probability)")]
pub struct MetricParseError(String);

impl FromStr for FeaturedMetric {
    type Err = MetricParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kelly" => Ok(FeaturedMetric::Kelly),
            "probability" | "prob" => Ok(FeaturedMetric::Probability),
            _ => Err(MetricParseError(s.to_string())),
        }
    }
}

/// Pick the Featured games out of one day's records.
///
/// Each matchup is represented by its best-scoring bookmaker row (the first
/// row wins ties). Matchups are ranked by that score, the top `limit` are
/// kept, and the result is returned in kick-off order.
pub fn rank(games: &[MatchupRecord], metric: FeaturedMetric, limit: usize) -> Vec<MatchupRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut best: Vec<(&MatchupRecord, f64)> = Vec::new();

    for game in games {
        let score = metric.score(game);

        match index.get(&game.matchup_key()) {
            Some(&slot) => {
                if score > best[slot].1 {
                    best[slot] = (game, score);
                }
            }
            None => {
                index.insert(game.matchup_key(), best.len());
                best.push((game, score));
            }
        }
    }

    let group_count = best.len();

    // Stable sorts: equal scores and equal start times keep encounter order
    best.sort_by(|a, b| b.1.total_cmp(&a.1));
    best.truncate(limit);
    best.sort_by_key(|(game, _)| game.commence_time);

    debug!(
        "Featured ranking by {}: {} groups, kept {}",
        metric,
        group_count,
        best.len()
    );

    best.into_iter().map(|(game, _)| game.clone()).collect()
}
