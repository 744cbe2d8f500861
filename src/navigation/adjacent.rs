use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::window::is_today_or_later;
use crate::models::GamePreview;

/// Number of games shown in each preview panel beside the detail view
pub const PREVIEW_PANEL_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Keyboard binding of the detail view
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Prev),
            "ArrowRight" => Some(Direction::Next),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown direction: {0} (expected prev or next)")]
pub struct DirectionParseError(String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prev" | "previous" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

/// Previous/next id in `ids`, wrapping at both ends.
///
/// Returns `None` when `current` is not in the list.
pub fn adjacent<'a, S>(ids: &'a [S], current: &str, direction: Direction) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let index = ids.iter().position(|id| id.as_ref() == current)?;
    Some(ids[step(index, ids.len(), direction)].as_ref())
}

fn step(index: usize, total: usize, direction: Direction) -> usize {
    match direction {
        Direction::Prev => (index + total - 1) % total,
        Direction::Next => (index + 1) % total,
    }
}

/// Games before and after the current one, in kick-off order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Neighbors {
    pub before: Vec<GamePreview>,
    pub after: Vec<GamePreview>,
}

/// Chronological sequence of today's and later games used for prev/next
/// navigation. Built fresh from a snapshot; holds no cursor.
#[derive(Debug, Clone, Default)]
pub struct NavigationSequence {
    games: Vec<GamePreview>,
}

impl NavigationSequence {
    pub fn build(previews: &[GamePreview], now: DateTime<Utc>, tz: Tz) -> Self {
        let mut games: Vec<GamePreview> = previews
            .iter()
            .filter(|g| is_today_or_later(g.commence_time, now, tz))
            .cloned()
            .collect();

        games.sort_by_key(|g| g.commence_time);

        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.games.iter().map(|g| g.id.as_str()).collect()
    }

    pub fn games(&self) -> &[GamePreview] {
        &self.games
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.games.iter().position(|g| g.id == id)
    }

    pub fn adjacent(&self, current: &str, direction: Direction) -> Option<&str> {
        let index = self.position(current)?;
        Some(self.games[step(index, self.games.len(), direction)].id.as_str())
    }

    /// Up to `count` games on each side of `current`, without wrapping
    pub fn neighbors(&self, current: &str, count: usize) -> Neighbors {
        let Some(index) = self.position(current) else {
            return Neighbors::default();
        };

        Neighbors {
            before: self.games[index.saturating_sub(count)..index].to_vec(),
            after: self.games[index + 1..(index + 1 + count).min(self.games.len())].to_vec(),
        }
    }
}
