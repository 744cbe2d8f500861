use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One bookmaker's line for one side of a game, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsRow {
    /// Bookmaker name
    pub book: String,

    /// American moneyline with explicit sign for positive prices (e.g. "+130")
    pub moneyline: String,

    /// Win probability as a percentage string (e.g. "55.00%")
    pub probability: String,

    /// Signed edge as decimal text
    pub edge: String,

    /// Kelly fraction as decimal text, absent when the feed had none
    pub kelly: Option<String>,
}

/// Column an odds table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Book,
    Moneyline,
    Probability,
    Edge,
    Kelly,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Book => "book",
            SortColumn::Moneyline => "moneyline",
            SortColumn::Probability => "probability",
            SortColumn::Edge => "edge",
            SortColumn::Kelly => "kelly",
        }
    }

    /// Direction applied when this column is first selected
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortColumn::Edge | SortColumn::Probability | SortColumn::Kelly => {
                SortDirection::Descending
            }
            SortColumn::Book | SortColumn::Moneyline => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort {kind}: {value}")]
pub struct SortParseError {
    kind: &'static str,
    value: String,
}

impl FromStr for SortColumn {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(SortColumn::Book),
            "moneyline" => Ok(SortColumn::Moneyline),
            "probability" => Ok(SortColumn::Probability),
            "edge" => Ok(SortColumn::Edge),
            "kelly" => Ok(SortColumn::Kelly),
            _ => Err(SortParseError {
                kind: "column",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(SortParseError {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
