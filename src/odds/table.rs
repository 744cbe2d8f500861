use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{MatchupRecord, OddsRow, SortColumn, SortDirection};

/// Format an American moneyline, adding `+` to positive prices
pub fn format_moneyline(price: f64) -> String {
    if price > 0.0 {
        format!("+{}", price)
    } else {
        format!("{}", price)
    }
}

/// Format a 0.0 - 1.0 probability as a percentage with two decimals
pub fn format_probability(prob: f64) -> String {
    format!("{:.2}%", prob * 100.0)
}

/// Bookmaker rows for both sides of one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsTables {
    pub home_team: String,
    pub away_team: String,
    pub home: Vec<OddsRow>,
    pub away: Vec<OddsRow>,
}

impl OddsTables {
    /// Build per-team rows from every bookmaker record of one game, in
    /// store order. Returns `None` for an empty record set.
    pub fn from_records(records: &[MatchupRecord]) -> Option<Self> {
        let first = records.first()?;

        let home = records
            .iter()
            .map(|r| OddsRow {
                book: r.bookmaker.clone(),
                moneyline: format_moneyline(r.home_odds),
                probability: format_probability(r.home_win_prob),
                edge: r.home_ev.to_string(),
                kelly: r.home_kelly.map(|k| k.to_string()),
            })
            .collect();

        let away = records
            .iter()
            .map(|r| OddsRow {
                book: r.bookmaker.clone(),
                moneyline: format_moneyline(r.away_odds),
                probability: format_probability(r.away_win_prob),
                edge: r.away_ev.to_string(),
                kelly: r.away_kelly.map(|k| k.to_string()),
            })
            .collect();

        Some(Self {
            home_team: first.home_team.clone(),
            away_team: first.away_team.clone(),
            home,
            away,
        })
    }

    fn best_side(&self) -> (&str, &[OddsRow]) {
        let lead = |rows: &[OddsRow]| {
            rows.first()
                .and_then(|r| parse_probability(&r.probability))
                .unwrap_or(0.0)
        };

        if lead(&self.away) > lead(&self.home) {
            (self.away_team.as_str(), self.away.as_slice())
        } else {
            (self.home_team.as_str(), self.home.as_slice())
        }
    }

    /// Team whose first listed bookmaker gives it the higher win
    /// probability. The home team wins ties.
    pub fn best_team(&self) -> &str {
        self.best_side().0
    }

    /// Probability text shown next to the best team
    pub fn best_team_probability(&self) -> Option<&str> {
        self.best_side().1.first().map(|r| r.probability.as_str())
    }

    pub fn sort(&mut self, state: SortState) {
        state.apply(&mut self.home);
        state.apply(&mut self.away);
    }
}

/// Active column and direction of an odds table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Edge,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// State after clicking a column header: the active column flips
    /// direction, another column starts at its own default direction
    pub fn click(self, column: SortColumn) -> Self {
        if column == self.column {
            Self::new(column, self.direction.reversed())
        } else {
            Self::new(column, column.default_direction())
        }
    }

    pub fn compare(&self, a: &OddsRow, b: &OddsRow) -> Ordering {
        compare_rows(a, b, self.column, self.direction)
    }

    pub fn apply(&self, rows: &mut [OddsRow]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

/// Total order of two rows for the given column and direction.
///
/// Equal primary values fall back to edge descending, or to probability
/// descending when edge is already the primary column.
pub fn compare_rows(
    a: &OddsRow,
    b: &OddsRow,
    column: SortColumn,
    direction: SortDirection,
) -> Ordering {
    let primary = match direction {
        SortDirection::Ascending => compare_column(a, b, column),
        SortDirection::Descending => compare_column(b, a, column),
    };

    let tie_break = match column {
        SortColumn::Edge => SortColumn::Probability,
        _ => SortColumn::Edge,
    };

    primary.then_with(|| compare_column(b, a, tie_break))
}

fn compare_column(a: &OddsRow, b: &OddsRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Book => a.book.to_lowercase().cmp(&b.book.to_lowercase()),
        SortColumn::Moneyline => {
            compare_numbers(parse_moneyline(&a.moneyline), parse_moneyline(&b.moneyline))
        }
        SortColumn::Probability => compare_numbers(
            parse_probability(&a.probability),
            parse_probability(&b.probability),
        ),
        SortColumn::Edge => compare_numbers(parse_decimal(&a.edge), parse_decimal(&b.edge)),
        SortColumn::Kelly => compare_numbers(
            a.kelly.as_deref().and_then(parse_decimal),
            b.kelly.as_deref().and_then(parse_decimal),
        ),
    }
}

// Missing values order below every number
fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_moneyline(text: &str) -> Option<f64> {
    parse_decimal(text).map(f64::trunc)
}

fn parse_probability(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    parse_decimal(trimmed.strip_suffix('%').unwrap_or(trimmed))
}
