use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::matching::{deduplicate, merge_arena};
use crate::models::{ArenaRecord, GamePreview, MatchupRecord};
use crate::navigation::{Direction, NavigationSequence, Neighbors, PREVIEW_PANEL_SIZE};
use crate::odds::{team_logo, OddsTables, SortState};

pub const H2H_UNAVAILABLE: &str = "H2H data not available";
pub const OVER_UNDER_UNAVAILABLE: &str = "Over/Under data not available";
pub const NO_INJURY_UPDATES: &str = "No injury updates";

/// Everything the matchup page shows
#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_logo: String,
    pub away_logo: String,
    pub game_time: DateTime<Utc>,
    /// Start time rendered in the viewer's zone
    pub local_time: String,
    pub arena: String,
    pub h2h_record: String,
    pub over_under: String,
    pub player_injury: String,
    pub best_team: String,
    pub best_team_probability: Option<String>,
    pub sort: SortState,
    pub odds: OddsTables,
    pub navigation: DetailNavigation,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailNavigation {
    pub prev_id: Option<String>,
    pub next_id: Option<String>,
    pub panels: Neighbors,
}

impl DetailNavigation {
    pub fn for_game(sequence: &NavigationSequence, id: &str) -> Self {
        Self {
            prev_id: sequence.adjacent(id, Direction::Prev).map(str::to_string),
            next_id: sequence.adjacent(id, Direction::Next).map(str::to_string),
            panels: sequence.neighbors(id, PREVIEW_PANEL_SIZE),
        }
    }
}

/// Navigable previews: one per game across the whole odds collection
pub fn game_previews(odds: &[MatchupRecord]) -> Vec<GamePreview> {
    deduplicate(odds).iter().map(MatchupRecord::preview).collect()
}

/// Assemble the matchup page for `id`.
///
/// `matchup` holds every bookmaker record of the game, `odds` the full
/// collection used for navigation. Returns `None` when `id` is not among
/// the matchup records.
pub fn build_detail(
    id: &str,
    matchup: &[MatchupRecord],
    odds: &[MatchupRecord],
    arenas: &[ArenaRecord],
    now: DateTime<Utc>,
    tz: Tz,
    sort: SortState,
) -> Option<GameDetail> {
    let base = matchup.iter().find(|r| r.id == id)?;
    let merged = merge_arena(base, arenas);

    let mut tables = OddsTables::from_records(matchup)?;
    // Best team is judged on store order, before sorting
    let best_team = tables.best_team().to_string();
    let best_team_probability = tables.best_team_probability().map(str::to_string);
    tables.sort(sort);

    // Navigation holds one id per game: the first stored bookmaker record
    let anchor = matchup.first().map_or(id, |r| r.id.as_str());
    let sequence = NavigationSequence::build(&game_previews(odds), now, tz);

    Some(GameDetail {
        id: id.to_string(),
        home_logo: team_logo(&base.home_team),
        away_logo: team_logo(&base.away_team),
        home_team: base.home_team.clone(),
        away_team: base.away_team.clone(),
        game_time: base.commence_time,
        local_time: base
            .commence_time
            .with_timezone(&tz)
            .format("%-I:%M %p %Z")
            .to_string(),
        arena: merged.arena,
        h2h_record: H2H_UNAVAILABLE.to_string(),
        over_under: OVER_UNDER_UNAVAILABLE.to_string(),
        player_injury: NO_INJURY_UPDATES.to_string(),
        best_team,
        best_team_probability,
        sort,
        odds: tables,
        navigation: DetailNavigation::for_game(&sequence, anchor),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortColumn, SortDirection};
    use crate::navigation::DEFAULT_TIME_ZONE;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 16, 0, 0).unwrap()
    }

    fn record(id: &str, home: &str, offset_hours: i64, book: &str, home_ev: f64) -> MatchupRecord {
        MatchupRecord {
            id: id.to_string(),
            home_team: home.to_string(),
            away_team: "Visitors".to_string(),
            commence_time: now() + Duration::hours(offset_hours),
            bookmaker: book.to_string(),
            home_odds: 140.0,
            away_odds: -160.0,
            home_win_prob: 0.41,
            away_win_prob: 0.59,
            home_ev,
            away_ev: -1.0,
            home_kelly: None,
            away_kelly: None,
        }
    }

    fn collection() -> Vec<MatchupRecord> {
        vec![
            record("a-x", "A", 1, "X", 0.5),
            record("a-y", "A", 1, "Y", 2.5),
            record("b-x", "B", 4, "X", 1.0),
            record("c-x", "C", 8, "X", 1.0),
            record("old", "D", -30, "X", 1.0),
        ]
    }

    #[test]
    fn test_detail_sorts_tables_and_navigates() {
        let odds = collection();
        let matchup = vec![odds[0].clone(), odds[1].clone()];
        let arenas = vec![ArenaRecord {
            home_team: "A".to_string(),
            away_team: "Visitors".to_string(),
            game_time: now() + Duration::hours(1),
            arena: "Home Court".to_string(),
        }];

        let detail = build_detail(
            "a-y",
            &matchup,
            &odds,
            &arenas,
            now(),
            DEFAULT_TIME_ZONE,
            SortState::default(),
        )
        .unwrap();

        assert_eq!(detail.arena, "Home Court");
        assert_eq!(detail.best_team, "Visitors");
        assert_eq!(detail.best_team_probability.as_deref(), Some("59.00%"));
        assert_eq!(detail.odds.home[0].book, "Y");
        assert_eq!(detail.local_time, "1:00 PM EDT");

        // a-y shares its game with a-x, which anchors navigation
        assert_eq!(detail.navigation.prev_id.as_deref(), Some("c-x"));
        assert_eq!(detail.navigation.next_id.as_deref(), Some("b-x"));
    }

    #[test]
    fn test_navigation_wraps_over_today_and_later() {
        let odds = collection();
        let matchup = vec![odds[0].clone(), odds[1].clone()];

        let detail = build_detail(
            "a-x",
            &matchup,
            &odds,
            &[],
            now(),
            DEFAULT_TIME_ZONE,
            SortState::new(SortColumn::Book, SortDirection::Descending),
        )
        .unwrap();

        assert_eq!(detail.navigation.prev_id.as_deref(), Some("c-x"));
        assert_eq!(detail.navigation.next_id.as_deref(), Some("b-x"));
        let after: Vec<&str> = detail
            .navigation
            .panels
            .after
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(after, vec!["b-x", "c-x"]);
        assert_eq!(detail.odds.home[0].book, "Y");
    }

    #[test]
    fn test_unknown_id() {
        let odds = collection();
        assert!(build_detail(
            "zzz",
            &odds,
            &odds,
            &[],
            now(),
            DEFAULT_TIME_ZONE,
            SortState::default()
        )
        .is_none());
    }
}
