use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::matching::{deduplicate, merge_all};
use crate::models::{ArenaRecord, MatchupRecord, MergedGame};
use crate::navigation::{Tab, TimeWindow};
use crate::ranking::{rank, FeaturedMetric};

/// How the Featured tab is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedSettings {
    pub metric: FeaturedMetric,
    pub limit: usize,
}

/// Games shown on one tab
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub tab: Tab,
    pub time_zone: String,
    pub window: TimeWindow,
    pub games: Vec<MergedGame>,
}

/// Build a tab: filter to the tab's window, rank if Featured, collapse
/// bookmakers into games, then attach venues
pub fn build_listing(
    tab: Tab,
    odds: &[MatchupRecord],
    arenas: &[ArenaRecord],
    now: DateTime<Utc>,
    tz: Tz,
    featured: FeaturedSettings,
) -> Listing {
    let window = tab.window(now, tz);

    let in_window: Vec<MatchupRecord> = odds
        .iter()
        .filter(|r| window.contains(r.commence_time))
        .cloned()
        .collect();

    let selected = match tab {
        Tab::Featured => rank(&in_window, featured.metric, featured.limit),
        Tab::Today | Tab::Tomorrow | Tab::Upcoming => in_window,
    };

    let games = merge_all(&deduplicate(&selected), arenas);

    debug!(
        "Listing {} ({}): {} games from {} records",
        tab,
        tz.name(),
        games.len(),
        odds.len()
    );

    Listing {
        tab,
        time_zone: tz.name().to_string(),
        window,
        games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ARENA_UNAVAILABLE;
    use crate::navigation::DEFAULT_TIME_ZONE;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        // 2025-06-10 12:00 EDT
        Utc.with_ymd_and_hms(2025, 6, 10, 16, 0, 0).unwrap()
    }

    fn record(id: &str, home: &str, offset_hours: i64, book: &str, kelly: f64) -> MatchupRecord {
        MatchupRecord {
            id: id.to_string(),
            home_team: home.to_string(),
            away_team: "Road Team".to_string(),
            commence_time: now() + Duration::hours(offset_hours),
            bookmaker: book.to_string(),
            home_odds: -105.0,
            away_odds: -115.0,
            home_win_prob: 0.49,
            away_win_prob: 0.51,
            home_ev: 0.1,
            away_ev: 0.2,
            home_kelly: Some(kelly),
            away_kelly: None,
        }
    }

    fn settings() -> FeaturedSettings {
        FeaturedSettings {
            metric: FeaturedMetric::Kelly,
            limit: 2,
        }
    }

    fn records() -> Vec<MatchupRecord> {
        vec![
            record("a1", "A", 1, "X", 0.01),
            record("a2", "A", 1, "Y", 0.09),
            record("b1", "B", 3, "X", 0.05),
            record("c1", "C", 6, "X", 0.02),
            record("tomorrow", "D", 26, "X", 0.5),
            record("next-week", "E", 24 * 6, "X", 0.5),
            record("too-far", "F", 24 * 8, "X", 0.5),
            record("past", "G", -2, "X", 0.5),
        ]
    }

    fn list(tab: Tab, arenas: &[ArenaRecord]) -> Listing {
        build_listing(tab, &records(), arenas, now(), DEFAULT_TIME_ZONE, settings())
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing.games.iter().map(|g| g.record.id.as_str()).collect()
    }

    #[test]
    fn test_today_dedups_in_store_order() {
        let arenas = vec![ArenaRecord {
            home_team: "b".to_string(),
            away_team: "road team".to_string(),
            game_time: now() + Duration::hours(4),
            arena: "Arena B".to_string(),
        }];

        let listing = list(Tab::Today, &arenas);

        assert_eq!(ids(&listing), vec!["a1", "b1", "c1", "past"]);
        assert_eq!(listing.games[0].arena, ARENA_UNAVAILABLE);
        assert_eq!(listing.games[1].arena, "Arena B");
    }

    #[test]
    fn test_featured_uses_best_bookmaker_and_limit() {
        let listing = list(Tab::Featured, &[]);

        // "past" (earlier today) has the top Kelly; A's best row is a2
        assert_eq!(ids(&listing), vec!["past", "a2"]);
    }

    #[test]
    fn test_tomorrow_and_upcoming() {
        let tomorrow = list(Tab::Tomorrow, &[]);
        assert_eq!(ids(&tomorrow), vec!["tomorrow"]);

        let upcoming = list(Tab::Upcoming, &[]);
        assert_eq!(ids(&upcoming), vec!["a1", "b1", "c1", "tomorrow", "next-week"]);
    }

    #[test]
    fn test_empty_store() {
        let listing = build_listing(Tab::Featured, &[], &[], now(), DEFAULT_TIME_ZONE, settings());
        assert!(listing.games.is_empty());
        assert_eq!(listing.time_zone, "America/New_York");
    }
}
