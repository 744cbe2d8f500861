use chrono::Duration;
use tracing::debug;

use crate::models::{ArenaRecord, Matchup, MatchupRecord, MergedGame, ARENA_UNAVAILABLE};

/// Maximum distance between the odds feed start time and the schedule feed
/// start time for the two to describe the same game
pub const ARENA_MATCH_WINDOW_HOURS: i64 = 3;

fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Find the venue of a game in the schedule catalog.
///
/// Returns the first record, in catalog order, whose teams match
/// case-insensitively and whose start lies within the inclusive window.
pub fn find_arena<'a, G>(game: &G, catalog: &'a [ArenaRecord]) -> Option<&'a ArenaRecord>
where
    G: Matchup + ?Sized,
{
    let window = Duration::hours(ARENA_MATCH_WINDOW_HOURS);
    let window_start = game.commence_time() - window;
    let window_end = game.commence_time() + window;

    catalog.iter().find(|candidate| {
        candidate.game_time >= window_start
            && candidate.game_time <= window_end
            && names_match(&candidate.home_team, game.home_team())
            && names_match(&candidate.away_team, game.away_team())
    })
}

/// Attach the venue to an odds record, falling back to [`ARENA_UNAVAILABLE`]
pub fn merge_arena(game: &MatchupRecord, catalog: &[ArenaRecord]) -> MergedGame {
    let arena = match find_arena(game, catalog) {
        Some(found) => found.arena.clone(),
        None => {
            debug!(
                "No arena found for {} vs {} at {}",
                game.home_team, game.away_team, game.commence_time
            );
            ARENA_UNAVAILABLE.to_string()
        }
    };

    MergedGame {
        record: game.clone(),
        arena,
    }
}

/// Merge every game independently against the same catalog
pub fn merge_all(games: &[MatchupRecord], catalog: &[ArenaRecord]) -> Vec<MergedGame> {
    games.iter().map(|g| merge_arena(g, catalog)).collect()
}
