pub mod matchup;
pub mod odds;

pub use matchup::{
    ArenaRecord, GamePreview, GameRecord, Matchup, MatchupRecord, MergedGame, ARENA_UNAVAILABLE,
};
pub use odds::{OddsRow, SortColumn, SortDirection, SortParseError};
