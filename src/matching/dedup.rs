use std::collections::HashSet;

use tracing::debug;

use crate::models::Matchup;

/// Collapse per-bookmaker rows into one row per game.
///
/// Keeps the first record seen for each matchup key and preserves input order.
pub fn deduplicate<T>(records: &[T]) -> Vec<T>
where
    T: Matchup + Clone,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for record in records {
        if seen.insert(record.matchup_key()) {
            unique.push(record.clone());
        }
    }

    debug!(
        "Deduplicated {} records into {} games",
        records.len(),
        unique.len()
    );

    unique
}
