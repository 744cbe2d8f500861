pub mod arena;
pub mod dedup;

pub use arena::{find_arena, merge_all, merge_arena, ARENA_MATCH_WINDOW_HOURS};
pub use dedup::deduplicate;
