pub mod detail;
pub mod listing;

pub use detail::{build_detail, game_previews, DetailNavigation, GameDetail};
pub use listing::{build_listing, FeaturedSettings, Listing};
