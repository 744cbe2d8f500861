pub mod adjacent;
pub mod window;

pub use adjacent::{
    adjacent, Direction, DirectionParseError, NavigationSequence, Neighbors, PREVIEW_PANEL_SIZE,
};
pub use window::{
    is_today_or_later, parse_time_zone, Tab, TimeWindow, WindowParseError, DEFAULT_TIME_ZONE,
};
