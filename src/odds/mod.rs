pub mod logos;
pub mod table;

pub use logos::{book_logo, team_logo};
pub use table::{compare_rows, format_moneyline, format_probability, OddsTables, SortState};
