/// Fallback used for bookmakers without a dedicated logo
pub const GENERIC_BOOK_LOGO: &str = "/images/casinos/generic-casino.svg";

const BOOK_LOGOS: &[(&str, &str)] = &[
    ("DraftKings", "/images/casinos/draftkings.svg"),
    ("FanDuel", "/images/casinos/fanduel.svg"),
    ("BetMGM", "/images/casinos/betmgm.svg"),
    ("Caesars", "/images/casinos/caesars.svg"),
    ("PointsBet", "/images/casinos/pointsbet.svg"),
];

/// Logo path for a bookmaker name, ignoring case and surrounding spaces
pub fn book_logo(name: &str) -> &'static str {
    let wanted = name.trim().to_lowercase();

    BOOK_LOGOS
        .iter()
        .find(|(book, _)| book.to_lowercase() == wanted)
        .map(|(_, logo)| *logo)
        .unwrap_or(GENERIC_BOOK_LOGO)
}

/// Logo path for a team, by name
pub fn team_logo(team: &str) -> String {
    format!("/logos/{}.svg", urlencoding::encode(team))
}
