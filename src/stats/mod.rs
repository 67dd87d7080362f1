//! Box-score arithmetic: per-player stat lines, team totals and season
//! aggregates.

pub mod line;
pub mod season;

pub use line::{Shooting, StatLine, TeamTotals};
pub use season::{season_lines, SeasonLine};

/// Last word of a display name. Player lists sort by minutes desc, points
/// desc, then this.
pub(crate) fn last_name(display_name: &str) -> &str {
    display_name.split_whitespace().last().unwrap_or("ZZZ")
}

/// `"+5"`, `"0"`, `"-3"`.
pub fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}
