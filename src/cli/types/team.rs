//! Teams and conference the generated site follows.

use super::ids::TeamId;
use crate::error::{EspnError, Result};
use std::str::FromStr;

/// A team with its own home page, schedule page and game reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTeam {
    pub id: TeamId,
    pub abbrev: String,
    /// Hex colour without `#`.
    pub color: String,
    pub home_page: String,
    pub schedule_page: String,
    pub games_dir: String,
}

impl TrackedTeam {
    pub fn usc() -> Self {
        Self {
            id: TeamId::new("30"),
            abbrev: "USC".to_string(),
            color: "990000".to_string(),
            home_page: "index.html".to_string(),
            schedule_page: "schedule.html".to_string(),
            games_dir: "games".to_string(),
        }
    }

    pub fn northwestern() -> Self {
        Self {
            id: TeamId::new("77"),
            abbrev: "NU".to_string(),
            color: "4E2A84".to_string(),
            home_page: "nu.html".to_string(),
            schedule_page: "nu-schedule.html".to_string(),
            games_dir: "nu-games".to_string(),
        }
    }

    /// Default set of followed teams, in navigation order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::usc(), Self::northwestern()]
    }
}

impl FromStr for TrackedTeam {
    type Err = EspnError;

    /// Parse a tracked team from its abbreviation (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        Self::defaults()
            .into_iter()
            .find(|t| t.abbrev.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EspnError::InvalidTeam {
                team: s.to_string(),
            })
    }
}

/// Conference whose standings and stat leaders get their own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub group_id: u32,
    pub abbrev: String,
    pub name: String,
    pub season: u16,
    pub page: String,
}

impl Default for Conference {
    fn default() -> Self {
        Self {
            group_id: 7,
            abbrev: "B1G".to_string(),
            name: "Big Ten".to_string(),
            season: 2026,
            page: "b1g.html".to_string(),
        }
    }
}
