use std::ops::AddAssign;

use serde::Serialize;

use crate::espn::types::{AthleteEntry, TeamPlayers};

/// Number of fields in a complete ESPN box-score row. Shorter rows belong to
/// players who did not play.
pub const STAT_FIELDS: usize = 13;

mod idx {
    pub const MIN: usize = 0;
    pub const PTS: usize = 1;
    pub const FG: usize = 2;
    pub const THREE: usize = 3;
    pub const FT: usize = 4;
    pub const REB: usize = 5;
    pub const AST: usize = 6;
    pub const TO: usize = 7;
    pub const STL: usize = 8;
    pub const BLK: usize = 9;
    pub const OREB: usize = 10;
    pub const DREB: usize = 11;
    pub const PF: usize = 12;
}

/// Made/attempted pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Shooting {
    pub made: u32,
    pub attempted: u32,
}

impl Shooting {
    pub fn new(made: u32, attempted: u32) -> Self {
        Self { made, attempted }
    }

    /// Parse `"5-11"` or `"5/11"`. Anything else counts as 0/0.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .split_once(|c| c == '-' || c == '/')
            .and_then(|(m, a)| Some(Self::new(m.trim().parse().ok()?, a.trim().parse().ok()?)))
            .unwrap_or_default()
    }

    pub fn pct(&self) -> Option<f64> {
        (self.attempted > 0).then(|| 100.0 * self.made as f64 / self.attempted as f64)
    }

    /// Percentage with `decimals` places, or `fallback` with no attempts.
    pub fn pct_display(&self, decimals: usize, fallback: &str) -> String {
        self.pct()
            .map(|p| format!("{p:.decimals$}%"))
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl std::fmt::Display for Shooting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.made, self.attempted)
    }
}

impl AddAssign for Shooting {
    fn add_assign(&mut self, rhs: Self) {
        self.made += rhs.made;
        self.attempted += rhs.attempted;
    }
}

/// One player's counting stats for a game (or a sum of games).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatLine {
    pub minutes: u32,
    pub points: u32,
    pub fg: Shooting,
    pub three: Shooting,
    pub ft: Shooting,
    pub rebounds: u32,
    pub assists: u32,
    pub turnovers: u32,
    pub steals: u32,
    pub blocks: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub fouls: u32,
}

fn count(raw: &str) -> Option<u32> {
    match raw.trim() {
        "" | "--" => Some(0),
        s => s.parse().ok(),
    }
}

impl StatLine {
    /// Parse an ESPN `stats` array. Returns `None` for a did-not-play row:
    /// too few fields, a non-numeric count, or zero minutes.
    pub fn parse(stats: &[String]) -> Option<Self> {
        if stats.len() < STAT_FIELDS {
            return None;
        }
        let minutes = match stats[idx::MIN].trim() {
            "0:00" => 0,
            m => count(m)?,
        };
        if minutes == 0 {
            return None;
        }

        Some(Self {
            minutes,
            points: count(&stats[idx::PTS])?,
            fg: Shooting::parse(&stats[idx::FG]),
            three: Shooting::parse(&stats[idx::THREE]),
            ft: Shooting::parse(&stats[idx::FT]),
            rebounds: count(&stats[idx::REB])?,
            assists: count(&stats[idx::AST])?,
            turnovers: count(&stats[idx::TO])?,
            steals: count(&stats[idx::STL])?,
            blocks: count(&stats[idx::BLK])?,
            offensive_rebounds: count(&stats[idx::OREB])?,
            defensive_rebounds: count(&stats[idx::DREB])?,
            fouls: count(&stats[idx::PF])?,
        })
    }

    pub fn total_rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: Self) {
        self.minutes += rhs.minutes;
        self.points += rhs.points;
        self.fg += rhs.fg;
        self.three += rhs.three;
        self.ft += rhs.ft;
        self.rebounds += rhs.rebounds;
        self.assists += rhs.assists;
        self.turnovers += rhs.turnovers;
        self.steals += rhs.steals;
        self.blocks += rhs.blocks;
        self.offensive_rebounds += rhs.offensive_rebounds;
        self.defensive_rebounds += rhs.defensive_rebounds;
        self.fouls += rhs.fouls;
    }
}

/// Sum of every player who played for one team, plus bench scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TeamTotals {
    pub line: StatLine,
    pub bench_points: u32,
}

impl TeamTotals {
    pub fn from_athletes(athletes: &[AthleteEntry]) -> Self {
        let mut totals = Self::default();
        for a in athletes {
            if let Some(line) = StatLine::parse(&a.stats) {
                totals.line += line;
                if !a.starter {
                    totals.bench_points += line.points;
                }
            }
        }
        totals
    }

    pub fn from_team(team: &TeamPlayers) -> Self {
        Self::from_athletes(team.athletes())
    }
}
