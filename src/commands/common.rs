//! Shared configuration and helpers used by every command.
//!
//! This module holds the site configuration, the "should we rebuild now?"
//! decision and the small lookups that several commands need.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::cli::types::ids::TeamId;
use crate::cli::types::team::{Conference, TrackedTeam};
use crate::core::cache::{default_odds_cache_path, write_string};
use crate::espn::types::{Competition, Event, GameState, Schedule, Scoreboard};
use crate::Result;

/// Minutes before tip-off when pages start updating and odds are fetched.
pub const PREGAME_WINDOW_MINUTES: i64 = 60;

/// How late a scheduled game may still be marked `pre` and count as imminent.
const LATE_START_MINUTES: f64 = -30.0;

/// Everything a command needs to know about the site it is building.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub teams: Vec<TrackedTeam>,
    pub conference: Conference,
    pub pregame_window: i64,
    pub output_dir: PathBuf,
    pub odds_cache: PathBuf,
    /// Timezone used for every date and time shown on the pages.
    pub tz: Tz,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            teams: TrackedTeam::defaults(),
            conference: Conference::default(),
            pregame_window: PREGAME_WINDOW_MINUTES,
            output_dir: PathBuf::from("."),
            odds_cache: default_odds_cache_path(),
            tz: chrono_tz::America::Los_Angeles,
        }
    }
}

impl SiteConfig {
    pub fn new(output_dir: impl Into<PathBuf>, odds_cache: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            output_dir: output_dir.into(),
            odds_cache: odds_cache.into(),
            tz,
            ..Self::default()
        }
    }

    /// Current time in the display timezone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    pub fn team(&self, abbrev: &str) -> Option<&TrackedTeam> {
        self.teams
            .iter()
            .find(|t| t.abbrev.eq_ignore_ascii_case(abbrev))
    }

    /// Write one page below the output directory and return its path.
    pub fn write_page(&self, relative: impl AsRef<Path>, html: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(relative);
        write_string(&path, html)?;
        info!("Written to {}", path.display());
        Ok(path)
    }
}

/// Whether the site should be rebuilt, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDecision {
    pub update: bool,
    pub reason: String,
}

impl UpdateDecision {
    fn yes(reason: impl Into<String>) -> Self {
        Self {
            update: true,
            reason: reason.into(),
        }
    }

    fn no(reason: impl Into<String>) -> Self {
        Self {
            update: false,
            reason: reason.into(),
        }
    }
}

/// The team's game on today's scoreboard, or failing that a game from its
/// schedule that is in progress (live games do not always reach the
/// scoreboard).
pub fn find_team_game<'a>(
    scoreboard: &'a Scoreboard,
    schedule: &'a Schedule,
    team: &TeamId,
) -> Option<(&'a Event, &'a Competition)> {
    let on_scoreboard = scoreboard.events.iter().find_map(|event| {
        event
            .competitions
            .iter()
            .find(|c| c.involves(team))
            .map(|c| (event, c))
    });
    on_scoreboard.or_else(|| {
        schedule.events.iter().find_map(|event| {
            event
                .competition()
                .filter(|c| c.state() == GameState::Live)
                .map(|c| (event, c))
        })
    })
}

/// Pages change while a game is live, right after it ends, and from a
/// little before tip-off (`window` minutes) until it is marked started.
pub fn should_update(
    schedule: &Schedule,
    scoreboard: &Scoreboard,
    team: &TeamId,
    now: DateTime<Utc>,
    window: i64,
) -> UpdateDecision {
    if let Some((_, comp)) = find_team_game(scoreboard, schedule, team) {
        match comp.state() {
            GameState::Post => return UpdateDecision::yes("Game just finished"),
            GameState::Live => return UpdateDecision::yes("Game is LIVE"),
            _ => {}
        }
    }

    for comp in schedule.events.iter().filter_map(Event::competition) {
        match comp.state() {
            GameState::Live => return UpdateDecision::yes("Game is LIVE"),
            GameState::Pre => {
                let Some(start) = comp.start_time() else {
                    continue;
                };
                let minutes = (start - now).num_seconds() as f64 / 60.0;
                if (LATE_START_MINUTES..=window as f64).contains(&minutes) {
                    return if minutes < 0.0 {
                        UpdateDecision::yes("Game should be starting now")
                    } else {
                        UpdateDecision::yes(format!("Game starts in {} minutes", minutes as i64))
                    };
                }
            }
            _ => {}
        }
    }

    UpdateDecision::no("No game live or imminent")
}

/// Latest overall record per team abbreviation, taken from completed
/// games in schedule order so later games win.
pub fn team_records(schedule: &Schedule) -> HashMap<String, String> {
    let mut records = HashMap::new();
    for comp in schedule
        .events
        .iter()
        .filter(|e| e.state() == GameState::Post)
        .filter_map(Event::competition)
    {
        for c in &comp.competitors {
            if let Some(record) = c.total_record() {
                records.insert(c.team.abbreviation.clone(), record.to_string());
            }
        }
    }
    records
}

/// Whether a game is close enough to tip-off (or already under way) to
/// look up its betting line.
pub fn wants_odds(comp: &Competition, now: DateTime<Utc>, window: i64) -> bool {
    if !matches!(comp.state(), GameState::Pre | GameState::Live) {
        return false;
    }
    comp.start_time()
        .map(|start| (start - now).num_seconds() as f64 / 60.0 <= window as f64)
        .unwrap_or(false)
}
