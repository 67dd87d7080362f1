//! Normalised play records and the vocabulary used to classify them.
//!
//! ESPN describes plays with free text (`type.text`, `text`). All substring
//! matching against that vocabulary lives here; the reducers only ever see
//! [`PlayKind`] and [`SubDirection`].

use std::fmt;
use std::str::FromStr;

use crate::cli::types::ids::{AthleteId, TeamId};
use crate::error::{EspnError, Result};
use crate::espn::types::Play;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Score margin from this side's point of view.
    pub fn lead(self, home_score: i32, away_score: i32) -> i32 {
        match self {
            Side::Home => home_score - away_score,
            Side::Away => away_score - home_score,
        }
    }
}

/// Category of a play, derived once from its ESPN type text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayKind {
    Substitution,
    DeadBallRebound,
    OffensiveRebound,
    DefensiveRebound,
    FreeThrow,
    Turnover,
    Steal,
    EndPeriod,
    JumpBall,
    Timeout,
    Foul,
    Other,
}

impl PlayKind {
    /// Play types that hand the ball to the other team (or stop play), which
    /// closes any second-chance window regardless of who was involved.
    pub fn ends_possession(self) -> bool {
        matches!(
            self,
            PlayKind::DefensiveRebound
                | PlayKind::Turnover
                | PlayKind::EndPeriod
                | PlayKind::JumpBall
                | PlayKind::DeadBallRebound
                | PlayKind::Steal
        )
    }
}

/// Classify an ESPN play type (`"Offensive Rebound"`, `"MadeFreeThrow"`,
/// `"OfficialTVTimeOut"`, ...). Matching is case-insensitive and the first
/// rule that matches wins.
pub fn classify(type_text: &str) -> PlayKind {
    let t = type_text.to_lowercase();
    let has = |needle: &str| t.contains(needle);

    if has("substitution") {
        PlayKind::Substitution
    } else if has("dead ball rebound") || has("deadball rebound") {
        PlayKind::DeadBallRebound
    } else if has("offensive rebound") {
        PlayKind::OffensiveRebound
    } else if has("defensive rebound") {
        PlayKind::DefensiveRebound
    } else if has("freethrow") || has("free throw") {
        PlayKind::FreeThrow
    } else if has("turnover") {
        PlayKind::Turnover
    } else if has("steal") {
        PlayKind::Steal
    } else if has("end period") {
        PlayKind::EndPeriod
    } else if has("jumpball") || has("jump ball") {
        PlayKind::JumpBall
    } else if has("timeout") {
        PlayKind::Timeout
    } else if has("foul") {
        PlayKind::Foul
    } else {
        PlayKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubDirection {
    In,
    Out,
}

const OUT_PHRASES: [&str; 2] = ["subbing out", "exits"];
const IN_PHRASES: [&str; 2] = ["subbing in", "enters"];

/// Substitution directions named in a play description, in the order they
/// appear in the text. At most one entry per direction.
pub fn substitution_directions(text: &str) -> Vec<SubDirection> {
    let t = text.to_lowercase();
    let first_of = |phrases: &[&str]| phrases.iter().filter_map(|p| t.find(*p)).min();

    let mut found: Vec<(usize, SubDirection)> = [
        (first_of(&OUT_PHRASES[..]), SubDirection::Out),
        (first_of(&IN_PHRASES[..]), SubDirection::In),
    ]
    .into_iter()
    .filter_map(|(pos, dir)| pos.map(|p| (p, dir)))
    .collect();

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, dir)| dir).collect()
}

/// Longest clock reading accepted; anything above is a corrupt feed value.
const MAX_CLOCK_MINUTES: u32 = 20;

/// Time remaining in a period, as displayed by ESPN (`"7:42"`, or `"38.4"`
/// inside the final minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub minutes: u32,
    pub seconds: u32,
}

impl GameClock {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

impl FromStr for GameClock {
    type Err = EspnError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EspnError::InvalidClock {
            clock: s.to_string(),
        };
        let s = s.trim();

        match s.split_once(':') {
            Some((m, sec)) => {
                let minutes = m
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|m| *m <= MAX_CLOCK_MINUTES)
                    .ok_or_else(invalid)?;
                let seconds = sec
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0 && *v < 60.0)
                    .ok_or_else(invalid)?;
                Ok(Self::new(minutes, seconds as u32))
            }
            None => {
                let seconds = s
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .filter(|v| *v < f64::from((MAX_CLOCK_MINUTES + 1) * 60))
                    .ok_or_else(invalid)?;
                let whole = seconds as u32;
                Ok(Self::new(whole / 60, whole % 60))
            }
        }
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// A play with every optional field resolved to an explicit default:
///
/// | field | absent in feed |
/// |-------|----------------|
/// | `period` | 1 |
/// | `clock` | `None` (play is not bucketed in time) |
/// | `team` | `None` (no attribution) |
/// | `score_value` | 0 |
/// | `home_score` / `away_score` | `None` (consumers carry the previous score) |
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub period: u8,
    pub clock: Option<GameClock>,
    pub kind: PlayKind,
    pub text: String,
    pub team: Option<TeamId>,
    pub scoring: bool,
    pub score_value: i32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub participants: Vec<AthleteId>,
}

impl PlayEvent {
    /// A shot attempt that did not score: the feed keeps the attempt's point
    /// value but clears the scoring flag.
    pub fn is_missed_shot(&self) -> bool {
        !self.scoring && self.score_value != 0
    }

    /// Scores after this play, carrying `prev` forward for absent fields.
    pub fn scores_or(&self, prev: (i32, i32)) -> (i32, i32) {
        (
            self.home_score.unwrap_or(prev.0),
            self.away_score.unwrap_or(prev.1),
        )
    }
}

impl From<&Play> for PlayEvent {
    fn from(play: &Play) -> Self {
        Self {
            period: play.period.number.filter(|p| *p > 0).unwrap_or(1),
            clock: play.clock.display_value.parse().ok(),
            kind: classify(&play.play_type.text),
            text: play.text.clone(),
            team: play
                .team
                .as_ref()
                .map(|t| t.id.clone())
                .filter(|id| !id.is_empty()),
            scoring: play.scoring_play,
            score_value: play.score_value,
            home_score: play.home_score,
            away_score: play.away_score,
            participants: play
                .participants
                .iter()
                .map(|p| p.athlete.id.clone())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }
}

/// Normalise a raw play list, keeping order.
pub fn normalize(plays: &[Play]) -> Vec<PlayEvent> {
    plays.iter().map(PlayEvent::from).collect()
}
