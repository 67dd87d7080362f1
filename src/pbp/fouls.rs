//! Team fouls in the current period and timeouts remaining, for live games.

use super::play::{PlayEvent, PlayKind};
use super::flow::REGULATION_PERIODS;
use crate::cli::types::ids::TeamId;

pub const TIMEOUTS_PER_GAME: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamFoulsTimeouts {
    pub home_fouls: u32,
    pub away_fouls: u32,
    pub home_timeouts_left: u32,
    pub away_timeouts_left: u32,
}

/// Fouls reset every period; each overtime period adds one timeout.
/// Official/media timeouts carry no team and are ignored.
pub fn team_fouls_and_timeouts(
    plays: &[PlayEvent],
    home: &TeamId,
    away: &TeamId,
    current_period: u8,
) -> TeamFoulsTimeouts {
    let (mut home_fouls, mut away_fouls) = (0, 0);
    let (mut home_used, mut away_used) = (0u32, 0u32);

    for play in plays {
        let Some(team) = play.team.as_ref() else {
            continue;
        };
        match play.kind {
            PlayKind::Foul if play.period == current_period => {
                if team == home {
                    home_fouls += 1;
                } else if team == away {
                    away_fouls += 1;
                }
            }
            PlayKind::Timeout => {
                if team == home {
                    home_used += 1;
                } else if team == away {
                    away_used += 1;
                }
            }
            _ => {}
        }
    }

    let allowed = TIMEOUTS_PER_GAME + current_period.saturating_sub(REGULATION_PERIODS) as u32;
    TeamFoulsTimeouts {
        home_fouls,
        away_fouls,
        home_timeouts_left: allowed.saturating_sub(home_used),
        away_timeouts_left: allowed.saturating_sub(away_used),
    }
}
