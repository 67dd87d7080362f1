//! Second-chance points: points a team scores after its own offensive
//! rebound, before the ball changes hands.

use super::play::{PlayEvent, PlayKind, Side};
use crate::cli::types::ids::TeamId;

/// Returns `(home_points, away_points)`.
pub fn second_chance_points(plays: &[PlayEvent], home: &TeamId, away: &TeamId) -> (i32, i32) {
    let side_of = |team: &TeamId| {
        if team == home {
            Some(Side::Home)
        } else if team == away {
            Some(Side::Away)
        } else {
            None
        }
    };

    let mut window: Option<Side> = None;
    let (mut home_pts, mut away_pts) = (0, 0);

    for play in plays {
        let team = play.team.as_ref();

        if play.kind == PlayKind::OffensiveRebound {
            if let Some(side) = team.and_then(side_of) {
                window = Some(side);
            }
            continue;
        }

        if let Some(team) = team {
            if play.scoring && play.score_value > 0 {
                match window.filter(|side| side_of(team) == Some(*side)) {
                    Some(Side::Home) => home_pts += play.score_value,
                    Some(Side::Away) => away_pts += play.score_value,
                    None => {}
                }
                // Made free throws keep the window open for the rest of the trip.
                if play.kind != PlayKind::FreeThrow {
                    window = None;
                }
                continue;
            }

            if play.is_missed_shot() {
                // A miss by the rebounding team keeps the window; anyone else
                // shooting means possession already changed.
                if window.is_some() && window != side_of(team) {
                    window = None;
                }
                continue;
            }
        }

        if play.kind.ends_possession() {
            window = None;
        }
    }

    (home_pts, away_pts)
}
