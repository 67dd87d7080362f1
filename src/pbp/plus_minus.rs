//! Per-player plus/minus from on-court lineup tracking.

use std::collections::{HashMap, HashSet};

use super::play::{substitution_directions, PlayEvent, PlayKind, SubDirection};
use crate::cli::types::ids::{AthleteId, TeamId};
use crate::espn::types::TeamPlayers;

/// Net points scored while each player was on the court.
pub type PlusMinus = HashMap<AthleteId, i32>;

type Lineups = HashMap<TeamId, HashSet<AthleteId>>;

/// Compute plus/minus for every athlete listed in the box score.
///
/// Lineups start from the box-score starters and change only on
/// substitution plays. Whenever the score moves, everyone on the court gets
/// the swing from their own team's perspective. Rostered players who never
/// play a scoring stretch stay at 0.
pub fn plus_minus(plays: &[PlayEvent], players: &[TeamPlayers], home: &TeamId) -> PlusMinus {
    let mut totals = PlusMinus::new();
    let mut lineups = Lineups::new();

    for team in players.iter().filter(|t| !t.statistics.is_empty()) {
        let athletes = team.athletes();
        lineups.insert(
            team.team.id.clone(),
            athletes
                .iter()
                .filter(|a| a.starter && !a.athlete.id.is_empty())
                .map(|a| a.athlete.id.clone())
                .collect(),
        );
        for a in athletes.iter().filter(|a| !a.athlete.id.is_empty()) {
            totals.insert(a.athlete.id.clone(), 0);
        }
    }

    let mut prev = (0, 0);
    for play in plays {
        if play.kind == PlayKind::Substitution {
            apply_substitution(play, &mut lineups);
        }

        let (home_score, away_score) = play.scores_or(prev);
        let home_diff = home_score - prev.0;
        let away_diff = away_score - prev.1;

        if home_diff != 0 || away_diff != 0 {
            let swing = home_diff - away_diff;
            for (team, on_court) in &lineups {
                let delta = if team == home { swing } else { -swing };
                for athlete in on_court {
                    if let Some(total) = totals.get_mut(athlete) {
                        *total += delta;
                    }
                }
            }
        }

        prev = (home_score, away_score);
    }

    totals
}

/// Move players on or off the court for one substitution play.
///
/// A description with a single direction applies it to the first
/// participant, with "out" taking precedence when both phrases appear but
/// only one player is listed. A description naming both directions with two
/// participants pairs them in text order.
fn apply_substitution(play: &PlayEvent, lineups: &mut Lineups) {
    let Some(on_court) = play.team.as_ref().and_then(|t| lineups.get_mut(t)) else {
        return;
    };
    let directions = substitution_directions(&play.text);

    let moves: Vec<(&AthleteId, SubDirection)> =
        if directions.len() == 2 && play.participants.len() >= 2 {
            play.participants.iter().zip(directions).collect()
        } else {
            let direction = if directions.contains(&SubDirection::Out) {
                Some(SubDirection::Out)
            } else if directions.contains(&SubDirection::In) {
                Some(SubDirection::In)
            } else {
                None
            };
            play.participants
                .first()
                .zip(direction)
                .into_iter()
                .collect()
        };

    for (athlete, direction) in moves {
        match direction {
            SubDirection::Out => {
                on_court.remove(athlete);
            }
            SubDirection::In => {
                on_court.insert(athlete.clone());
            }
        }
    }
}
