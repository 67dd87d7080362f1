//! Lead changes, ties and biggest leads over the scoring plays of a game.

use serde::Serialize;

use super::play::{PlayEvent, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LeadSummary {
    pub lead_changes: u32,
    pub times_tied: u32,
    pub our_biggest_lead: i32,
    pub their_biggest_lead: i32,
}

impl LeadSummary {
    pub fn our_biggest_display(&self) -> String {
        lead_display(self.our_biggest_lead)
    }

    pub fn their_biggest_display(&self) -> String {
        lead_display(self.their_biggest_lead)
    }
}

fn lead_display(lead: i32) -> String {
    if lead > 0 {
        lead.to_string()
    } else {
        "N/A".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leader {
    Ours,
    Theirs,
}

fn leader_for(lead: i32) -> Option<Leader> {
    match lead {
        l if l > 0 => Some(Leader::Ours),
        l if l < 0 => Some(Leader::Theirs),
        _ => None,
    }
}

/// Summarise the scoring plays from `ours`' perspective.
///
/// A lead change is counted whenever the side ahead differs from the last
/// side that was ahead, even with tied plays in between. A tie is counted
/// each time the score becomes level after not being level (the 0-0 start
/// counts as level).
pub fn lead_summary(plays: &[PlayEvent], ours: Side) -> LeadSummary {
    let mut summary = LeadSummary::default();
    let mut last_leader: Option<Leader> = None;
    let mut prev_leader: Option<Leader> = None;
    let mut prev = (0, 0);

    for play in plays.iter().filter(|p| p.scoring) {
        let (home, away) = play.scores_or(prev);
        prev = (home, away);

        let lead = ours.lead(home, away);
        if lead > 0 {
            summary.our_biggest_lead = summary.our_biggest_lead.max(lead);
        } else if lead < 0 {
            summary.their_biggest_lead = summary.their_biggest_lead.max(-lead);
        }

        let current = leader_for(lead);
        if let (Some(now), Some(last)) = (current, last_leader) {
            if now != last {
                summary.lead_changes += 1;
            }
        }
        if current.is_none() && prev_leader.is_some() {
            summary.times_tied += 1;
        }

        if current.is_some() {
            last_leader = current;
        }
        prev_leader = current;
    }

    summary
}
