//! Play-by-play reducers.
//!
//! Every reducer is a single pass over the ordered [`PlayEvent`] list of one
//! game. None of them fail: missing fields fall back to the defaults
//! documented on [`PlayEvent`].

pub mod flow;
pub mod fouls;
pub mod lead;
pub mod play;
pub mod plus_minus;
pub mod second_chance;


pub use flow::{GameFlowChart, LeadSeries, LivePosition};
pub use fouls::{team_fouls_and_timeouts, TeamFoulsTimeouts};
pub use lead::{lead_summary, LeadSummary};
pub use play::{normalize, GameClock, PlayEvent, PlayKind, Side, SubDirection};
pub use plus_minus::{plus_minus, PlusMinus};
pub use second_chance::second_chance_points;

use crate::cli::types::ids::TeamId;
use crate::espn::types::GameSummary;

/// Everything the game report derives from the play-by-play, computed from
/// one team's point of view.
#[derive(Debug, Clone)]
pub struct GameAnalysis {
    pub ours: Side,
    pub plus_minus: PlusMinus,
    /// `(home, away)`.
    pub second_chance: (i32, i32),
    pub lead: LeadSummary,
    pub series: LeadSeries,
    /// Present only while the game is in progress and has plays.
    pub fouls: Option<TeamFoulsTimeouts>,
    pub scoring_plays: usize,
}

impl GameAnalysis {
    /// Run every reducer over a summary. `live` is the game's current
    /// position when it is still being played.
    pub fn from_summary(summary: &GameSummary, ours: &TeamId, live: Option<LivePosition>) -> Self {
        let plays = normalize(&summary.plays);
        let home = summary.home_team_id();
        let away = summary
            .competition()
            .and_then(|c| c.away())
            .map(|c| c.team.id.clone())
            .unwrap_or_default();
        let side = if *ours == away { Side::Away } else { Side::Home };

        let periods = plays
            .iter()
            .map(|p| p.period)
            .chain(live.map(|l| l.period))
            .max()
            .unwrap_or(0)
            .max(flow::REGULATION_PERIODS);

        Self {
            ours: side,
            plus_minus: plus_minus(&plays, &summary.boxscore.players, &home),
            second_chance: second_chance_points(&plays, &home, &away),
            lead: lead_summary(&plays, side),
            series: LeadSeries::build(&plays, side, periods, live),
            fouls: live
                .filter(|_| !plays.is_empty())
                .map(|l| team_fouls_and_timeouts(&plays, &home, &away, l.period)),
            scoring_plays: plays.iter().filter(|p| p.scoring).count(),
        }
    }

    /// Second-chance points as `(ours, theirs)`.
    pub fn second_chance_split(&self) -> (i32, i32) {
        match self.ours {
            Side::Home => self.second_chance,
            Side::Away => (self.second_chance.1, self.second_chance.0),
        }
    }
}
