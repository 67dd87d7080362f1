//! Season totals built from completed games' box scores.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use super::line::StatLine;
use crate::cli::types::ids::{AthleteId, TeamId};
use crate::espn::types::GameSummary;
use crate::pbp::{normalize, plus_minus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonLine {
    pub athlete: AthleteId,
    pub name: String,
    pub jersey: String,
    pub games: u32,
    pub totals: StatLine,
    pub plus_minus: i32,
}

struct GameRow {
    athlete: AthleteId,
    name: String,
    jersey: String,
    line: StatLine,
    plus_minus: i32,
}

/// Rows for every `team` player who played in one game.
fn game_rows(summary: &GameSummary, team: &TeamId) -> Vec<GameRow> {
    let pm = if summary.plays.is_empty() {
        HashMap::new()
    } else {
        plus_minus(
            &normalize(&summary.plays),
            &summary.boxscore.players,
            &summary.home_team_id(),
        )
    };

    summary
        .boxscore
        .players
        .iter()
        .filter(|t| &t.team.id == team)
        .flat_map(|t| t.athletes())
        .filter(|a| !a.athlete.id.is_empty())
        .filter_map(|a| {
            let line = StatLine::parse(&a.stats)?;
            Some(GameRow {
                athlete: a.athlete.id.clone(),
                name: a.athlete.display_name.clone(),
                jersey: a.athlete.jersey.clone(),
                line,
                plus_minus: pm.get(&a.athlete.id).copied().unwrap_or(0),
            })
        })
        .collect()
}

/// Aggregate `team`'s players over `games`. Each game is reduced
/// independently (in parallel) before the per-player sums are folded.
pub fn season_lines(games: &[GameSummary], team: &TeamId) -> Vec<SeasonLine> {
    let per_game: Vec<Vec<GameRow>> = games.par_iter().map(|g| game_rows(g, team)).collect();

    let mut by_player: HashMap<AthleteId, SeasonLine> = HashMap::new();
    for row in per_game.into_iter().flatten() {
        let entry = by_player
            .entry(row.athlete.clone())
            .or_insert_with(|| SeasonLine {
                athlete: row.athlete,
                name: if row.name.is_empty() {
                    "Unknown".to_string()
                } else {
                    row.name
                },
                jersey: row.jersey,
                games: 0,
                totals: StatLine::default(),
                plus_minus: 0,
            });
        entry.games += 1;
        entry.totals += row.line;
        entry.plus_minus += row.plus_minus;
    }

    let mut lines: Vec<SeasonLine> = by_player.into_values().collect();
    lines.sort_by(|a, b| {
        b.totals
            .minutes
            .cmp(&a.totals.minutes)
            .then(b.totals.points.cmp(&a.totals.points))
            .then_with(|| super::last_name(&a.name).cmp(super::last_name(&b.name)))
    });
    lines
}
