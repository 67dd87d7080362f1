//! Single game report command

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use super::common::{team_records, wants_odds, SiteConfig};
use crate::cli::types::team::TrackedTeam;
use crate::core::cache::OddsCache;
use crate::espn::odds::{GameOdds, OddsClient};
use crate::espn::types::{Competition, GameSummary};
use crate::espn::EspnClient;
use crate::pbp::GameAnalysis;
use crate::render::game::{live_position, GameReport};
use crate::{EspnError, EventId, Result};

/// Betting line for a game, looked up by the two teams' display names.
pub async fn odds_for(
    odds: &OddsClient,
    cache: &mut OddsCache,
    event_id: &EventId,
    comp: &Competition,
) -> Option<GameOdds> {
    let home = comp.home()?.team.display_name.as_str();
    let away = comp.away()?.team.display_name.as_str();
    if event_id.is_empty() || home.is_empty() || away.is_empty() {
        return None;
    }
    odds.game_odds(cache, event_id, home, away).await
}

/// Render one game report and write it to the team's games directory.
pub fn write_game_page(
    config: &SiteConfig,
    team: &TrackedTeam,
    event_id: &EventId,
    summary: &GameSummary,
    rankings: &HashMap<String, u32>,
    records: &HashMap<String, String>,
    odds: Option<&GameOdds>,
) -> Result<PathBuf> {
    let analysis = GameAnalysis::from_summary(summary, &team.id, live_position(summary));
    let html = GameReport {
        team,
        summary,
        analysis: &analysis,
        rankings,
        team_records: records,
        odds,
    }
    .render(&config.now());
    config.write_page(format!("{}/{}.html", team.games_dir, event_id), &html)
}

/// Handle the game command: fetch one game and write its report.
pub async fn handle_game(
    config: &SiteConfig,
    espn: &EspnClient,
    odds: &OddsClient,
    event_id: &EventId,
    team: &TrackedTeam,
) -> Result<PathBuf> {
    info!("Fetching game {} for {}", event_id, team.abbrev);
    let summary = espn.game_summary(event_id).await?;
    let Some(comp) = summary.competition() else {
        return Err(EspnError::GameNotFound {
            event_id: event_id.to_string(),
        });
    };

    let rankings = espn.rankings().await.unwrap_or_else(|e| {
        warn!("Rankings unavailable: {}", e);
        HashMap::new()
    });
    let records = match espn.team_schedule(&team.id).await {
        Ok(schedule) => team_records(&schedule),
        Err(e) => {
            warn!("Schedule unavailable, using header records: {}", e);
            HashMap::new()
        }
    };

    let line = if wants_odds(comp, Utc::now(), config.pregame_window) {
        let mut cache = OddsCache::load(&config.odds_cache);
        odds_for(odds, &mut cache, event_id, comp).await
    } else {
        OddsCache::load(&config.odds_cache).get(event_id).cloned()
    };

    write_game_page(
        config,
        team,
        event_id,
        &summary,
        &rankings,
        &records,
        line.as_ref(),
    )
}
