//! Full site build: every tracked team's pages, then the conference page.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, warn};

use super::common::{find_team_game, should_update, team_records, wants_odds, SiteConfig};
use super::game::{odds_for, write_game_page};
use super::standings::build_standings;
use crate::cli::types::team::TrackedTeam;
use crate::core::cache::OddsCache;
use crate::espn::odds::{GameOdds, OddsClient};
use crate::espn::types::{Competition, GameState, GameSummary, Schedule};
use crate::espn::EspnClient;
use crate::render::home::{today_entries, HomePage, TodayGame};
use crate::render::schedule::SchedulePage;
use crate::stats::season_lines;
use crate::{EventId, Result};

/// What a site run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Nothing live or imminent; no page was written.
    Skipped(String),
    /// Pages were rebuilt. Counts the game reports written.
    Updated { game_pages: usize },
}

struct TeamFeed {
    team: TrackedTeam,
    schedule: Schedule,
    /// The team's game from the scoreboard (or a live schedule game).
    current: Option<(EventId, Competition)>,
}

/// Handle the site command: decide whether anything changed, then rebuild
/// the home, schedule and game pages for each tracked team and the
/// standings page.
pub async fn handle_site(
    config: &SiteConfig,
    espn: &EspnClient,
    odds: &OddsClient,
    force: bool,
) -> Result<SiteOutcome> {
    info!("Fetching Women's Basketball data...");
    let mut feeds = Vec::with_capacity(config.teams.len());
    for team in &config.teams {
        let schedule = espn.team_schedule(&team.id).await?;
        feeds.push((team.clone(), schedule));
    }
    let scoreboard = espn.scoreboard().await?;

    let now_utc = Utc::now();
    let decisions: Vec<_> = feeds
        .iter()
        .map(|(team, schedule)| {
            should_update(schedule, &scoreboard, &team.id, now_utc, config.pregame_window)
        })
        .collect();
    match decisions.iter().find(|d| d.update) {
        Some(d) => info!("Updating: {}", d.reason),
        None if force => info!("Forced update"),
        None => {
            let reason = decisions
                .last()
                .map(|d| d.reason.clone())
                .unwrap_or_else(|| "No tracked teams".to_string());
            info!("Skipping update: {}", reason);
            info!("Use --force to update anyway");
            return Ok(SiteOutcome::Skipped(reason));
        }
    }

    let rankings = espn.rankings().await.unwrap_or_else(|e| {
        warn!("Rankings unavailable: {}", e);
        HashMap::new()
    });

    let feeds: Vec<TeamFeed> = feeds
        .into_iter()
        .map(|(team, schedule)| {
            let current = find_team_game(&scoreboard, &schedule, &team.id)
                .map(|(event, comp)| (event.id.clone(), comp.clone()));
            TeamFeed {
                team,
                schedule,
                current,
            }
        })
        .collect();

    let now = config.now();
    let today: Vec<TodayGame> = feeds
        .iter()
        .flat_map(|f| {
            let live = f.current.as_ref().map(|(id, comp)| (id, comp));
            today_entries(&f.team, live, &f.schedule, &now)
        })
        .collect();

    let mut cache = OddsCache::load(&config.odds_cache);
    let mut game_pages = 0;
    for feed in &feeds {
        game_pages += build_team(config, espn, odds, &mut cache, feed, &today, &rankings).await?;
    }

    if let Err(e) = build_standings(config, espn, &rankings).await {
        warn!("Error generating standings: {}", e);
    }

    Ok(SiteOutcome::Updated { game_pages })
}

/// Home, schedule and game pages for one team. Returns how many game
/// reports were written; a game that fails is logged and skipped.
async fn build_team(
    config: &SiteConfig,
    espn: &EspnClient,
    odds: &OddsClient,
    cache: &mut OddsCache,
    feed: &TeamFeed,
    today: &[TodayGame],
    rankings: &HashMap<String, u32>,
) -> Result<usize> {
    let team = &feed.team;
    info!("Generating {} pages...", team.abbrev);
    let records = team_records(&feed.schedule);
    let now_utc = Utc::now();

    let mut lines: HashMap<EventId, GameOdds> = HashMap::new();
    for event in &feed.schedule.events {
        let Some(comp) = event.competition() else {
            continue;
        };
        if !wants_odds(comp, now_utc, config.pregame_window) {
            continue;
        }
        if let Some(line) = odds_for(odds, cache, &event.id, comp).await {
            lines.insert(event.id.clone(), line);
        }
    }

    let games: Vec<&EventId> = feed
        .schedule
        .events
        .iter()
        .filter(|e| matches!(e.state(), GameState::Post | GameState::Live))
        .map(|e| &e.id)
        .filter(|id| !id.is_empty())
        .collect();
    info!("Generating {} {} game pages...", games.len(), team.abbrev);

    let mut completed: Vec<GameSummary> = Vec::new();
    let mut written = 0;
    for event_id in games {
        let summary = match espn.game_summary(event_id).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Error generating {} game {}: {}", team.abbrev, event_id, e);
                continue;
            }
        };
        match write_game_page(
            config,
            team,
            event_id,
            &summary,
            rankings,
            &records,
            lines.get(event_id),
        ) {
            Ok(_) => written += 1,
            Err(e) => warn!("Error generating {} game {}: {}", team.abbrev, event_id, e),
        }
        if summary.competition().map(Competition::state) == Some(GameState::Post) {
            completed.push(summary);
        }
    }

    let season = season_lines(&completed, &team.id);
    let now = config.now();
    let home = HomePage {
        team,
        teams: &config.teams,
        conference: &config.conference,
        today: today.to_vec(),
        season: &season,
        schedule: &feed.schedule,
        rankings,
    }
    .render(&now);
    config.write_page(&team.home_page, &home)?;

    let schedule = SchedulePage {
        team,
        teams: &config.teams,
        conference: &config.conference,
        schedule: &feed.schedule,
        rankings,
    }
    .render(&now);
    config.write_page(&team.schedule_page, &schedule)?;

    Ok(written)
}
