//! Conference standings command

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{info, warn};

use super::common::SiteConfig;
use crate::cli::types::ids::TeamId;
use crate::espn::EspnClient;
use crate::render::standings::StandingsPage;
use crate::Result;

/// Fetch standings and leaders and write the conference page. `rankings`
/// is reused when the caller already has the poll.
pub async fn build_standings(
    config: &SiteConfig,
    espn: &EspnClient,
    rankings: &HashMap<String, u32>,
) -> Result<PathBuf> {
    let conf = &config.conference;
    info!("Generating {} standings page...", conf.abbrev);
    let standings = espn.conference_standings(conf).await?;

    // Leader rows only carry team links, so map ids back to abbreviations.
    let team_abbrevs: HashMap<TeamId, String> = standings
        .iter()
        .filter(|e| !e.team.id.is_empty() && !e.team.abbreviation.is_empty())
        .map(|e| (e.team.id.clone(), e.team.abbreviation.clone()))
        .collect();

    info!("Fetching {} conference leaders...", conf.abbrev);
    let leaders = espn
        .conference_leaders(conf, &team_abbrevs)
        .await
        .unwrap_or_else(|e| {
            warn!("Error fetching leaders: {}", e);
            Vec::new()
        });

    let html = StandingsPage {
        conference: conf,
        teams: &config.teams,
        standings: &standings,
        rankings,
        leaders: &leaders,
    }
    .render(&config.now());
    config.write_page(&conf.page, &html)
}

/// Handle the standings command
pub async fn handle_standings(config: &SiteConfig, espn: &EspnClient) -> Result<PathBuf> {
    let rankings = espn.rankings().await.unwrap_or_else(|e| {
        warn!("Rankings unavailable: {}", e);
        HashMap::new()
    });
    build_standings(config, espn, &rankings).await
}
