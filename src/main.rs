//! Entry point: parse CLI, set up logging, and dispatch to command handlers.

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use espn_wbb::{
    cli::{Cli, Commands},
    commands::{handle_game, handle_site, handle_standings, SiteOutcome},
    espn::{EspnClient, OddsClient},
    EventId, ODDS_API_KEY_ENV_VAR,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let app = Cli::parse();
    let config = app.global.site_config();
    let espn = EspnClient::new().context("Failed to build ESPN client")?;
    let odds = OddsClient::new(
        espn.http().clone(),
        std::env::var(ODDS_API_KEY_ENV_VAR).ok(),
    );

    match app.command {
        Commands::Site { force } => {
            let outcome = handle_site(&config, &espn, &odds, force)
                .await
                .context("Site build failed")?;
            match outcome {
                SiteOutcome::Skipped(_) => return Ok(ExitCode::from(1)),
                SiteOutcome::Updated { game_pages } => {
                    info!("Site updated ({} game pages)", game_pages);
                }
            }
        }

        Commands::Game { event_id, team } => {
            let team = config
                .team(&team)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown team: {}", team))?;
            let event_id = EventId::new(event_id);
            handle_game(&config, &espn, &odds, &event_id, &team)
                .await
                .with_context(|| format!("Failed to build game {}", event_id))?;
        }

        Commands::Standings => {
            handle_standings(&config, &espn)
                .await
                .context("Failed to build standings")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
