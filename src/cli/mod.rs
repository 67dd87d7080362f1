//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};

use crate::commands::SiteConfig;
use crate::core::cache::default_odds_cache_path;
use crate::OUTPUT_DIR_ENV_VAR;

/// Options shared by every command.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Directory the HTML pages are written to (or set `ESPN_WBB_OUTPUT_DIR`).
    #[clap(long, global = true, env = OUTPUT_DIR_ENV_VAR, default_value = ".")]
    pub output_dir: PathBuf,

    /// Odds cache file. Defaults to the user cache directory.
    #[clap(long, global = true)]
    pub odds_cache: Option<PathBuf>,

    /// IANA timezone for dates and times on the pages.
    #[clap(long, global = true, default_value = "America/Los_Angeles")]
    pub timezone: Tz,
}

impl GlobalOpts {
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new(
            &self.output_dir,
            self.odds_cache
                .clone()
                .unwrap_or_else(default_odds_cache_path),
            self.timezone,
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild every page when a tracked team is live, just finished, or
    /// about to tip off.
    ///
    /// Exits with status 1 when nothing needed updating.
    Site {
        /// Rebuild even when no game is live or imminent.
        #[clap(long)]
        force: bool,
    },

    /// Write the report for a single game.
    Game {
        /// ESPN event id.
        event_id: String,

        /// Tracked team whose page the report belongs to.
        #[clap(long, short, default_value = "USC")]
        team: String,
    },

    /// Write the conference standings and leaders page.
    Standings,
}

/// Static HTML pages for women's college basketball teams.
#[derive(Debug, Parser)]
#[clap(name = "espn-wbb", version, about = "ESPN women's basketball page generator")]
pub struct Cli {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_force() {
        let cli = Cli::try_parse_from(["espn-wbb", "site", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Site { force: true }));
        assert_eq!(cli.global.timezone, chrono_tz::America::Los_Angeles);
    }

    #[test]
    fn test_parse_game_with_globals() {
        let cli = Cli::try_parse_from([
            "espn-wbb",
            "game",
            "401700001",
            "--team",
            "NU",
            "--output-dir",
            "/tmp/site",
            "--timezone",
            "America/Chicago",
        ])
        .unwrap();
        match cli.command {
            Commands::Game { event_id, team } => {
                assert_eq!(event_id, "401700001");
                assert_eq!(team, "NU");
            }
            other => panic!("Expected Game, got {:?}", other),
        }
        assert_eq!(cli.global.output_dir, PathBuf::from("/tmp/site"));

        let config = cli.global.site_config();
        assert_eq!(config.tz, chrono_tz::America::Chicago);
        assert_eq!(config.teams.len(), 2);
    }

    #[test]
    fn test_parse_bad_timezone() {
        assert!(Cli::try_parse_from(["espn-wbb", "--timezone", "Mars/Olympus", "standings"]).is_err());
    }
}
