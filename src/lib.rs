//! ESPN Women's Basketball Page Generator
//!
//! Builds static, monospace HTML pages for followed women's college
//! basketball teams from ESPN's public JSON APIs: a home page per team,
//! full schedules, a report for every game, and conference standings.
//!
//! ## Features
//!
//! - **Play-by-play analysis**: player plus/minus, second-chance points,
//!   lead changes, times tied and biggest leads
//! - **Game flow chart**: the lead over time as a dot chart
//! - **Live games**: clock, team fouls and timeouts left while in progress
//! - **Betting lines**: spread, total and moneyline, cached per game
//! - **Update trigger**: the site build only runs when a game is live,
//!   just finished, or about to start
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use espn_wbb::{commands::{handle_site, SiteConfig}, espn::{EspnClient, OddsClient}};
//!
//! # async fn example() -> espn_wbb::Result<()> {
//! let config = SiteConfig::default();
//! let espn = EspnClient::new()?;
//! let odds = OddsClient::new(espn.http().clone(), std::env::var("ODDS_API_KEY").ok());
//!
//! let outcome = handle_site(&config, &espn, &odds, true).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export ESPN_WBB_OUTPUT_DIR=./site
//! export ODDS_API_KEY=...   # optional; without it only cached lines are shown
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod espn;
pub mod pbp;
pub mod render;
pub mod stats;

// Re-export commonly used types
pub use cli::types::ids::{AthleteId, EventId, TeamId};
pub use cli::types::team::{Conference, TrackedTeam};
pub use error::{EspnError, Result};
pub use pbp::{GameAnalysis, PlayEvent};

pub const OUTPUT_DIR_ENV_VAR: &str = "ESPN_WBB_OUTPUT_DIR";
pub const ODDS_API_KEY_ENV_VAR: &str = "ODDS_API_KEY";
