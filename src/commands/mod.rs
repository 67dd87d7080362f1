//! Command handlers for the page generator.
//!
//! Every handler takes the [`SiteConfig`] plus the API clients, so tests
//! can point the clients at a mock server and the output at a temp dir.

pub mod common;
pub mod game;
pub mod site;
pub mod standings;

#[cfg(test)]
mod tests;

pub use common::{should_update, SiteConfig, UpdateDecision};
pub use game::handle_game;
pub use site::{handle_site, SiteOutcome};
pub use standings::handle_standings;
