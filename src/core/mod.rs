//! Core utilities shared by the fetch layer and the command handlers
//!
//! - `cache`: file helpers and the on-disk odds cache
//! - `http`: default request headers for the public JSON APIs

pub mod cache;
pub mod http;

pub use cache::{default_odds_cache_path, try_read_to_string, write_string, OddsCache};
pub use http::default_headers;
