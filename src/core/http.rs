//! HTTP utilities for the public ESPN and odds APIs

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("espn-wbb/", env!("CARGO_PKG_VERSION"));

/// Default headers: JSON `Accept` plus our `User-Agent`. `agent` overrides
/// the latter.
pub fn default_headers(agent: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_str(agent.unwrap_or(USER_AGENT_VALUE))?,
    );
    Ok(h)
}
