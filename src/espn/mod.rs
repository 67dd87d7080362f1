//! ESPN women's college basketball APIs: wire models, HTTP client, and the
//! third-party odds lookup.

pub mod http;
pub mod odds;
pub mod types;

pub use http::{BaseUrls, EspnClient};
pub use odds::{GameOdds, OddsClient};
