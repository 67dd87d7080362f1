//! Error types for the ESPN women's basketball page generator

use thiserror::Error;


pub type Result<T> = std::result::Result<T, EspnError>;

#[derive(Error, Debug)]
pub enum EspnError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("ESPN API returned no data")]
    NoData,

    #[error("Game not found: {event_id}")]
    GameNotFound { event_id: String },

    #[error("Invalid game clock: {clock}")]
    InvalidClock { clock: String },

    #[error("Unknown team: {team}")]
    InvalidTeam { team: String },
}
