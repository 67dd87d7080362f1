//! Pregame lines from The Odds API.
//!
//! Lines are looked up once per event and kept in the [`OddsCache`]; later
//! runs never refetch an event that already has an entry. Without an API
//! key only cached lines are available.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::types::ids::EventId;
use crate::core::cache::OddsCache;
use crate::Result;

pub const ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";
pub const ODDS_SPORT: &str = "basketball_wncaab";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub team: String,
    pub line: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    pub line: String,
    pub over_price: String,
    pub under_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moneyline {
    pub home: String,
    pub away: String,
    pub home_team: String,
    pub away_team: String,
}

/// Lines from the first listed bookmaker. Markets the book does not offer
/// are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameOdds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<Spread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Total>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moneyline: Option<Moneyline>,
}

impl GameOdds {
    pub fn is_empty(&self) -> bool {
        self.spread.is_none() && self.total.is_none() && self.moneyline.is_none()
    }
}

// Wire format of `/sports/{sport}/odds`.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OddsEvent {
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bookmaker {
    pub key: String,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Market {
    pub key: String,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub name: String,
    pub price: Option<serde_json::Number>,
    pub point: Option<serde_json::Number>,
}

fn num(n: &Option<serde_json::Number>) -> String {
    n.as_ref().map(|n| n.to_string()).unwrap_or_default()
}

/// Pick the event whose home and away names match exactly and read its
/// first bookmaker's markets.
pub fn extract_odds(events: &[OddsEvent], home: &str, away: &str) -> Option<GameOdds> {
    let event = events
        .iter()
        .find(|e| e.home_team == home && e.away_team == away)?;
    let book = event.bookmakers.first()?;
    let market = |key: &str| {
        book.markets
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.outcomes.as_slice())
            .unwrap_or_default()
    };
    let named = |outcomes: &[Outcome], name: &str| outcomes.iter().find(|o| o.name == name).cloned();

    let spread = market("spreads")
        .iter()
        .find(|o| o.name == home)
        .map(|o| Spread {
            team: home.to_string(),
            line: num(&o.point),
            price: num(&o.price),
        });

    let totals = market("totals");
    let total = (!totals.is_empty()).then(|| {
        let over = named(totals, "Over").unwrap_or_default();
        let under = named(totals, "Under").unwrap_or_default();
        Total {
            line: num(&over.point),
            over_price: num(&over.price),
            under_price: num(&under.price),
        }
    });

    let h2h = market("h2h");
    let moneyline = (!h2h.is_empty()).then(|| Moneyline {
        home: named(h2h, home).map(|o| num(&o.price)).unwrap_or_default(),
        away: named(h2h, away).map(|o| num(&o.price)).unwrap_or_default(),
        home_team: home.to_string(),
        away_team: away.to_string(),
    });

    let odds = GameOdds {
        spread,
        total,
        moneyline,
    };
    (!odds.is_empty()).then_some(odds)
}

pub struct OddsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OddsClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, ODDS_API_BASE, api_key)
    }

    pub fn with_base_url(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_events(&self, api_key: &str) -> Result<Vec<OddsEvent>> {
        let url = format!("{}/sports/{}/odds", self.base_url, ODDS_SPORT);
        let params = [
            ("apiKey", api_key),
            ("regions", "us"),
            ("markets", "h2h,spreads,totals"),
            ("oddsFormat", "american"),
        ];

        let res = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<OddsEvent>>()
            .await?;

        Ok(res)
    }

    /// Cached lines for `event_id`, fetching and caching them on a miss.
    /// Every failure degrades to `None`.
    pub async fn game_odds(
        &self,
        cache: &mut OddsCache,
        event_id: &EventId,
        home: &str,
        away: &str,
    ) -> Option<GameOdds> {
        if let Some(odds) = cache.get(event_id) {
            return Some(odds.clone());
        }
        let api_key = self.api_key.as_deref()?;

        let events = match self.fetch_events(api_key).await {
            Ok(events) => events,
            Err(e) => {
                warn!("Odds API error: {}", e);
                return None;
            }
        };

        let odds = extract_odds(&events, home, away)?;
        cache.insert(event_id.clone(), odds.clone());
        match cache.save() {
            Ok(()) => info!("Cached odds for event {}", event_id),
            Err(e) => warn!("Failed to save odds cache: {}", e),
        }
        Some(odds)
    }
}
