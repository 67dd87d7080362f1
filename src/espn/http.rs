use std::{collections::HashMap, num::NonZeroUsize, sync::Mutex, time::Duration};

use lru::LruCache;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cli::types::ids::TeamId;
use crate::cli::types::team::Conference;
use crate::core::http::default_headers;
use crate::espn::types::{
    AthleteDetail, ConferenceLeader, ConferenceLeaders, GameSummary, LeadersResponse,
    RankingsResponse, Schedule, Scoreboard, StandingsEntry, StandingsResponse,
};
use crate::{EspnError, EventId, Result};

#[cfg(test)]
mod tests;

/// Site API: schedules, scoreboard, summaries, rankings.
pub const SITE_API_BASE: &str =
    "https://site.api.espn.com/apis/site/v2/sports/basketball/womens-college-basketball";
/// Web API: conference standings.
pub const WEB_API_BASE: &str =
    "https://site.web.api.espn.com/apis/v2/sports/basketball/womens-college-basketball";
/// Core API: statistical leaders.
pub const CORE_API_BASE: &str =
    "https://sports.core.api.espn.com/v2/sports/basketball/leagues/womens-college-basketball";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Leader categories shown on the standings page, in display order.
pub const LEADER_CATEGORIES: [(&str, &str); 6] = [
    ("pointsPerGame", "PTS PER GAME"),
    ("3PointsMadePerGame", "3PT PER GAME"),
    ("reboundsPerGame", "REB PER GAME"),
    ("assistsPerGame", "AST PER GAME"),
    ("stealsPerGame", "STL PER GAME"),
    ("blocksPerGame", "BLK PER GAME"),
];

pub const LEADERS_PER_CATEGORY: usize = 10;

const ATHLETE_NAME_CACHE: usize = 256;

/// Base URLs for the three ESPN API hosts. Tests point them at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    pub site: String,
    pub web: String,
    pub core: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            site: SITE_API_BASE.to_string(),
            web: WEB_API_BASE.to_string(),
            core: CORE_API_BASE.to_string(),
        }
    }
}

impl BaseUrls {
    /// All three hosts at one root, e.g. a mock server's URI.
    pub fn single(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            site: root.to_string(),
            web: root.to_string(),
            core: root.to_string(),
        }
    }
}

pub struct EspnClient {
    client: Client,
    urls: BaseUrls,
    athlete_names: Mutex<LruCache<String, String>>,
}

impl EspnClient {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(BaseUrls::default())
    }

    pub fn with_base_urls(urls: BaseUrls) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers(None)?)
            .build()?;
        Ok(Self::with_client(client, urls))
    }

    pub fn with_client(client: Client, urls: BaseUrls) -> Self {
        let capacity = NonZeroUsize::new(ATHLETE_NAME_CACHE).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            urls,
            athlete_names: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(res)
    }

    /// Full season schedule for one team, results included.
    pub async fn team_schedule(&self, team: &TeamId) -> Result<Schedule> {
        let url = format!("{}/teams/{}/schedule", self.urls.site, team);
        self.get_json(&url, &[]).await
    }

    /// Today's scoreboard across the league.
    pub async fn scoreboard(&self) -> Result<Scoreboard> {
        let url = format!("{}/scoreboard", self.urls.site);
        self.get_json(&url, &[]).await
    }

    /// Header, box score, game info and play-by-play for one game.
    pub async fn game_summary(&self, event_id: &EventId) -> Result<GameSummary> {
        let url = format!("{}/summary", self.urls.site);
        self.get_json(&url, &[("event", event_id.as_str())]).await
    }

    /// AP poll as `abbreviation -> rank`. Empty if no AP poll is published.
    pub async fn rankings(&self) -> Result<HashMap<String, u32>> {
        let url = format!("{}/rankings", self.urls.site);
        let data: RankingsResponse = self.get_json(&url, &[]).await?;

        Ok(data
            .rankings
            .iter()
            .find(|poll| poll.name.contains("AP"))
            .map(|poll| {
                poll.ranks
                    .iter()
                    .filter(|r| !r.team.abbreviation.is_empty() && r.current > 0)
                    .map(|r| (r.team.abbreviation.clone(), r.current))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Conference standings ordered by tournament seed.
    pub async fn conference_standings(&self, conf: &Conference) -> Result<Vec<StandingsEntry>> {
        let url = format!("{}/standings", self.urls.web);
        let group = conf.group_id.to_string();
        let data: StandingsResponse = self.get_json(&url, &[("group", group.as_str())]).await?;

        let mut entries = data.standings.entries;
        if entries.is_empty() {
            return Err(EspnError::NoData);
        }
        entries.sort_by_key(StandingsEntry::seed);
        Ok(entries)
    }

    /// Top players per leader category. `team_abbrevs` maps team ids (as
    /// they appear in `$ref` links) to display abbreviations.
    pub async fn conference_leaders(
        &self,
        conf: &Conference,
        team_abbrevs: &HashMap<TeamId, String>,
    ) -> Result<ConferenceLeaders> {
        let url = format!(
            "{}/seasons/{}/types/2/groups/{}/leaders",
            self.urls.core, conf.season, conf.group_id
        );
        let data: LeadersResponse = self.get_json(&url, &[]).await?;

        let mut out = ConferenceLeaders::new();
        for (key, heading) in LEADER_CATEGORIES {
            let Some(cat) = data.categories.iter().find(|c| c.name == key) else {
                continue;
            };
            let mut rows = Vec::new();
            for leader in cat.leaders.iter().take(LEADERS_PER_CATEGORY) {
                let team = team_id_from_ref(&leader.team.href)
                    .and_then(|id| team_abbrevs.get(&id).cloned())
                    .unwrap_or_else(|| "???".to_string());
                rows.push(ConferenceLeader {
                    name: self.athlete_name(&leader.athlete.href).await,
                    team,
                    value: leader.display_value.clone(),
                });
            }
            out.push((heading.to_string(), rows));
        }
        Ok(out)
    }

    /// Resolve an athlete `$ref`, memoised across categories.
    async fn athlete_name(&self, href: &str) -> String {
        if href.is_empty() {
            return "Unknown".to_string();
        }
        if let Some(name) = self
            .athlete_names
            .lock()
            .ok()
            .and_then(|mut names| names.get(href).cloned())
        {
            return name;
        }

        let name = match self.get_json::<AthleteDetail>(href, &[]).await {
            Ok(detail) if !detail.display_name.is_empty() => detail.display_name,
            Ok(_) => "Unknown".to_string(),
            Err(e) => {
                warn!("Failed to resolve athlete {}: {}", href, e);
                "Unknown".to_string()
            }
        };
        if let Ok(mut names) = self.athlete_names.lock() {
            names.put(href.to_string(), name.clone());
        }
        name
    }
}

/// Team id from a core API link such as `.../teams/30?lang=en`.
pub fn team_id_from_ref(href: &str) -> Option<TeamId> {
    let rest = &href[href.find("/teams/")? + "/teams/".len()..];
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| TeamId::new(digits))
}
