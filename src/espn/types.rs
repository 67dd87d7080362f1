//! Serde models for the ESPN site, web and core APIs.
//!
//! Every field is lenient: ESPN omits keys freely between endpoints and
//! game states, so missing data falls back to defaults instead of failing
//! the whole payload.

use crate::cli::types::ids::{AthleteId, EventId, TeamId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};


/// Team reference as it appears inside events, box scores and standings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub abbreviation: String,
    pub location: String,
    pub name: String,
    pub display_name: String,
    pub color: String,
}

impl Team {
    /// School name, falling back to the abbreviation.
    pub fn school(&self) -> &str {
        if self.location.is_empty() {
            &self.abbreviation
        } else {
            &self.location
        }
    }
}

/// Lifecycle state of a competition (`status.type.state`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Pre,
    /// In progress, including halftime and other breaks.
    Live,
    Post,
    Unknown,
}

impl GameState {
    pub fn from_state(state: &str) -> Self {
        match state {
            "pre" => GameState::Pre,
            "post" => GameState::Post,
            "" => GameState::Unknown,
            _ => GameState::Live,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusType {
    pub state: String,
    pub detail: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    #[serde(rename = "type")]
    pub status_type: StatusType,
    pub period: u8,
    pub display_clock: String,
}

/// Scores come as plain strings on the scoreboard and summary header but as
/// `{value, displayValue}` objects in team schedules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Score {
    Text(String),
    Number(f64),
    Detailed {
        #[serde(default)]
        value: Option<f64>,
        #[serde(default, rename = "displayValue")]
        display_value: Option<String>,
    },
}

impl Score {
    pub fn display(&self) -> String {
        match self {
            Score::Text(s) => s.clone(),
            Score::Number(n) => format_number(*n),
            Score::Detailed {
                display_value: Some(d),
                ..
            } => d.clone(),
            Score::Detailed {
                value: Some(v), ..
            } => format_number(*v),
            Score::Detailed { .. } => String::new(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Text(s) => s.trim().parse().ok(),
            Score::Number(n) => Some(*n),
            Score::Detailed { value: Some(v), .. } => Some(*v),
            Score::Detailed {
                display_value: Some(d),
                ..
            } => d.trim().parse().ok(),
            Score::Detailed { .. } => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Linescore {
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: String,
    pub team: Team,
    pub score: Option<Score>,
    /// Schedule/scoreboard form: `[{type: "total", summary: "12-3"}]`.
    pub records: Vec<Record>,
    /// Summary header form: `[{displayValue: "12-3"}]`.
    pub record: Vec<Record>,
    pub linescores: Vec<Linescore>,
}

impl Competitor {
    pub fn is_home(&self) -> bool {
        self.home_away == "home"
    }

    pub fn score_display(&self) -> String {
        self.score.as_ref().map(Score::display).unwrap_or_default()
    }

    /// Overall record summary (`type == "total"`), if present.
    pub fn total_record(&self) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.kind == "total")
            .map(|r| r.summary.as_str())
    }

    /// Record as shown in the game summary header.
    pub fn header_record(&self) -> Option<&str> {
        self.record
            .first()
            .map(|r| r.display_value.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Parse an ESPN timestamp. ESPN usually drops the seconds
/// (`"2026-01-18T22:00Z"`), which RFC 3339 does not allow.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competition {
    pub date: String,
    pub status: Status,
    pub competitors: Vec<Competitor>,
}

impl Competition {
    pub fn state(&self) -> GameState {
        GameState::from_state(&self.status.status_type.state)
    }

    pub fn home(&self) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.home_away == "home")
    }

    pub fn away(&self) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.home_away == "away")
    }

    pub fn competitor_for(&self, team: &TeamId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| &c.team.id == team)
    }

    pub fn opponent_of(&self, team: &TeamId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| &c.team.id != team)
    }

    pub fn involves(&self, team: &TeamId) -> bool {
        self.competitor_for(team).is_some()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub date: String,
    pub competitions: Vec<Competition>,
}

impl Event {
    pub fn competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }

    pub fn state(&self) -> GameState {
        self.competition()
            .map(Competition::state)
            .unwrap_or(GameState::Unknown)
    }

    /// Tip-off time from the competition, falling back to the event date.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.competition()
            .and_then(Competition::start_time)
            .or_else(|| parse_date(&self.date))
    }
}

/// `/teams/{id}/schedule` and `/scoreboard` share this envelope.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EventList {
    pub events: Vec<Event>,
}

pub type Schedule = EventList;
pub type Scoreboard = EventList;

// ---------------------------------------------------------------------------
// Game summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TextRef {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PeriodRef {
    pub number: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClockRef {
    #[serde(deserialize_with = "null_as_default")]
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamRef {
    pub id: TeamId,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AthleteRef {
    pub id: AthleteId,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Participant {
    pub athlete: AthleteRef,
}

/// Explicit `null` reads as the field's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One play-by-play record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Play {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub play_type: TextRef,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub period: PeriodRef,
    #[serde(deserialize_with = "null_as_default")]
    pub clock: ClockRef,
    pub team: Option<TeamRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub scoring_play: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub score_value: i32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Athlete {
    pub id: AthleteId,
    pub display_name: String,
    pub short_name: String,
    pub jersey: String,
}

/// One player's row in the box score.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AthleteEntry {
    pub athlete: Athlete,
    pub starter: bool,
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatisticsGroup {
    pub athletes: Vec<AthleteEntry>,
}

/// Player statistics for one team (`boxscore.players[]`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamPlayers {
    pub team: Team,
    pub statistics: Vec<StatisticsGroup>,
}

impl TeamPlayers {
    /// Athletes of the first statistics group; ESPN puts the full roster there.
    pub fn athletes(&self) -> &[AthleteEntry] {
        self.statistics
            .first()
            .map(|g| g.athletes.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamedStat {
    pub name: String,
    pub display_value: String,
}

/// Team-level statistics (`boxscore.teams[]`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamStatistics {
    pub team: Team,
    pub statistics: Vec<NamedStat>,
}

impl TeamStatistics {
    pub fn stat(&self, name: &str) -> Option<&str> {
        self.statistics
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.display_value.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Boxscore {
    pub players: Vec<TeamPlayers>,
    pub teams: Vec<TeamStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Venue {
    pub full_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameInfo {
    pub venue: Venue,
    pub attendance: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryHeader {
    pub competitions: Vec<Competition>,
}

/// `/summary?event={id}` payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSummary {
    pub header: SummaryHeader,
    pub boxscore: Boxscore,
    pub game_info: GameInfo,
    pub plays: Vec<Play>,
}

impl GameSummary {
    pub fn competition(&self) -> Option<&Competition> {
        self.header.competitions.first()
    }

    pub fn home_team_id(&self) -> TeamId {
        self.competition()
            .and_then(Competition::home)
            .map(|c| c.team.id.clone())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Rankings, standings, leaders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RankEntry {
    pub current: u32,
    pub team: Team,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Poll {
    pub name: String,
    pub ranks: Vec<RankEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RankingsResponse {
    pub rankings: Vec<Poll>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StandingStat {
    #[serde(rename = "type")]
    pub kind: String,
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StandingsEntry {
    pub team: Team,
    pub stats: Vec<StandingStat>,
}

impl StandingsEntry {
    pub fn stat(&self, kind: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.display_value.as_str())
    }

    /// Conference tournament seed; unseeded teams sort last.
    pub fn seed(&self) -> u32 {
        self.stat("playoffseed")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(99)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StandingsGroup {
    pub entries: Vec<StandingsEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StandingsResponse {
    pub standings: StandingsGroup,
}

/// `{"$ref": "..."}` link used throughout the core API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RefLink {
    #[serde(rename = "$ref")]
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderEntry {
    pub display_value: String,
    pub athlete: RefLink,
    pub team: RefLink,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeaderCategory {
    pub name: String,
    pub leaders: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeadersResponse {
    pub categories: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AthleteDetail {
    pub display_name: String,
}

/// One resolved conference leader row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConferenceLeader {
    pub name: String,
    pub team: String,
    pub value: String,
}

/// Leader tables in display order: `(category heading, rows)`.
pub type ConferenceLeaders = Vec<(String, Vec<ConferenceLeader>)>;
