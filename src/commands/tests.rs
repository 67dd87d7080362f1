//! Tests for command handlers and the update trigger

use super::common::{find_team_game, team_records, wants_odds};
use super::*;
use crate::cli::types::ids::TeamId;
use crate::cli::types::team::TrackedTeam;
use crate::espn::types::{Schedule, Scoreboard};
use crate::espn::{BaseUrls, EspnClient, OddsClient};
use crate::EventId;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn usc() -> TeamId {
    TeamId::new("30")
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 18, hour, minute, 0).unwrap()
}

fn event(id: &str, state: &str, date: &str, opponent: &str) -> Value {
    json!({
        "id": id,
        "competitions": [{
            "date": date,
            "status": {"type": {"state": state}},
            "competitors": [
                {"homeAway": "home", "team": {"id": "30", "abbreviation": "USC",
                 "displayName": "USC Trojans"},
                 "score": {"value": 70.0, "displayValue": "70"},
                 "records": [{"type": "total", "summary": "15-3"}]},
                {"homeAway": "away", "team": {"id": opponent, "abbreviation": "OPP",
                 "displayName": "Opponent"},
                 "score": {"value": 60.0, "displayValue": "60"},
                 "records": [{"type": "total", "summary": "9-9"}]}
            ]
        }]
    })
}

fn events(list: Vec<Value>) -> Schedule {
    serde_json::from_value(json!({ "events": list })).unwrap()
}

#[cfg(test)]
mod update_tests {
    use super::*;

    #[test]
    fn test_pregame_window() {
        let scoreboard = Scoreboard::default();
        let schedule = events(vec![event("1", "pre", "2026-01-18T22:00Z", "26")]);

        let d = should_update(&schedule, &scoreboard, &usc(), at(21, 30), 60);
        assert!(d.update);
        assert_eq!(d.reason, "Game starts in 30 minutes");

        let d = should_update(&schedule, &scoreboard, &usc(), at(21, 0), 60);
        assert!(d.update);
        assert_eq!(d.reason, "Game starts in 60 minutes");
    }

    #[test]
    fn test_outside_window() {
        let scoreboard = Scoreboard::default();
        let schedule = events(vec![event("1", "pre", "2026-01-18T22:00Z", "26")]);

        let d = should_update(&schedule, &scoreboard, &usc(), at(19, 0), 60);
        assert!(!d.update);
        assert_eq!(d.reason, "No game live or imminent");

        let d = should_update(&schedule, &scoreboard, &usc(), at(22, 40), 60);
        assert!(!d.update);
    }

    #[test]
    fn test_late_start() {
        let scoreboard = Scoreboard::default();
        let schedule = events(vec![event("1", "pre", "2026-01-18T22:00Z", "26")]);

        let d = should_update(&schedule, &scoreboard, &usc(), at(22, 10), 60);
        assert!(d.update);
        assert_eq!(d.reason, "Game should be starting now");

        // Thirty minutes late is still inside the window.
        let d = should_update(&schedule, &scoreboard, &usc(), at(22, 30), 60);
        assert!(d.update);
    }

    #[test]
    fn test_live_and_finished() {
        let live = events(vec![
            event("1", "post", "2026-01-10T22:00Z", "26"),
            event("2", "in", "2026-01-18T22:00Z", "26"),
        ]);
        let d = should_update(&live, &Scoreboard::default(), &usc(), at(22, 30), 60);
        assert_eq!(d.reason, "Game is LIVE");

        let scoreboard = events(vec![event("3", "post", "2026-01-18T19:00Z", "26")]);
        let d = should_update(&Schedule::default(), &scoreboard, &usc(), at(22, 30), 60);
        assert!(d.update);
        assert_eq!(d.reason, "Game just finished");
    }

    #[test]
    fn test_find_team_game_prefers_scoreboard() {
        let scoreboard = events(vec![event("9", "pre", "2026-01-18T22:00Z", "26")]);
        let schedule = events(vec![event("2", "in", "2026-01-18T20:00Z", "26")]);

        let (ev, _) = find_team_game(&scoreboard, &schedule, &usc()).unwrap();
        assert_eq!(ev.id, EventId::new("9"));

        let empty = Scoreboard::default();
        let (ev, comp) = find_team_game(&empty, &schedule, &usc()).unwrap();
        assert_eq!(ev.id, EventId::new("2"));
        assert!(comp.involves(&usc()));

        let other = events(vec![event("5", "pre", "2026-01-18T22:00Z", "26")]);
        assert!(find_team_game(&other, &Schedule::default(), &TeamId::new("77")).is_none());
    }

    #[test]
    fn test_team_records_latest_wins() {
        let mut later = event("2", "post", "2026-01-12T22:00Z", "26");
        later["competitions"][0]["competitors"][0]["records"] =
            json!([{"type": "total", "summary": "16-3"}]);
        let schedule = events(vec![
            event("1", "post", "2026-01-10T22:00Z", "26"),
            later,
            event("3", "pre", "2026-01-20T22:00Z", "127"),
        ]);

        let records = team_records(&schedule);
        assert_eq!(records.get("USC").map(String::as_str), Some("16-3"));
        assert_eq!(records.get("OPP").map(String::as_str), Some("9-9"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_wants_odds() {
        let schedule = events(vec![
            event("1", "pre", "2026-01-18T22:00Z", "26"),
            event("2", "post", "2026-01-18T18:00Z", "26"),
        ]);
        let pre = schedule.events[0].competition().unwrap();
        let post = schedule.events[1].competition().unwrap();

        assert!(wants_odds(pre, at(21, 30), 60));
        assert!(!wants_odds(pre, at(19, 0), 60));
        assert!(!wants_odds(post, at(18, 30), 60));
    }

    #[test]
    fn test_site_config_team_lookup() {
        let config = SiteConfig::default();
        assert_eq!(config.team("nu").map(|t| t.id.clone()), Some(TeamId::new("77")));
        assert!(config.team("UCLA").is_none());
        assert_eq!(config.pregame_window, 60);
    }
}

#[cfg(test)]
mod handler_tests {
    use super::*;

    fn summary_payload() -> Value {
        json!({
            "header": {"competitions": [{
                "date": "2026-01-10T22:00Z",
                "status": {"type": {"state": "post", "detail": "Final"}, "period": 4},
                "competitors": [
                    {"homeAway": "home", "score": "70",
                     "team": {"id": "30", "abbreviation": "USC", "location": "USC", "name": "Trojans"}},
                    {"homeAway": "away", "score": "60",
                     "team": {"id": "26", "abbreviation": "UCLA", "location": "UCLA", "name": "Bruins"}}
                ]
            }]},
            "boxscore": {"players": [
                {"team": {"id": "30", "abbreviation": "USC"}, "statistics": [{"athletes": [
                    {"athlete": {"id": "a1", "displayName": "JuJu Watkins", "jersey": "12"},
                     "starter": true,
                     "stats": ["30","20","8-15","2-5","2-2","7","3","2","1","1","2","5","3"]}
                ]}]}
            ]},
            "plays": [
                {"type": {"text": "JumpShot"}, "team": {"id": "30"}, "scoringPlay": true,
                 "scoreValue": 2, "homeScore": 2, "awayScore": 0,
                 "period": {"number": 1}, "clock": {"displayValue": "9:00"}}
            ]
        })
    }

    fn site_config(dir: &std::path::Path) -> SiteConfig {
        SiteConfig::new(dir, dir.join("odds_cache.json"), chrono_tz::America::Los_Angeles)
    }

    fn clients(server: &MockServer) -> (EspnClient, OddsClient) {
        let espn = EspnClient::with_base_urls(BaseUrls::single(&server.uri())).unwrap();
        let odds = OddsClient::with_base_url(reqwest::Client::new(), &server.uri(), None);
        (espn, odds)
    }

    async fn mount_json(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_handle_game_writes_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary"))
            .and(query_param("event", "401"))
            .respond_with(ResponseTemplate::new(200).set_body_json(summary_payload()))
            .mount(&server)
            .await;
        mount_json(&server, "/rankings", json!({"rankings": [
            {"name": "AP Top 25", "ranks": [{"current": 7, "team": {"abbreviation": "USC"}}]}
        ]}))
        .await;
        mount_json(
            &server,
            "/teams/30/schedule",
            json!({"events": [event("401", "post", "2026-01-10T22:00Z", "26")]}),
        )
        .await;

        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let (espn, odds) = clients(&server);
        let path = handle_game(&config, &espn, &odds, &EventId::new("401"), &TrackedTeam::usc())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("games").join("401.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>UCLA vs USC - USC WBB</title>"));
        assert!(html.contains("<b>#7 USC</b>"));
        // Record comes from the team schedule, not the summary header.
        assert!(html.contains("15-3"));
        assert!(html.contains("<b>Lead Changes:</b> 0"));
    }

    #[tokio::test]
    async fn test_handle_game_without_header() {
        let server = MockServer::start().await;
        mount_json(&server, "/summary", json!({})).await;

        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let (espn, odds) = clients(&server);
        let result =
            handle_game(&config, &espn, &odds, &EventId::new("999"), &TrackedTeam::usc()).await;

        match result {
            Err(crate::EspnError::GameNotFound { event_id }) => assert_eq!(event_id, "999"),
            other => panic!("Expected GameNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_standings() {
        let server = MockServer::start().await;
        mount_json(&server, "/rankings", json!({"rankings": []})).await;
        mount_json(&server, "/standings", json!({"standings": {"entries": [
            {"team": {"id": "2294", "abbreviation": "IOWA", "location": "Iowa"},
             "stats": [{"type": "playoffseed", "displayValue": "2"}]},
            {"team": {"id": "30", "abbreviation": "USC", "location": "USC"},
             "stats": [{"type": "playoffseed", "displayValue": "1"}]}
        ]}}))
        .await;
        // No leaders route: the page is still written, without leader tables.

        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let (espn, _) = clients(&server);
        let path = handle_standings(&config, &espn).await.unwrap();

        assert_eq!(path, dir.path().join("b1g.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        let usc = html.find(" 1  USC").unwrap();
        let iowa = html.find(" 2  Iowa").unwrap();
        assert!(usc < iowa);
        assert!(!html.contains("PTS PER GAME"));
    }

    #[tokio::test]
    async fn test_handle_site_skips_when_quiet() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/teams/30/schedule",
            json!({"events": [event("401", "post", "2025-11-04T03:00Z", "26")]}),
        )
        .await;
        mount_json(&server, "/teams/77/schedule", json!({"events": []})).await;
        mount_json(&server, "/scoreboard", json!({"events": []})).await;

        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let (espn, odds) = clients(&server);
        let outcome = handle_site(&config, &espn, &odds, false).await.unwrap();

        assert_eq!(
            outcome,
            SiteOutcome::Skipped("No game live or imminent".to_string())
        );
        assert!(!dir.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_handle_site_forced() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/teams/30/schedule",
            json!({"events": [event("401", "post", "2025-11-04T03:00Z", "26")]}),
        )
        .await;
        mount_json(&server, "/teams/77/schedule", json!({"events": []})).await;
        mount_json(&server, "/scoreboard", json!({"events": []})).await;
        mount_json(&server, "/rankings", json!({"rankings": []})).await;
        mount_json(&server, "/summary", summary_payload()).await;
        mount_json(&server, "/standings", json!({"standings": {"entries": [
            {"team": {"id": "30", "abbreviation": "USC", "location": "USC"}, "stats": []}
        ]}}))
        .await;

        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let (espn, odds) = clients(&server);
        let outcome = handle_site(&config, &espn, &odds, true).await.unwrap();

        assert_eq!(outcome, SiteOutcome::Updated { game_pages: 1 });
        for page in ["index.html", "schedule.html", "nu.html", "nu-schedule.html", "b1g.html"] {
            assert!(dir.path().join(page).exists(), "missing {page}");
        }
        assert!(dir.path().join("games").join("401.html").exists());

        let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(home.contains("USC SEASON STATS"));
        assert!(home.contains("JuJu Watkins #12"));
        let nu = std::fs::read_to_string(dir.path().join("nu.html")).unwrap();
        assert!(!nu.contains("SEASON STATS"));
    }
}
