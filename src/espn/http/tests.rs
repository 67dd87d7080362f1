//! HTTP client tests against a mocked ESPN API

use super::*;
use crate::espn::types::GameState;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> EspnClient {
    EspnClient::with_base_urls(BaseUrls::single(&server.uri())).unwrap()
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[test]
    fn test_team_id_from_ref() {
        assert_eq!(
            team_id_from_ref("http://sports.core.api.espn.com/v2/teams/2483?lang=en"),
            Some(TeamId::new("2483"))
        );
        assert_eq!(team_id_from_ref("http://x/teams/"), None);
        assert_eq!(team_id_from_ref(""), None);
    }

    #[test]
    fn test_base_urls() {
        let urls = BaseUrls::single("http://127.0.0.1:9999/");
        assert_eq!(urls.site, "http://127.0.0.1:9999");
        assert_eq!(BaseUrls::default().site, SITE_API_BASE);
    }

    #[tokio::test]
    async fn test_team_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/30/schedule"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{
                    "id": "401700001",
                    "date": "2025-11-04T03:00Z",
                    "competitions": [{"status": {"type": {"state": "post", "completed": true}}}]
                }]
            })))
            .mount(&server)
            .await;

        let schedule = client_for(&server)
            .team_schedule(&TeamId::new("30"))
            .await
            .unwrap();
        assert_eq!(schedule.events.len(), 1);
        assert_eq!(schedule.events[0].id, EventId::new("401700001"));
        assert_eq!(schedule.events[0].state(), GameState::Post);
    }

    #[tokio::test]
    async fn test_game_summary_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/summary"))
            .and(query_param("event", "401700002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "gameInfo": {"venue": {"fullName": "Galen Center"}, "attendance": 5012},
                "plays": [{"type": {"text": "Jumpball"}, "period": {"number": 1}}]
            })))
            .mount(&server)
            .await;

        let summary = client_for(&server)
            .game_summary(&EventId::new("401700002"))
            .await
            .unwrap();
        assert_eq!(summary.game_info.venue.full_name, "Galen Center");
        assert_eq!(summary.game_info.attendance, 5012);
        assert_eq!(summary.plays.len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scoreboard"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        match client_for(&server).scoreboard().await {
            Err(crate::EspnError::Http(e)) => assert_eq!(e.status().map(|s| s.as_u16()), Some(503)),
            other => panic!("Expected Http error, got {:?}", other.map(|s| s.events.len())),
        }
    }

    #[tokio::test]
    async fn test_rankings_uses_ap_poll() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rankings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rankings": [
                    {"name": "USA Today Coaches Poll", "ranks": [
                        {"current": 1, "team": {"abbreviation": "SC"}}
                    ]},
                    {"name": "AP Top 25", "ranks": [
                        {"current": 2, "team": {"abbreviation": "USC"}},
                        {"current": 7, "team": {"abbreviation": "UCLA"}},
                        {"current": 0, "team": {"abbreviation": "NU"}}
                    ]}
                ]
            })))
            .mount(&server)
            .await;

        let ranks = client_for(&server).rankings().await.unwrap();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks.get("USC"), Some(&2));
        assert_eq!(ranks.get("SC"), None);
    }

    #[tokio::test]
    async fn test_standings_sorted_by_seed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("group", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "standings": {"entries": [
                    {"team": {"id": "77", "abbreviation": "NU"}, "stats": []},
                    {"team": {"id": "30", "abbreviation": "USC"},
                     "stats": [{"type": "playoffseed", "displayValue": "2"}]},
                    {"team": {"id": "2509", "abbreviation": "PUR"},
                     "stats": [{"type": "playoffseed", "displayValue": "14"}]},
                    {"team": {"id": "26", "abbreviation": "UCLA"},
                     "stats": [{"type": "playoffseed", "displayValue": "1"}]}
                ]}
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server)
            .conference_standings(&Conference::default())
            .await
            .unwrap();
        let order: Vec<_> = entries.iter().map(|e| e.team.abbreviation.as_str()).collect();
        assert_eq!(order, vec!["UCLA", "USC", "PUR", "NU"]);
    }

    #[tokio::test]
    async fn test_empty_standings_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"standings": {}})))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .conference_standings(&Conference::default())
            .await;
        assert!(matches!(result, Err(crate::EspnError::NoData)));
    }

    #[tokio::test]
    async fn test_conference_leaders_resolve_names_once() {
        let server = MockServer::start().await;
        let athlete = format!("{}/athletes/4433", server.uri());
        let leaders: Vec<_> = (0..12)
            .map(|i| {
                json!({
                    "displayValue": format!("{}.0", 25 - i),
                    "athlete": {"$ref": athlete},
                    "team": {"$ref": "http://sports.core.api.espn.com/v2/teams/30?lang=en"}
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/seasons/2026/types/2/groups/7/leaders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": [
                    {"name": "reboundsPerGame", "leaders": [leaders[0].clone()]},
                    {"name": "pointsPerGame", "leaders": leaders},
                    {"name": "foulsPerGame", "leaders": []}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/athletes/4433"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"displayName": "JuJu Watkins"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let abbrevs = HashMap::from([(TeamId::new("30"), "USC".to_string())]);
        let result = client_for(&server)
            .conference_leaders(&Conference::default(), &abbrevs)
            .await
            .unwrap();

        let headings: Vec<_> = result.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(headings, vec!["PTS PER GAME", "REB PER GAME"]);
        assert_eq!(result[0].1.len(), LEADERS_PER_CATEGORY);
        assert_eq!(result[0].1[0].name, "JuJu Watkins");
        assert_eq!(result[0].1[0].team, "USC");
        assert_eq!(result[0].1[0].value, "25.0");
    }

    #[tokio::test]
    async fn test_unresolvable_athlete_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/seasons/2026/types/2/groups/7/leaders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": [{"name": "stealsPerGame", "leaders": [
                    {"displayValue": "3.1",
                     "athlete": {"$ref": format!("{}/athletes/missing", server.uri())},
                     "team": {"$ref": "http://x/teams/999"}}
                ]}]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .conference_leaders(&Conference::default(), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(result[0].1[0].name, "Unknown");
        assert_eq!(result[0].1[0].team, "???");
    }
}
