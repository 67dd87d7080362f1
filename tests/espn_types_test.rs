//! Wire-format tests for ESPN payloads

use espn_wbb::{espn::types::*, EventId, TeamId};
use serde_json::json;

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_schedule_event_with_object_scores() {
        let schedule: Schedule = serde_json::from_value(json!({"events": [{
            "id": 401700001,
            "date": "2025-11-04T03:00Z",
            "competitions": [{
                "date": "2025-11-04T03:00Z",
                "status": {"type": {"state": "post", "completed": true}},
                "competitors": [
                    {"homeAway": "home", "team": {"id": 30, "abbreviation": "USC", "location": "USC"},
                     "score": {"value": 83.0, "displayValue": "83"},
                     "records": [{"type": "total", "summary": "1-0"}]},
                    {"homeAway": "away", "team": {"id": "2", "abbreviation": "AUB"},
                     "score": {"value": 55.0, "displayValue": "55"}}
                ]
            }]
        }]}))
        .unwrap();

        let event = &schedule.events[0];
        assert_eq!(event.id, EventId::new("401700001"));
        assert_eq!(event.state(), GameState::Post);

        let comp = event.competition().unwrap();
        let usc = comp.competitor_for(&TeamId::new("30")).unwrap();
        assert!(usc.is_home());
        assert_eq!(usc.score_display(), "83");
        assert_eq!(usc.total_record(), Some("1-0"));

        let opp = comp.opponent_of(&TeamId::new("30")).unwrap();
        assert_eq!(opp.team.school(), "AUB");
        assert_eq!(opp.total_record(), None);
        assert_eq!(
            comp.start_time().map(|t| t.to_rfc3339()),
            Some("2025-11-04T03:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_summary_defaults() {
        let summary: GameSummary = serde_json::from_value(json!({})).unwrap();
        assert!(summary.competition().is_none());
        assert!(summary.plays.is_empty());
        assert_eq!(summary.game_info.attendance, 0);
        assert!(summary.home_team_id().is_empty());
    }

    #[test]
    fn test_standings_seed_and_stats() {
        let entry: StandingsEntry = serde_json::from_value(json!({
            "team": {"id": 2294, "abbreviation": "IOWA", "location": "Iowa"},
            "stats": [
                {"type": "playoffseed", "displayValue": "3"},
                {"type": "vsconf", "displayValue": "10-2"}
            ]
        }))
        .unwrap();
        assert_eq!(entry.seed(), 3);
        assert_eq!(entry.stat("vsconf"), Some("10-2"));
        assert_eq!(entry.stat("streak"), None);

        let unseeded: StandingsEntry = serde_json::from_value(json!({"team": {}})).unwrap();
        assert_eq!(unseeded.seed(), 99);
    }

    #[test]
    fn test_team_statistics_lookup() {
        let stats: TeamStatistics = serde_json::from_value(json!({
            "team": {"id": "30"},
            "statistics": [{"name": "pointsInPaint", "displayValue": "34"}]
        }))
        .unwrap();
        assert_eq!(stats.stat("pointsInPaint"), Some("34"));
        assert_eq!(stats.stat("fastBreakPoints"), None);
    }
}
