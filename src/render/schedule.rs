//! Full schedule page: every result (linked to its game report) and every
//! game still to be played.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use super::home::event_date;
use super::{
    escape, nav_line, page_top, rank_prefix, result_letter, rule, NavTab, Shell, LIVE_MARKER,
    VERSION,
};
use crate::cli::types::team::{Conference, TrackedTeam};
use crate::espn::types::{Competitor, Event, GameState, Schedule};

pub struct SchedulePage<'a> {
    pub team: &'a TrackedTeam,
    pub teams: &'a [TrackedTeam],
    pub conference: &'a Conference,
    pub schedule: &'a Schedule,
    pub rankings: &'a HashMap<String, u32>,
}

impl SchedulePage<'_> {
    pub fn render(&self, now: &DateTime<Tz>) -> String {
        let tz = now.timezone();
        let team = self.team;
        let mut lines = page_top(now);
        lines.push(nav_line(self.teams, self.conference, NavTab::Team(&team.abbrev)));
        lines.push(String::new());
        lines.push(format!("<a href=\"{}\">Back to Home</a>", team.home_page));
        lines.push(String::new());
        lines.push("Full Schedule/Results".to_string());
        lines.push(rule('='));

        let (completed, upcoming): (Vec<&Event>, Vec<&Event>) = self
            .schedule
            .events
            .iter()
            .partition(|e| e.state() == GameState::Post);

        lines.push("RESULTS".to_string());
        lines.push(rule('-'));
        lines.extend(completed.iter().filter_map(|e| self.result_line(e, &tz)));

        lines.push(String::new());
        lines.push("UPCOMING SCHEDULE".to_string());
        lines.push(rule('-'));
        lines.extend(upcoming.iter().filter_map(|e| self.upcoming_line(e, &tz)));

        lines.push(format!("\n{VERSION}"));

        Shell::new(&format!("{} WBB Schedule", team.abbrev)).wrap(&lines.join("\n"), now)
    }

    /// `vs`/`at` and the (ranked) opponent school.
    fn opponent<'e>(&self, event: &'e Event) -> Option<(&'e Competitor, String)> {
        let opp = event.competition()?.opponent_of(&self.team.id)?;
        let where_ = if opp.home_away == "away" { "vs" } else { "at" };
        let rank = self.rankings.get(&opp.team.abbreviation).copied();
        Some((
            opp,
            format!(
                "{} {}{}",
                where_,
                rank_prefix(rank),
                escape(opp.team.school())
            ),
        ))
    }

    fn result_line(&self, event: &Event, tz: &Tz) -> Option<String> {
        let (opp, against) = self.opponent(event)?;
        let ours = event
            .competition()
            .and_then(|c| c.competitor_for(&self.team.id))
            .map(Competitor::score_display)
            .unwrap_or_default();
        let theirs = opp.score_display();
        Some(format!(
            "<a href=\"{}/{}.html\">{} {} {}-{} {}</a>",
            self.team.games_dir,
            event.id,
            event_date(event, tz, "%b %d", "TBD"),
            result_letter(&ours, &theirs),
            ours,
            theirs,
            against
        ))
    }

    fn upcoming_line(&self, event: &Event, tz: &Tz) -> Option<String> {
        let (_, against) = self.opponent(event)?;
        if event.state() == GameState::Live {
            return Some(format!(
                "<a href=\"{}/{}.html\">{} {} {}</a>",
                self.team.games_dir,
                event.id,
                event_date(event, tz, "%b %d", ""),
                LIVE_MARKER,
                against
            ));
        }
        Some(format!(
            "{} {}",
            event_date(event, tz, "%b %d %I:%M%p", "TBD"),
            against
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn schedule() -> Schedule {
        serde_json::from_value(json!({"events": [
            {"id": "401", "competitions": [{
                "date": "2025-11-04T03:00Z",
                "status": {"type": {"state": "post"}},
                "competitors": [
                    {"homeAway": "home", "team": {"id": "30", "abbreviation": "USC", "location": "USC"},
                     "score": {"value": 80.0, "displayValue": "80"}},
                    {"homeAway": "away", "team": {"id": "26", "abbreviation": "UCLA", "location": "UCLA"},
                     "score": {"value": 75.0, "displayValue": "75"}}
                ]
            }]},
            {"id": "402", "competitions": [{
                "date": "2026-01-18T20:00Z",
                "status": {"type": {"state": "in"}},
                "competitors": [
                    {"homeAway": "away", "team": {"id": "30", "abbreviation": "USC"}},
                    {"homeAway": "home", "team": {"id": "2294", "abbreviation": "IOWA", "location": "Iowa"}}
                ]
            }]},
            {"id": "403", "competitions": [{
                "date": "2026-01-25T22:00Z",
                "status": {"type": {"state": "pre"}},
                "competitors": [
                    {"homeAway": "home", "team": {"id": "30", "abbreviation": "USC"}},
                    {"homeAway": "away", "team": {"id": "127", "abbreviation": "MSU", "location": "Michigan State"}}
                ]
            }]}
        ]}))
        .unwrap()
    }

    #[test]
    fn test_render_schedule_page() {
        let sched = schedule();
        let rankings = HashMap::from([("UCLA".to_string(), 2)]);
        let teams = TrackedTeam::defaults();
        let conf = Conference::default();
        let now = chrono_tz::America::Los_Angeles
            .with_ymd_and_hms(2026, 1, 18, 12, 30, 0)
            .unwrap();
        let html = SchedulePage {
            team: &teams[0],
            teams: &teams,
            conference: &conf,
            schedule: &sched,
            rankings: &rankings,
        }
        .render(&now);

        assert!(html.contains("<title>USC WBB Schedule</title>"));
        assert!(html.contains("<a href=\"index.html\">Back to Home</a>"));
        assert!(html.contains("<a href=\"games/401.html\">Nov 03 W 80-75 vs #2 UCLA</a>"));
        assert!(html.contains(&format!(
            "<a href=\"games/402.html\">Jan 18 {LIVE_MARKER} at Iowa</a>"
        )));
        assert!(html.contains("Jan 25 02:00PM vs Michigan State"));

        let results = html.find("RESULTS").unwrap();
        let upcoming = html.find("UPCOMING SCHEDULE").unwrap();
        assert!(results < html.find("games/401.html").unwrap());
        assert!(upcoming < html.find("games/402.html").unwrap());
    }
}
