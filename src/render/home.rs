//! Team home page: today's games, season stats, upcoming games and recent
//! results.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{
    escape, home_away, nav_line, page_top, player_lines, rank_prefix, result_letter, rule, NavTab,
    Shell, Zebra, LIVE_MARKER, VERSION,
};
use crate::cli::types::ids::EventId;
use crate::cli::types::team::{Conference, TrackedTeam};
use crate::espn::types::{Competition, Competitor, Event, GameState, Schedule};
use crate::stats::SeasonLine;

const UPCOMING_GAMES: usize = 5;
const RECENT_RESULTS: usize = 5;

/// One line of the "today" block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayGame {
    /// Live games sort first (0), then by tip-off timestamp.
    pub sort_key: i64,
    pub abbrev: String,
    /// `"vs Iowa"` / `"at Illinois"`.
    pub matchup: String,
    /// HTML status: LIVE link with period, clock and score, or tip-off time.
    pub status: String,
}

/// `1st`..`4th`, `OT1`.., or `Half` during halftime.
pub fn period_label(competition: &Competition) -> (String, String) {
    let status = &competition.status;
    if status
        .status_type
        .detail
        .to_lowercase()
        .starts_with("half")
    {
        return ("Half".to_string(), String::new());
    }
    let period = match status.period {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        4 => "4th".to_string(),
        p if p > 4 => format!("OT{}", p - 4),
        _ => String::new(),
    };
    (period, status.display_clock.clone())
}

fn opponent_name(competition: &Competition, team: &TrackedTeam) -> String {
    competition
        .opponent_of(&team.id)
        .map(|c| c.team.school().to_string())
        .unwrap_or_else(|| "OPP".to_string())
}

fn matchup(competition: &Competition, team: &TrackedTeam) -> String {
    format!(
        "{} {}",
        home_away(competition.competitor_for(&team.id)),
        opponent_name(competition, team)
    )
}

/// Today's entries for one tracked team. A live game replaces any pregame
/// lines; otherwise every scheduled game tipping off today (in `now`'s
/// timezone) is listed.
pub fn today_entries(
    team: &TrackedTeam,
    live: Option<(&EventId, &Competition)>,
    schedule: &Schedule,
    now: &DateTime<Tz>,
) -> Vec<TodayGame> {
    if let Some((event_id, comp)) = live.filter(|(_, c)| c.state() == GameState::Live) {
        let (period, clock) = period_label(comp);
        let score = |c: Option<&Competitor>| {
            c.map(|c| c.score_display())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "0".to_string())
        };
        let clock_part = if clock.is_empty() {
            String::new()
        } else {
            format!(" {clock}")
        };
        let status = format!(
            "<a href=\"{}/{}.html\">{}</a> {}{} {}-{}",
            team.games_dir,
            event_id,
            LIVE_MARKER,
            period,
            clock_part,
            score(comp.competitor_for(&team.id)),
            score(comp.opponent_of(&team.id)),
        );
        return vec![TodayGame {
            sort_key: 0,
            abbrev: team.abbrev.clone(),
            matchup: matchup(comp, team),
            status,
        }];
    }

    let tz = now.timezone();
    schedule
        .events
        .iter()
        .filter_map(|event| {
            let comp = event.competition()?;
            if comp.state() != GameState::Pre {
                return None;
            }
            let start = comp.start_time()?.with_timezone(&tz);
            (start.date_naive() == now.date_naive()).then(|| TodayGame {
                sort_key: start.timestamp(),
                abbrev: team.abbrev.clone(),
                matchup: matchup(comp, team),
                status: start.format("%-I:%M %p").to_string(),
            })
        })
        .collect()
}

fn today_lines(mut games: Vec<TodayGame>) -> Vec<String> {
    games.sort_by_key(|g| g.sort_key);
    match games.as_slice() {
        [] => vec!["\nNo game today.".to_string()],
        [game] => vec![
            String::new(),
            format!("{} {} {}", game.abbrev, escape(&game.matchup), game.status),
        ],
        _ => {
            let width = games
                .iter()
                .map(|g| g.matchup.chars().count())
                .max()
                .unwrap_or(0);
            games
                .iter()
                .flat_map(|g| {
                    [
                        String::new(),
                        format!(
                            "{:<3} {} {}",
                            g.abbrev,
                            escape(&format!("{:<width$}", g.matchup)),
                            g.status
                        ),
                    ]
                })
                .collect()
        }
    }
}

/// Date text for a schedule line, falling back to the raw date prefix.
pub(crate) fn event_date(event: &Event, tz: &Tz, format: &str, missing: &str) -> String {
    match event.start_time() {
        Some(t) => t.with_timezone(tz).format(format).to_string(),
        None => {
            let raw = event
                .competition()
                .map(|c| c.date.as_str())
                .filter(|d| !d.is_empty())
                .unwrap_or(&event.date);
            if raw.is_empty() {
                missing.to_string()
            } else {
                raw.chars().take(10).collect()
            }
        }
    }
}

pub struct HomePage<'a> {
    pub team: &'a TrackedTeam,
    /// Every tracked team, for the navigation line.
    pub teams: &'a [TrackedTeam],
    pub conference: &'a Conference,
    pub today: Vec<TodayGame>,
    pub season: &'a [SeasonLine],
    pub schedule: &'a Schedule,
    pub rankings: &'a HashMap<String, u32>,
}

impl HomePage<'_> {
    pub fn render(&self, now: &DateTime<Tz>) -> String {
        let team = self.team;
        let mut lines = page_top(now);
        lines.push(nav_line(self.teams, self.conference, NavTab::Team(&team.abbrev)));
        lines.push(String::new());
        lines.push(format!(
            "<a href=\"{}\">Full Schedule/Results</a>",
            team.schedule_page
        ));
        lines.push(String::new());
        lines.push(rule('='));
        lines.extend(today_lines(self.today.clone()));

        if !self.season.is_empty() {
            lines.push(String::new());
            lines.push(rule('='));
            let mut zebra = Zebra::default();
            let mut spans = vec![zebra.header(&team.color, &format!("{} SEASON STATS", team.abbrev))];
            for p in self.season {
                let (first, second) =
                    player_lines(&p.name, &p.jersey, Some(&p.totals), p.plus_minus);
                spans.push(zebra.row(&first, &second));
            }
            lines.push(spans.concat());
        }

        lines.push("\n".to_string());
        lines.push(rule('='));
        lines.push("UPCOMING SCHEDULE".to_string());
        lines.push(rule('-'));
        lines.extend(self.upcoming_lines(&now.timezone()));

        lines.push("\n".to_string());
        lines.push("RECENT RESULTS".to_string());
        lines.push(rule('-'));
        lines.extend(self.recent_lines(&now.timezone()));

        lines.push(format!("\n{VERSION}"));

        Shell::new(&format!("{} Women's Basketball", team.abbrev)).wrap(&lines.join("\n"), now)
    }

    fn rank_of(&self, abbrev: &str) -> Option<u32> {
        self.rankings.get(abbrev).copied()
    }

    fn upcoming_lines(&self, tz: &Tz) -> Vec<String> {
        self.schedule
            .events
            .iter()
            .filter(|e| e.state() == GameState::Pre)
            .take(UPCOMING_GAMES)
            .filter_map(|event| {
                let comp = event.competition()?;
                let opp = comp.opponent_of(&self.team.id)?;
                let date = event_date(event, tz, "%a %b %d %I:%M%p %Z", "TBD");
                let where_ = if opp.home_away == "away" { "vs" } else { "at" };
                let ours = match self.rank_of(&self.team.abbrev) {
                    Some(r) if r > 0 => format!("(#{r})"),
                    _ => String::new(),
                };
                let line = format!(
                    "{} {} {}{} {}",
                    date,
                    where_,
                    rank_prefix(self.rank_of(&opp.team.abbreviation)),
                    escape(&opp.team.abbreviation),
                    ours
                );
                Some(line.trim_end().to_string())
            })
            .collect()
    }

    fn recent_lines(&self, tz: &Tz) -> Vec<String> {
        let completed: Vec<&Event> = self
            .schedule
            .events
            .iter()
            .filter(|e| e.state() == GameState::Post)
            .collect();
        let skip = completed.len().saturating_sub(RECENT_RESULTS);

        completed[skip..]
            .iter()
            .filter_map(|event| {
                let comp = event.competition()?;
                let us = comp.competitor_for(&self.team.id)?;
                let opp = comp.opponent_of(&self.team.id)?;
                let (ours, theirs) = (us.score_display(), opp.score_display());
                let where_ = if opp.home_away == "away" { "vs" } else { "at" };
                Some(format!(
                    "{} {} {}-{} {} {}{}",
                    event_date(event, tz, "%b %d", ""),
                    result_letter(&ours, &theirs),
                    ours,
                    theirs,
                    where_,
                    rank_prefix(self.rank_of(&opp.team.abbreviation)),
                    escape(&opp.team.abbreviation),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Shooting, StatLine};
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Tz> {
        chrono_tz::America::Los_Angeles
            .with_ymd_and_hms(2026, 1, 18, 12, 0, 0)
            .unwrap()
    }

    fn event(
        id: &str,
        date: &str,
        state: &str,
        opp: &str,
        usc_home: bool,
        scores: (&str, &str),
    ) -> serde_json::Value {
        let (us_side, opp_side) = if usc_home { ("home", "away") } else { ("away", "home") };
        json!({
            "id": id,
            "date": date,
            "competitions": [{
                "date": date,
                "status": {"type": {"state": state, "detail": ""}, "period": 2, "displayClock": "8:58"},
                "competitors": [
                    {"homeAway": us_side, "team": {"id": "30", "abbreviation": "USC", "location": "USC"},
                     "score": scores.0},
                    {"homeAway": opp_side, "team": {"id": "99", "abbreviation": opp, "location": opp},
                     "score": scores.1}
                ]
            }]
        })
    }

    fn schedule(events: Vec<serde_json::Value>) -> Schedule {
        serde_json::from_value(json!({ "events": events })).unwrap()
    }

    #[test]
    fn test_period_label() {
        let mut comp: Competition = serde_json::from_value(json!({
            "status": {"type": {"state": "in", "detail": "Halftime"}, "period": 2, "displayClock": "0:00"}
        }))
        .unwrap();
        assert_eq!(period_label(&comp), ("Half".to_string(), String::new()));

        comp.status.status_type.detail = "6:12 - 3rd Quarter".to_string();
        comp.status.period = 3;
        comp.status.display_clock = "6:12".to_string();
        assert_eq!(period_label(&comp).0, "3rd");

        comp.status.period = 6;
        assert_eq!(period_label(&comp).0, "OT2");
    }

    #[test]
    fn test_today_live_entry() {
        let sched = schedule(vec![event("401", "2026-01-18T20:00Z", "in", "IOWA", true, ("70", "62"))]);
        let team = TrackedTeam::usc();
        let ev = &sched.events[0];
        let entries = today_entries(&team, Some((&ev.id, &ev.competitions[0])), &sched, &now());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sort_key, 0);
        assert_eq!(entries[0].matchup, "vs IOWA");
        assert_eq!(
            entries[0].status,
            format!("<a href=\"games/401.html\">{LIVE_MARKER}</a> 2nd 8:58 70-62")
        );
    }

    #[test]
    fn test_today_pregame_entry_uses_local_date() {
        // 03:00Z on the 19th is 7pm on the 18th in Los Angeles.
        let sched = schedule(vec![
            event("402", "2026-01-19T03:00Z", "pre", "ILL", false, ("", "")),
            event("403", "2026-01-20T03:00Z", "pre", "MD", true, ("", "")),
        ]);
        let entries = today_entries(&TrackedTeam::usc(), None, &sched, &now());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].matchup, "at ILL");
        assert_eq!(entries[0].status, "7:00 PM");
    }

    #[test]
    fn test_today_lines_alignment() {
        let games = vec![
            TodayGame {
                sort_key: 1_000,
                abbrev: "NU".to_string(),
                matchup: "at Illinois".to_string(),
                status: "5:00 PM".to_string(),
            },
            TodayGame {
                sort_key: 0,
                abbrev: "USC".to_string(),
                matchup: "vs Iowa".to_string(),
                status: "LIVE".to_string(),
            },
        ];
        let lines = today_lines(games);
        assert_eq!(lines[1], "USC vs Iowa     LIVE");
        assert_eq!(lines[3], "NU  at Illinois 5:00 PM");
        assert_eq!(today_lines(vec![]), vec!["\nNo game today.".to_string()]);
    }

    #[test]
    fn test_render_home_page() {
        let sched = schedule(vec![
            event("1", "2025-11-04T03:00Z", "post", "UCLA", true, ("80", "75")),
            event("2", "2025-11-08T03:00Z", "post", "UCI", false, ("60", "66")),
            event("3", "2026-01-25T22:00Z", "pre", "MSU", false, ("", "")),
        ]);
        let rankings = HashMap::from([("UCLA".to_string(), 2), ("USC".to_string(), 7)]);
        let season = vec![SeasonLine {
            athlete: "1".into(),
            name: "JuJu Watkins".to_string(),
            jersey: "12".to_string(),
            games: 2,
            totals: StatLine {
                minutes: 60,
                points: 50,
                fg: Shooting::new(18, 40),
                ..StatLine::default()
            },
            plus_minus: 12,
        }];
        let teams = TrackedTeam::defaults();
        let conf = Conference::default();
        let page = HomePage {
            team: &teams[0],
            teams: &teams,
            conference: &conf,
            today: vec![],
            season: &season,
            schedule: &sched,
            rankings: &rankings,
        };
        let html = page.render(&now());

        assert!(html.contains("<title>USC Women's Basketball</title>"));
        assert!(html.contains("<a href=\"schedule.html\">Full Schedule/Results</a>"));
        assert!(html.contains("No game today."));
        assert!(html.contains("<b>USC SEASON STATS</b>"));
        assert!(html.contains("JuJu Watkins #12"));
        assert!(html.contains("Sun Jan 25 02:00PM PST at MSU (#7)"));
        assert!(html.contains("Nov 03 W 80-75 vs #2 UCLA"));
        assert!(html.contains("Nov 07 L 60-66 at UCI"));
        assert!(html.contains(VERSION));
    }
}
