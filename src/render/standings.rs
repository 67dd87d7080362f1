//! Conference standings and statistical leaders.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{escape, nav_line, page_top, rank_prefix, row_class, rule, NavTab, Shell, VERSION};
use crate::cli::types::team::{Conference, TrackedTeam};
use crate::espn::types::{ConferenceLeader, StandingsEntry};

const TEAM_WIDTH: usize = 18;

pub struct StandingsPage<'a> {
    pub conference: &'a Conference,
    pub teams: &'a [TrackedTeam],
    /// Already in seed order.
    pub standings: &'a [StandingsEntry],
    pub rankings: &'a HashMap<String, u32>,
    pub leaders: &'a [(String, Vec<ConferenceLeader>)],
}

impl StandingsPage<'_> {
    pub fn render(&self, now: &DateTime<Tz>) -> String {
        let mut lines = page_top(now);
        lines.push(nav_line(self.teams, self.conference, NavTab::Conference));
        lines.push(String::new());
        lines.push(format!("{} Standings", self.conference.name));
        lines.push(rule('='));
        lines.push(format!(
            "{:>2}  {:<18} {:>7} {:>7} {:>5}",
            "", "Team", "Conf", "Overall", "Strk"
        ));
        lines.push(rule('-'));

        let rows: Vec<String> = self
            .standings
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let abbrev = &entry.team.abbreviation;
                let rank = self.rankings.get(abbrev).copied();
                let name: String = format!("{}{}", rank_prefix(rank), entry.team.school())
                    .chars()
                    .take(TEAM_WIDTH)
                    .collect();
                let text = format!(
                    "{:>2}  {:<18} {:>7} {:>7} {:>5}",
                    entry.seed(),
                    name,
                    entry.stat("vsconf").unwrap_or_default(),
                    entry.stat("total").unwrap_or_default(),
                    entry.stat("streak").unwrap_or_default(),
                );
                self.highlight(idx, abbrev, &text)
            })
            .collect();
        lines.push(rows.concat());

        for (category, leaders) in self.leaders {
            lines.push(String::new());
            lines.push(rule('='));
            lines.push(format!("{:>2}  {:<28} {:>7}", "", category, "Value"));
            lines.push(rule('-'));
            let rows: Vec<String> = leaders
                .iter()
                .enumerate()
                .map(|(idx, leader)| {
                    let text = format!(
                        "{:>2}  {:<21} {:<7} {:>7}",
                        idx + 1,
                        leader.name,
                        leader.team,
                        leader.value
                    );
                    self.highlight(idx, &leader.team, &text)
                })
                .collect();
            lines.push(rows.concat());
        }

        lines.push(format!("\n{VERSION}"));

        Shell::new(&format!("{} WBB Standings", self.conference.name))
            .wrap(&lines.join("\n"), now)
    }

    /// Rows are striped in pairs; tracked teams are bold in their colour.
    fn highlight(&self, idx: usize, abbrev: &str, text: &str) -> String {
        let class = row_class(idx / 2);
        match self.teams.iter().find(|t| t.abbrev == abbrev) {
            Some(team) => format!(
                "<span class=\"{}\" style=\"color: #{};\"><b>{}</b></span>",
                class,
                team.color,
                escape(text)
            ),
            None => format!("<span class=\"{}\">{}</span>", class, escape(text)),
        }
    }
}
