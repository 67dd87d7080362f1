//! Game report: scoreboard header, line score, betting line, game-flow
//! chart, lead stats, team stats and both box scores.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{athlete_lines, escape, page_top, totals_lines, Shell, Zebra, VERSION};
use crate::cli::types::team::TrackedTeam;
use crate::espn::odds::GameOdds;
use crate::espn::types::{
    AthleteEntry, Competition, Competitor, GameState, GameSummary, TeamPlayers, TeamStatistics,
};
use crate::pbp::{GameAnalysis, GameFlowChart, LivePosition};
use crate::stats::{last_name, TeamTotals};

pub const PAGE_WIDTH: usize = 55;
const LEFT_CENTER: i64 = 13;
const RIGHT_CENTER: i64 = 41;
const PAGE_CENTER: i64 = 27;

/// Left margin in front of every chart row (label column).
const CHART_MARGIN: usize = 7;
const CHART_LEGEND: &str = "(1 dot = 3 pts)";
const OPPONENT_FALLBACK_COLOR: &str = "888888";

/// Current period and clock when the summary says the game is in progress.
pub fn live_position(summary: &GameSummary) -> Option<LivePosition> {
    let comp = summary.competition()?;
    (comp.state() == GameState::Live).then(|| LivePosition {
        period: comp.status.period,
        clock: comp.status.display_clock.parse().ok(),
    })
}

/// Centre `text` in `width` columns, putting the odd space on the left
/// when `width` is odd.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(margin - left))
}

/// `12345` -> `"12,345"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Odds prices and spreads read `+150`/`-110`.
fn plus_prefixed(value: &str) -> String {
    if value.is_empty() || value.starts_with('-') {
        value.to_string()
    } else {
        format!("+{value}")
    }
}

/// One piece of a header line, centred on a fixed column.
struct Cell {
    width: i64,
    html: String,
    center: i64,
}

impl Cell {
    fn new(text: &str, html: String, center: i64) -> Self {
        Self {
            width: text.chars().count() as i64,
            html,
            center,
        }
    }

    fn bold(text: &str, center: i64) -> Self {
        Self::new(text, format!("<b>{}</b>", escape(text)), center)
    }

    fn plain(text: &str, center: i64) -> Self {
        Self::new(text, escape(text), center)
    }
}

/// Lay cells out left to right, each centred on its column where room
/// allows and never closer than one space to the previous cell.
fn place(cells: &[Cell]) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for (i, cell) in cells.iter().enumerate() {
        let pad = cell.center - cell.width / 2 - cursor;
        let pad = if i == 0 { pad.max(0) } else { pad.max(1) };
        out.push_str(&" ".repeat(pad as usize));
        out.push_str(&cell.html);
        cursor += pad + cell.width;
    }
    out.trim_end().to_string()
}

fn score_or_zero(c: &Competitor) -> String {
    let s = c.score_display();
    if s.is_empty() {
        "0".to_string()
    } else {
        s
    }
}

fn sort_key(entry: &AthleteEntry) -> (i64, i64, &str) {
    let name = last_name(&entry.athlete.display_name);
    let num = |i: usize| -> Option<i64> {
        match entry.stats.get(i).map(|s| s.trim()) {
            None | Some("") | Some("--") => Some(0),
            Some(s) => s.parse().ok(),
        }
    };
    if entry.stats.len() < 6 {
        return (0, 0, name);
    }
    match (num(0), num(1)) {
        (Some(min), Some(pts)) => (-min, -pts, name),
        _ => (0, 0, name),
    }
}

/// Both sides of the game, ours first.
struct Sides<'a> {
    us: &'a Competitor,
    them: &'a Competitor,
}

pub struct GameReport<'a> {
    pub team: &'a TrackedTeam,
    pub summary: &'a GameSummary,
    pub analysis: &'a GameAnalysis,
    /// AP rank by team abbreviation.
    pub rankings: &'a HashMap<String, u32>,
    /// Latest overall record by team abbreviation.
    pub team_records: &'a HashMap<String, String>,
    pub odds: Option<&'a GameOdds>,
}

impl GameReport<'_> {
    pub fn render(&self, now: &DateTime<Tz>) -> String {
        let default_comp = Competition::default();
        let comp = self.summary.competition().unwrap_or(&default_comp);
        let default_side = Competitor::default();
        let home = comp.home().unwrap_or(&default_side);
        let away = comp.away().unwrap_or(&default_side);
        let sides = if away.team.id == self.team.id {
            Sides { us: away, them: home }
        } else {
            Sides { us: home, them: away }
        };

        let mut lines = page_top(now);
        lines.push(format!(
            "<a href=\"../{}\">&lt; {} Schedule</a>",
            self.team.schedule_page, self.team.abbrev
        ));
        lines.push(String::new());
        lines.extend(self.header_lines(comp, &sides));
        lines.extend(self.linescore_lines(&sides));
        lines.push(String::new());
        if let Some(odds) = self.odds {
            lines.extend(self.odds_lines(odds, home, away));
            lines.push(String::new());
        }
        if self.analysis.scoring_plays > 0 {
            lines.extend(self.flow_lines(&sides));
            lines.extend(self.lead_lines(&sides));
        }
        let info = &self.summary.game_info;
        if !info.venue.full_name.is_empty() {
            lines.push(format!("<b>Venue:</b> {}", escape(&info.venue.full_name)));
        }
        if info.attendance > 0 {
            lines.push(format!("<b>Attendance:</b> {}", thousands(info.attendance)));
        }
        lines.push(String::new());
        lines.extend(self.team_stats_lines());
        lines.push(self.box_scores());
        lines.push(String::new());
        lines.push(VERSION.to_string());

        let title = format!(
            "{} vs {} - {} WBB",
            abbrev_or(away, "AWAY"),
            abbrev_or(home, "HOME"),
            self.team.abbrev
        );
        let extra_css = format!(
            "        .game-flow {{\n            line-height: 0.5;\n            display: block;\n        }}\n        \
             .usc-dots {{\n            color: #{};\n        }}\n        \
             .dnp {{\n            color: #999999;\n        }}\n        \
             .live-clock {{\n            color: #cc0000;\n            font-weight: bold;\n        }}\n",
            self.team.color
        );
        Shell {
            title: &title,
            line_height: "1.3",
            extra_css: &extra_css,
        }
        .wrap(&lines.join("\n"), now)
    }

    fn rank_prefix(&self, c: &Competitor) -> String {
        super::rank_prefix(self.rankings.get(&c.team.abbreviation).copied())
    }

    fn record(&self, c: &Competitor) -> String {
        self.team_records
            .get(&c.team.abbreviation)
            .filter(|r| !r.is_empty())
            .map(String::as_str)
            .or_else(|| c.header_record())
            .unwrap_or_default()
            .to_string()
    }

    fn header_lines(&self, comp: &Competition, sides: &Sides<'_>) -> Vec<String> {
        let (us, them) = (sides.us, sides.them);
        let our_school = if us.team.location.is_empty() {
            self.team.abbrev.clone()
        } else {
            us.team.location.clone()
        };
        let our_school = format!("{}{}", self.rank_prefix(us), our_school);
        let their_school = format!("{}{}", self.rank_prefix(them), school_or(them, "OPP"));

        let status = &comp.status;
        let center_cell = if comp.state() == GameState::Live {
            let period = if status.period <= 4 {
                format!("Q{}", status.period)
            } else {
                format!("OT{}", status.period - 4)
            };
            let text = format!("{} {}", period, status.display_clock);
            let html = format!("<span class=\"live-clock\">{}</span>", escape(&text));
            Cell::new(&text, html, PAGE_CENTER)
        } else {
            let detail = if status.status_type.detail.is_empty() {
                "Final"
            } else {
                status.status_type.detail.as_str()
            };
            Cell::bold(detail, PAGE_CENTER)
        };

        let score = format!("{} - {}", score_or_zero(us), score_or_zero(them));
        let (our_record, their_record) = (self.record(us), self.record(them));

        let mut lines = vec![
            place(&[
                Cell::bold(&our_school, LEFT_CENTER),
                center_cell,
                Cell::bold(&their_school, RIGHT_CENTER),
            ]),
            place(&[
                Cell::bold(&us.team.name, LEFT_CENTER),
                Cell::plain(&score, PAGE_CENTER),
                Cell::bold(&them.team.name, RIGHT_CENTER),
            ]),
        ];

        match self.analysis.fouls.filter(|_| comp.state() == GameState::Live) {
            Some(f) => {
                let (our_fouls, their_fouls, our_tol, their_tol) = if us.is_home() {
                    (f.home_fouls, f.away_fouls, f.home_timeouts_left, f.away_timeouts_left)
                } else {
                    (f.away_fouls, f.home_fouls, f.away_timeouts_left, f.home_timeouts_left)
                };
                let fouls = format!("{our_fouls} TF {their_fouls}");
                lines.push(place(&[
                    Cell::plain(&our_record, LEFT_CENTER),
                    Cell::plain(&fouls, PAGE_CENTER),
                    Cell::plain(&their_record, RIGHT_CENTER),
                ]));
                let timeouts = format!("{our_tol} TOL {their_tol}");
                lines.push(place(&[Cell::plain(&timeouts, PAGE_CENTER)]));
            }
            None => lines.push(place(&[
                Cell::plain(&our_record, LEFT_CENTER),
                Cell::plain(&their_record, RIGHT_CENTER),
            ])),
        }
        lines
    }

    fn linescore_lines(&self, sides: &Sides<'_>) -> Vec<String> {
        let quarters = |c: &Competitor| -> Vec<String> {
            c.linescores
                .iter()
                .map(|l| {
                    if l.display_value.is_empty() {
                        "0".to_string()
                    } else {
                        l.display_value.clone()
                    }
                })
                .collect()
        };
        let (ours, theirs) = (quarters(sides.us), quarters(sides.them));
        let periods = ours.len().max(theirs.len()).max(4);
        let labels: String = (1..=periods)
            .map(|p| {
                let label = if p <= 4 {
                    p.to_string()
                } else {
                    format!("OT{}", p - 4)
                };
                format!("{label:>3}")
            })
            .collect();

        let header = format!("    {labels}   T");
        let width = header.chars().count();
        let pad = " ".repeat(PAGE_WIDTH.saturating_sub(width) / 2);
        let row = |abbrev: &str, quarters: &[String], score: String| {
            let cells: String = (0..periods)
                .map(|i| format!("{:>3}", quarters.get(i).map(String::as_str).unwrap_or("")))
                .collect();
            format!("{pad}{}", escape(&format!("{abbrev:<4}{cells} {score:>3}")))
        };

        vec![
            format!("{pad}{header}"),
            format!("{pad}{}", "-".repeat(width)),
            row(&self.team.abbrev, &ours, score_or_zero(sides.us)),
            row(&abbrev_or(sides.them, "OPP"), &theirs, score_or_zero(sides.them)),
        ]
    }

    fn odds_lines(&self, odds: &GameOdds, home: &Competitor, away: &Competitor) -> Vec<String> {
        let home_abbrev = abbrev_or(home, "HOME");
        let away_abbrev = abbrev_or(away, "AWAY");
        let abbrev_for = |display_name: &str, fallback: &str| -> String {
            if !display_name.is_empty() && display_name == home.team.display_name {
                home_abbrev.clone()
            } else if !display_name.is_empty() && display_name == away.team.display_name {
                away_abbrev.clone()
            } else {
                fallback.to_string()
            }
        };

        let mut lines = vec![center("CURRENT LINE", PAGE_WIDTH)];
        if let (Some(spread), Some(total)) = (&odds.spread, &odds.total) {
            let text = format!(
                "{} {} ({})  O/U {}",
                abbrev_for(&spread.team, &home_abbrev),
                plus_prefixed(&spread.line),
                spread.price,
                total.line
            );
            lines.push(escape(&center(&text, PAGE_WIDTH)));
        }
        if let Some(ml) = &odds.moneyline {
            let text = format!(
                "{} {}    {} {}",
                abbrev_for(&ml.home_team, &home_abbrev),
                plus_prefixed(&ml.home),
                abbrev_for(&ml.away_team, &away_abbrev),
                plus_prefixed(&ml.away)
            );
            lines.push(escape(&center(&text, PAGE_WIDTH)));
        }
        lines
    }

    fn flow_lines(&self, sides: &Sides<'_>) -> Vec<String> {
        let chart = GameFlowChart::from_series(&self.analysis.series);
        let total_cols = self.analysis.series.len();
        let spacing = (CHART_MARGIN + total_cols).saturating_sub(10 + CHART_LEGEND.len());
        let their_abbrev = escape(&abbrev_or(sides.them, "OPP"));
        let their_color = if sides.them.team.color.is_empty() {
            OPPONENT_FALLBACK_COLOR
        } else {
            sides.them.team.color.as_str()
        };

        let mut lines = vec![
            format!("<b>Game Flow:</b>{}{}", " ".repeat(spacing), CHART_LEGEND),
            String::new(),
            "<span class=\"game-flow\">".to_string(),
        ];
        let bottom = chart.our_rows.len().saturating_sub(1);
        for (i, row) in chart.our_rows.iter().enumerate() {
            if i == bottom {
                lines.push(format!(
                    "<span class=\"usc-dots\"> {:<6}{}</span>",
                    escape(&self.team.abbrev),
                    row
                ));
            } else {
                lines.push(format!("<span class=\"usc-dots\">       {row}</span>"));
            }
        }
        lines.push(String::new());
        lines.push(format!("       {}", chart.timeline));
        for (i, row) in chart.their_rows.iter().enumerate() {
            let label = if i == 0 {
                format!(" {their_abbrev:<6}")
            } else {
                " ".repeat(CHART_MARGIN)
            };
            lines.push(format!(
                "<span style=\"color: #{their_color};\">{label}{row}</span>"
            ));
        }
        lines.push("</span>".to_string());
        lines.push(String::new());
        lines
    }

    fn lead_lines(&self, sides: &Sides<'_>) -> Vec<String> {
        let lead = &self.analysis.lead;
        vec![
            format!("<b>Lead Changes:</b> {}", lead.lead_changes),
            format!("<b>Times Tied:</b> {}", lead.times_tied),
            format!(
                "<b>Biggest Lead:</b> {}: {}, {}: {}",
                escape(&self.team.abbrev),
                lead.our_biggest_display(),
                escape(&abbrev_or(sides.them, "OPP")),
                lead.their_biggest_display()
            ),
            String::new(),
        ]
    }

    fn players_for(&self, ours: bool) -> Option<&TeamPlayers> {
        self.summary
            .boxscore
            .players
            .iter()
            .find(|t| (t.team.id == self.team.id) == ours)
    }

    fn team_statistics(&self, t: &TeamPlayers) -> Option<&TeamStatistics> {
        self.summary
            .boxscore
            .teams
            .iter()
            .find(|s| s.team.id == t.team.id)
    }

    fn team_stats_lines(&self) -> Vec<String> {
        let (Some(us), Some(them)) = (self.players_for(true), self.players_for(false)) else {
            return Vec::new();
        };
        let (our_2ch, their_2ch) = self.analysis.second_chance_split();

        let mut lines = vec![
            "<b>Team Stats:</b>".to_string(),
            format!(
                "{:>5}{:>3}  {:>5} {:>5} {:>5} {:>8} {:>2} {:>2} {:>2}",
                "", "PTS", "FG", "3PT", "FT", "OR/DR/TR", "A", "S", "B"
            ),
        ];
        let sides = [(us, our_2ch), (them, their_2ch)];
        for (t, _) in &sides {
            let line = TeamTotals::from_team(t).line;
            lines.push(escape(&format!(
                "{:<5}{:>3}  {:>5} {:>5} {:>5} {:>8} {:>2} {:>2} {:>2}",
                abbrev_of(t),
                line.points,
                line.fg.to_string(),
                line.three.to_string(),
                line.ft.to_string(),
                format!(
                    "{}/{}/{}",
                    line.offensive_rebounds,
                    line.defensive_rebounds,
                    line.total_rebounds()
                ),
                line.assists,
                line.steals,
                line.blocks
            )));
            lines.push(format!(
                "{:>10}{:>5} {:>5} {:>5}",
                "",
                line.fg.pct_display(1, "0.0%"),
                line.three.pct_display(1, "0.0%"),
                line.ft.pct_display(1, "0.0%")
            ));
        }
        lines.push(String::new());

        const ADVANCED: [&str; 3] = ["pointsInPaint", "fastBreakPoints", "turnoverPoints"];
        let has_advanced = self.team_statistics(us)
            .map(|s| ADVANCED.iter().any(|name| s.stat(name).is_some()))
            .unwrap_or(false);
        if has_advanced {
            lines.push(format!(
                "{:>5}{:>4}{:>8}{:>6}{:>4}{:>5}{:>4}{:>5}{:>4}",
                "", "PITP", "FB PTS", "BNCH", "OR", "2CH", "TO", "POTO", "PF"
            ));
            for (t, second_chance) in &sides {
                let totals = TeamTotals::from_team(t);
                let stat = |name: &str| -> String {
                    self.team_statistics(t)
                        .and_then(|s| s.stat(name))
                        .unwrap_or("-")
                        .to_string()
                };
                lines.push(escape(&format!(
                    "{:<5}{:>4}{:>8}{:>6}{:>4}{:>5}{:>4}{:>5}{:>4}",
                    abbrev_of(t),
                    stat("pointsInPaint"),
                    stat("fastBreakPoints"),
                    totals.bench_points,
                    totals.line.offensive_rebounds,
                    second_chance,
                    totals.line.turnovers,
                    stat("turnoverPoints"),
                    totals.line.fouls
                )));
            }
            lines.push(String::new());
        }
        lines
    }

    /// Starters, bench and totals for each team, ours first, with one
    /// continuous zebra stripe across both.
    fn box_scores(&self) -> String {
        let mut teams: Vec<&TeamPlayers> = self.summary.boxscore.players.iter().collect();
        teams.sort_by_key(|t| t.team.id != self.team.id);

        let mut zebra = Zebra::default();
        let mut spans = Vec::new();
        for t in teams.into_iter().filter(|t| !t.statistics.is_empty()) {
            let ours = t.team.id == self.team.id;
            let color = if ours {
                self.team.color.as_str()
            } else if t.team.color.is_empty() {
                OPPONENT_FALLBACK_COLOR
            } else {
                t.team.color.as_str()
            };
            let abbrev = abbrev_of(t);
            let (mut starters, mut bench): (Vec<&AthleteEntry>, Vec<&AthleteEntry>) =
                t.athletes().iter().partition(|a| a.starter);
            starters.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
            bench.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

            for (label, group) in [("STARTERS", &starters), ("BENCH", &bench)] {
                spans.push(zebra.header(color, &format!("{abbrev} {label}")));
                for a in group.iter() {
                    let pm = self
                        .analysis
                        .plus_minus
                        .get(&a.athlete.id)
                        .copied()
                        .unwrap_or(0);
                    let (first, second) = athlete_lines(a, pm);
                    spans.push(zebra.row(&first, &second));
                }
            }

            spans.push(zebra.header(color, &format!("{abbrev} TOTALS")));
            let (pct, totals) = totals_lines(&TeamTotals::from_team(t));
            spans.push(zebra.row(&pct, &totals));

            if ours {
                spans.push(zebra.spacer());
            }
        }
        spans.concat()
    }
}

fn abbrev_or(c: &Competitor, fallback: &str) -> String {
    if c.team.abbreviation.is_empty() {
        fallback.to_string()
    } else {
        c.team.abbreviation.clone()
    }
}

fn school_or(c: &Competitor, fallback: &str) -> String {
    let school = c.team.school();
    if school.is_empty() {
        fallback.to_string()
    } else {
        school.to_string()
    }
}

fn abbrev_of(t: &TeamPlayers) -> &str {
    if t.team.abbreviation.is_empty() {
        "TEAM"
    } else {
        &t.team.abbreviation
    }
}
