//! HTML page builders.
//!
//! Every page is one `<pre>` block of fixed-width text inside a shared
//! shell. Builders are pure: they take already-fetched data plus the
//! render time and return the whole document as a `String`.

pub mod game;
pub mod home;
pub mod schedule;
pub mod standings;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::cli::types::team::{Conference, TrackedTeam};
use crate::espn::types::{AthleteEntry, Competitor};
use crate::stats::{signed, Shooting, StatLine, TeamTotals};

/// Footer line on every page.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Width of the `=`/`-` section rules.
pub const RULE_WIDTH: usize = 47;

/// Column header above every player stat row.
pub const STATS_HEADER: &str = " MIN ORB DRB AST STL BLK  TO FLS      FG     3PT      FT  PTS";

pub(crate) const LIVE_MARKER: &str =
    r#"<span style="color: #cc0000; font-weight: bold;">LIVE</span>"#;

const BASE_CSS: &str = r#"        * {
            box-sizing: border-box;
        }
        body {
            font-family: monospace;
            background: #ffffff;
            color: #1a1a1a;
            padding: 16px;
            max-width: 100%;
            margin: 0 auto;
            line-height: LINE_HEIGHT;
            overflow-x: auto;
        }
        pre {
            white-space: pre;
            min-width: 55ch;
            margin: 0;
            font-size: 12px;
        }
        a {
            color: #0066cc;
        }
        .row-even {
            background: #f0f0f0;
            display: block;
            margin: 0 -16px;
            padding: 0 16px;
        }
        .row-odd {
            background: transparent;
            display: block;
            margin: 0 -16px;
            padding: 0 16px;
        }
"#;

const TIMESTAMP_SCRIPT: &str = r#"<script>
(function() {
    const dataLoaded = new Date(document.querySelector('meta[name="data-loaded"]').content);
    const pageLoaded = new Date();

    function formatTime(date) {
        return date.toLocaleTimeString('en-US', { hour: 'numeric', minute: '2-digit', second: '2-digit', hour12: true });
    }

    function timeAgo(date) {
        const seconds = Math.floor((new Date() - date) / 1000);
        if (seconds < 60) return 'just now';
        const minutes = Math.floor(seconds / 60);
        if (minutes < 60) return minutes + ' min ago';
        const hours = Math.floor(minutes / 60);
        if (hours < 24) return hours + ' hr ago';
        const days = Math.floor(hours / 24);
        return days + ' day' + (days > 1 ? 's' : '') + ' ago';
    }

    function line(label, date) {
        const text = label + formatTime(date);
        const ago = '(' + timeAgo(date) + ')';
        const padding = 61 - text.length - ago.length;
        return text + (padding > 0 ? ' '.repeat(padding) : ' ') + ago;
    }

    function updateTimestamps() {
        const el = document.getElementById('timestamps');
        if (el) {
            el.innerHTML = line('Page loaded: ', pageLoaded) + '\n' + line('Data loaded: ', dataLoaded);
        }
    }

    updateTimestamps();
    setInterval(updateTimestamps, 60000);
})();
</script>"#;

/// Document shell around a page's `<pre>` content.
pub struct Shell<'a> {
    pub title: &'a str,
    pub line_height: &'a str,
    /// Extra CSS rules appended to the shared stylesheet.
    pub extra_css: &'a str,
}

impl<'a> Shell<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            line_height: "1.4",
            extra_css: "",
        }
    }

    pub fn wrap(&self, content: &str, now: &DateTime<Tz>) -> String {
        let css = BASE_CSS.replace("LINE_HEIGHT", self.line_height);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <meta name=\"viewport\" content=\"width=700\">\n    <title>{title}</title>\n    \
             <meta name=\"data-loaded\" content=\"{loaded}\">\n    <style>\n{css}{extra}    </style>\n\
             </head>\n<body>\n<pre>\n{content}\n</pre>\n{script}\n</body>\n</html>\n",
            title = escape(self.title),
            loaded = now.to_rfc3339(),
            css = css,
            extra = self.extra_css,
            content = content,
            script = TIMESTAMP_SCRIPT,
        )
    }
}

/// Escape feed text for HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Opening lines shared by every page: the live timestamp and a blank line.
pub(crate) fn page_top(now: &DateTime<Tz>) -> Vec<String> {
    vec![
        format!(
            "<span id=\"timestamps\">Data loaded: {}</span>",
            now.format("%I:%M:%S %p")
        ),
        String::new(),
    ]
}

/// Which navigation tab is bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab<'a> {
    Team(&'a str),
    Conference,
}

/// Top navigation: one tab per tracked team, then the conference page.
pub fn nav_line(teams: &[TrackedTeam], conference: &Conference, active: NavTab<'_>) -> String {
    let mut tabs: Vec<String> = teams
        .iter()
        .map(|t| {
            if active == NavTab::Team(&t.abbrev) {
                format!("<b>{}</b>", t.abbrev)
            } else {
                format!("<a href=\"{}\">{}</a>", t.home_page, t.abbrev)
            }
        })
        .collect();
    tabs.push(if active == NavTab::Conference {
        format!("<b>{}</b>", conference.abbrev)
    } else {
        format!("<a href=\"{}\">{}</a>", conference.page, conference.abbrev)
    });
    tabs.join("  ")
}

pub(crate) fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

pub(crate) fn row_class(idx: usize) -> &'static str {
    if idx % 2 == 0 {
        "row-even"
    } else {
        "row-odd"
    }
}

/// Alternating row classes that carry on across sections.
#[derive(Debug, Default)]
pub(crate) struct Zebra {
    idx: usize,
}

impl Zebra {
    pub fn next_class(&mut self) -> &'static str {
        let class = row_class(self.idx);
        self.idx += 1;
        class
    }

    /// A team-coloured section header spanning the stat column labels.
    pub fn header(&mut self, color: &str, title: &str) -> String {
        format!(
            "<span class=\"{}\" style=\"color: #{};\"><b>{}</b>\n{}</span>",
            self.next_class(),
            color,
            escape(title),
            STATS_HEADER
        )
    }

    /// Two blank lines in the current stripe.
    pub fn spacer(&mut self) -> String {
        format!("<span class=\"{}\">\n\n</span>", self.next_class())
    }

    pub fn row(&mut self, first: &str, second: &str) -> String {
        format!(
            "<span class=\"{}\">{}\n{}</span>",
            self.next_class(),
            first,
            second
        )
    }
}

/// `"#5 "` for ranked teams, empty otherwise.
pub(crate) fn rank_prefix(rank: Option<u32>) -> String {
    match rank {
        Some(r) if r > 0 => format!("#{r} "),
        _ => String::new(),
    }
}

pub(crate) fn pct_cell(shooting: &Shooting) -> String {
    format!("{:>7}", shooting.pct_display(2, "--"))
}

/// `"vs"` when our side is at home, `"at"` otherwise.
pub(crate) fn home_away(us: Option<&Competitor>) -> &'static str {
    match us {
        Some(c) if c.is_home() => "vs",
        _ => "at",
    }
}

/// `W`/`L` from two display scores, `-` when either is not a number.
pub(crate) fn result_letter(ours: &str, theirs: &str) -> &'static str {
    match (ours.trim().parse::<f64>(), theirs.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) if a > b => "W",
        (Ok(_), Ok(_)) => "L",
        _ => "-",
    }
}

/// Two text lines for one player: name with shooting percentages and
/// plus/minus, then the counting stats. Players without a stat line are
/// marked as not having played.
pub(crate) fn player_lines(
    name: &str,
    jersey: &str,
    line: Option<&StatLine>,
    plus_minus: i32,
) -> (String, String) {
    let name_part = if jersey.is_empty() {
        format!("{name} ")
    } else {
        format!("{name} #{jersey}")
    };
    let Some(line) = line else {
        return (
            escape(&name_part),
            "<span class=\"dnp\">  Did not play</span>".to_string(),
        );
    };

    let grey = format!(
        "{:<8}{:<8}{:<8}{:>4} ",
        pct_cell(&line.fg),
        pct_cell(&line.three),
        pct_cell(&line.ft),
        signed(plus_minus)
    );
    let first = format!(
        "{}<span style=\"color:#999\">{}</span>",
        escape(&format!("{name_part:<33}")),
        grey
    );
    let second = format!("{:>4}{}", line.minutes, counting_stats(line));
    (first, second)
}

/// Everything after the minutes column.
fn counting_stats(line: &StatLine) -> String {
    format!(
        "{:>4}{:>4}{:>4}{:>4}{:>4}{:>4}{:>4}{:>8}{:>8}{:>8}{:>5} ",
        line.offensive_rebounds,
        line.defensive_rebounds,
        line.assists,
        line.steals,
        line.blocks,
        line.turnovers,
        line.fouls,
        line.fg.to_string(),
        line.three.to_string(),
        line.ft.to_string(),
        line.points
    )
}

/// Percentages line and counting-stats line for a team's totals row.
pub(crate) fn totals_lines(totals: &TeamTotals) -> (String, String) {
    let line = &totals.line;
    let pct = format!(
        "{:33}<span style=\"color:#999\">{:<8}{:<8}{:<8}</span>",
        "",
        pct_cell(&line.fg),
        pct_cell(&line.three),
        pct_cell(&line.ft)
    );
    (pct, format!("    {}", counting_stats(line)))
}

/// Player row for one box-score entry.
pub(crate) fn athlete_lines(entry: &AthleteEntry, plus_minus: i32) -> (String, String) {
    player_lines(
        &entry.athlete.display_name,
        &entry.athlete.jersey,
        StatLine::parse(&entry.stats).as_ref(),
        plus_minus,
    )
}
