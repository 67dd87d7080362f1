//! Game-flow chart data: the lead sampled on a fixed time grid.
//!
//! Each period is a break column followed by twelve buckets, each one
//! twelfth of the period (50 s in a 10-minute quarter, 25 s in a 5-minute
//! overtime). A trailing break closes the final period, so a game with `n`
//! periods has `n * 13 + 1` columns.

use std::collections::HashMap;

use super::play::{GameClock, PlayEvent, Side};

pub const BUCKETS_PER_PERIOD: u32 = 12;
/// One break column plus the period's buckets.
pub const COLUMNS_PER_PERIOD: usize = BUCKETS_PER_PERIOD as usize + 1;
pub const POINTS_PER_DOT: i32 = 3;
pub const REGULATION_PERIODS: u8 = 4;
pub const REGULATION_PERIOD_SECS: u32 = 600;
pub const OVERTIME_PERIOD_SECS: u32 = 300;

pub fn period_length(period: u8) -> u32 {
    if period > REGULATION_PERIODS {
        OVERTIME_PERIOD_SECS
    } else {
        REGULATION_PERIOD_SECS
    }
}

fn bucket_length(period: u8) -> u32 {
    period_length(period) / BUCKETS_PER_PERIOD
}

/// Bucket (1..=12) for a play at `clock` remaining in `period`.
/// Plays at or before the opening tip land in bucket 1.
pub fn bucket_for(period: u8, clock: &GameClock) -> usize {
    let len = period_length(period);
    let remaining = clock.remaining_seconds();
    if remaining >= len {
        return 1;
    }
    let elapsed = len - remaining;
    (elapsed / bucket_length(period) + 1).min(BUCKETS_PER_PERIOD) as usize
}

/// Chart column for a play. Column 0 of every period is its break.
pub fn column_for(period: u8, clock: &GameClock) -> usize {
    period_offset(period) + bucket_for(period, clock)
}

fn period_offset(period: u8) -> usize {
    (period.max(1) as usize - 1) * COLUMNS_PER_PERIOD
}

/// Where an in-progress game currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivePosition {
    pub period: u8,
    pub clock: Option<GameClock>,
}

impl LivePosition {
    /// Last column that has been played. An unreadable clock or a period
    /// that has not started yet stops at the period's break column. A
    /// period of 0 means ESPN has no position yet, so nothing is cut.
    pub fn cutoff_column(&self) -> usize {
        if self.period == 0 {
            return usize::MAX;
        }
        let current = match self.clock {
            Some(clock) if clock.remaining_seconds() < period_length(self.period) => {
                bucket_for(self.period, &clock)
            }
            _ => 0,
        };
        period_offset(self.period) + current
    }
}

/// Lead per chart column from one team's perspective. `None` marks break
/// columns and time not yet played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSeries {
    values: Vec<Option<i32>>,
}

impl LeadSeries {
    /// Sample the scoring plays onto the grid and carry each lead forward
    /// until the next recorded change. When several scoring plays share a
    /// bucket the last one wins; plays without a readable clock are skipped.
    pub fn build(plays: &[PlayEvent], ours: Side, periods: u8, live: Option<LivePosition>) -> Self {
        let total = periods as usize * COLUMNS_PER_PERIOD + 1;
        let mut recorded: HashMap<usize, i32> = HashMap::new();
        let mut prev = (0, 0);

        for play in plays.iter().filter(|p| p.scoring) {
            let (home, away) = play.scores_or(prev);
            prev = (home, away);
            if let Some(clock) = play.clock {
                recorded.insert(column_for(play.period, &clock), ours.lead(home, away));
            }
        }

        let cutoff = live.map(|l| l.cutoff_column()).unwrap_or(total);
        let mut last = 0;
        let values = (0..total)
            .map(|col| {
                if let Some(lead) = recorded.get(&col) {
                    last = *lead;
                }
                if col % COLUMNS_PER_PERIOD == 0 || col > cutoff {
                    None
                } else {
                    Some(last)
                }
            })
            .collect();

        Self { values }
    }

    pub fn values(&self) -> &[Option<i32>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest lead held by our side (0 if never ahead).
    pub fn max_lead(&self) -> i32 {
        self.values.iter().flatten().copied().max().unwrap_or(0).max(0)
    }

    /// Largest deficit, as a positive number (0 if never behind).
    pub fn max_deficit(&self) -> i32 {
        -self.values.iter().flatten().copied().min().unwrap_or(0).min(0)
    }
}

/// Text rows for the game-flow strip chart. Every row is exactly one
/// character per column: `.` where the lead reaches the row's threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFlowChart {
    /// Top row first.
    pub our_rows: Vec<String>,
    /// `+` at break columns, `=` elsewhere.
    pub timeline: String,
    /// Row nearest the timeline first.
    pub their_rows: Vec<String>,
}

impl GameFlowChart {
    pub fn from_series(series: &LeadSeries) -> Self {
        let values = series.values();
        let our_height = rows_for(series.max_lead());
        let their_height = rows_for(series.max_deficit());

        let our_rows = (1..=our_height)
            .rev()
            .map(|row| dots(values, |lead| lead >= row * POINTS_PER_DOT))
            .collect();
        let their_rows = (1..=their_height)
            .map(|row| dots(values, |lead| lead <= -row * POINTS_PER_DOT))
            .collect();
        let timeline = (0..values.len())
            .map(|col| if col % COLUMNS_PER_PERIOD == 0 { '+' } else { '=' })
            .collect();

        Self {
            our_rows,
            timeline,
            their_rows,
        }
    }
}

/// A side that never led gets no rows.
fn rows_for(max: i32) -> i32 {
    if max > 0 {
        ((max + 2) / POINTS_PER_DOT).max(1)
    } else {
        0
    }
}

fn dots(values: &[Option<i32>], filled: impl Fn(i32) -> bool) -> String {
    values
        .iter()
        .map(|v| match v {
            Some(lead) if filled(*lead) => '.',
            _ => ' ',
        })
        .collect()
}
