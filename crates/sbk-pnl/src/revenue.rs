//! Revenue over calendar windows.
//!
//! Pure reductions over the daily series. Range membership is a lexical
//! comparison of `YYYY-MM-DD` strings, which orders correctly because the
//! format is fixed-width and zero-padded.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::calendar::{fmt_day, parse_day};
use crate::decimal::fmt_whole;
use crate::types::DailyPoint;

fn date_prefix(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}

/// Sum of `revenue` for points dated within `[start, end]` inclusive.
pub fn revenue_for_range(points: &[DailyPoint], start: &str, end: &str) -> Decimal {
    points
        .iter()
        .filter(|p| {
            let d = date_prefix(&p.date);
            d >= start && d <= end
        })
        .map(|p| p.revenue)
        .sum()
}

/// [`revenue_for_range`] with typed bounds.
pub fn revenue_between(points: &[DailyPoint], start: NaiveDate, end: NaiveDate) -> Decimal {
    revenue_for_range(points, &fmt_day(start), &fmt_day(end))
}

// ---------------------------------------------------------------------------
// Named windows
// ---------------------------------------------------------------------------

/// Revenue for the dashboard windows, all ending `today` inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevenueSummary {
    /// Monday of the current week through today.
    pub this_week: Decimal,
    /// 1st of the current month through today.
    pub this_month: Decimal,
    pub last_7_days: Decimal,
    pub last_30_days: Decimal,
    pub last_90_days: Decimal,
    /// Every point, no date filter.
    pub total: Decimal,
}

/// [`RevenueSummary`] rendered as integer strings (no cents).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevenueDisplay {
    pub this_week: String,
    pub this_month: String,
    pub last_7_days: String,
    pub last_30_days: String,
    pub last_90_days: String,
    pub total: String,
}

impl RevenueSummary {
    pub fn compute(points: &[DailyPoint], today: NaiveDate) -> Self {
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let month_start = today.with_day(1).unwrap_or(today);
        let trailing = |n: i64| revenue_between(points, today - Duration::days(n - 1), today);

        Self {
            this_week: revenue_between(points, week_start, today),
            this_month: revenue_between(points, month_start, today),
            last_7_days: trailing(7),
            last_30_days: trailing(30),
            last_90_days: trailing(90),
            total: points.iter().map(|p| p.revenue).sum(),
        }
    }

    pub fn display(&self) -> RevenueDisplay {
        RevenueDisplay {
            this_week: fmt_whole(self.this_week),
            this_month: fmt_whole(self.this_month),
            last_7_days: fmt_whole(self.last_7_days),
            last_30_days: fmt_whole(self.last_30_days),
            last_90_days: fmt_whole(self.last_90_days),
            total: fmt_whole(self.total),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart range
// ---------------------------------------------------------------------------

/// Trailing window for the area chart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ChartRange {
    Days7,
    Days30,
    #[default]
    Days90,
}

impl ChartRange {
    pub fn parse(raw: &str) -> Option<ChartRange> {
        match raw.trim() {
            "7d" => Some(ChartRange::Days7),
            "30d" => Some(ChartRange::Days30),
            "90d" => Some(ChartRange::Days90),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::Days7 => "7d",
            ChartRange::Days30 => "30d",
            ChartRange::Days90 => "90d",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            ChartRange::Days7 => 7,
            ChartRange::Days30 => 30,
            ChartRange::Days90 => 90,
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points within the last N days, anchored at the date of the last point
/// rather than the wall clock.
///
/// Empty when the series is empty or its last date does not parse.
pub fn trailing_points(points: &[DailyPoint], range: ChartRange) -> Vec<DailyPoint> {
    let Some(anchor) = points.last().and_then(|p| parse_day(&p.date)) else {
        return Vec::new();
    };
    let start = anchor - Duration::days(range.days() - 1);

    points
        .iter()
        .filter(|p| matches!(parse_day(&p.date), Some(d) if d >= start && d <= anchor))
        .cloned()
        .collect()
}
