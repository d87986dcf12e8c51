//! JSON output shapes for report consumers.
//!
//! Money is emitted as JSON numbers; values were already rounded to 2 dp by
//! the core, so the float rendering is exact for display purposes.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sbk_pnl::{
    DailyPoint, MonthSummary, RevenueSummary, SkipCounts, VelocityWindow, VolumeHeatmap, WEEKDAYS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPointDto {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sell: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

impl From<&DailyPoint> for DailyPointDto {
    fn from(p: &DailyPoint) -> Self {
        Self {
            date: p.date.clone(),
            buy: p.buy,
            sell: p.sell,
            revenue: p.revenue,
        }
    }
}

pub fn daily_points(points: &[DailyPoint]) -> Vec<DailyPointDto> {
    points.iter().map(DailyPointDto::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummaryDto {
    pub month: String,
    pub month_index: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Fraction, 0.05 = 5%.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_spread: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_buy: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sell: Decimal,
}

impl From<&MonthSummary> for MonthSummaryDto {
    fn from(m: &MonthSummary) -> Self {
        Self {
            month: m.month.to_string(),
            month_index: m.month_index,
            revenue: m.revenue,
            avg_spread: m.avg_spread,
            total_buy: m.total_buy,
            total_sell: m.total_sell,
        }
    }
}

pub fn month_summaries(months: &[MonthSummary]) -> Vec<MonthSummaryDto> {
    months.iter().map(MonthSummaryDto::from).collect()
}

/// Revenue windows as integer display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummaryDto {
    pub today: String,
    pub this_week: String,
    pub this_month: String,
    pub last7_days: String,
    pub last30_days: String,
    pub last90_days: String,
    pub total: String,
}

impl RevenueSummaryDto {
    pub fn new(today: impl Into<String>, summary: &RevenueSummary) -> Self {
        let d = summary.display();
        Self {
            today: today.into(),
            this_week: d.this_week,
            this_month: d.this_month,
            last7_days: d.last_7_days,
            last30_days: d.last_30_days,
            last90_days: d.last_90_days,
            total: d.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityDto {
    pub window: String,
    pub minutes: i64,
    pub samples: usize,
}

impl VelocityDto {
    pub fn new(window: VelocityWindow, minutes: i64, samples: usize) -> Self {
        Self {
            window: window.as_str().to_string(),
            minutes,
            samples,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDto {
    pub side: String,
    pub weekdays: Vec<String>,
    /// `cells[weekday][hour]`, Monday first.
    pub cells: Vec<Vec<f64>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_cell: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_volume: Decimal,
    pub order_count: usize,
}

impl From<&VolumeHeatmap> for HeatmapDto {
    fn from(h: &VolumeHeatmap) -> Self {
        Self {
            side: h.side.as_str().to_string(),
            weekdays: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            cells: h
                .cells
                .iter()
                .map(|row| row.iter().map(|c| c.to_f64().unwrap_or(0.0)).collect())
                .collect(),
            max_cell: h.max_cell,
            total_volume: h.total_volume,
            order_count: h.order_count,
        }
    }
}

/// Skip tally keyed by reason name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCountsDto(pub std::collections::BTreeMap<String, usize>);

impl From<&SkipCounts> for SkipCountsDto {
    fn from(s: &SkipCounts) -> Self {
        Self(s.iter().map(|(r, n)| (r.as_str().to_string(), n)).collect())
    }
}
