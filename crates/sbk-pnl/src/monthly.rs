//! Month-of-year aggregation and spread.
//!
//! Points are grouped by calendar month index (0 = January) only. Two
//! different years' Januaries land in the same summary; callers that need a
//! per-year view must split the series by year first.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::calendar::month_index;
use crate::decimal::{ratio, round_money};
use crate::engine::compute_realized_pnl;
use crate::types::{DailyPoint, Order};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How `avg_spread` is derived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SpreadMode {
    /// `(total_sell - total_buy) / total_buy` over the month.
    #[default]
    Weighted,
    /// Mean of per-row `(sell - buy) / buy` over rows with `buy != 0`.
    Unweighted,
}

impl SpreadMode {
    pub fn parse(raw: &str) -> Option<SpreadMode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weighted" => Some(SpreadMode::Weighted),
            "unweighted" => Some(SpreadMode::Unweighted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadMode::Weighted => "weighted",
            SpreadMode::Unweighted => "unweighted",
        }
    }
}

impl fmt::Display for SpreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-month totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthSummary {
    /// 0..=11
    pub month_index: u32,
    /// `"Jan"` .. `"Dec"`
    pub month: &'static str,
    pub revenue: Decimal,
    pub total_buy: Decimal,
    pub total_sell: Decimal,
    /// Fraction rounded to 2 dp (0.05 = 5%).
    pub avg_spread: Decimal,
}

#[derive(Default)]
struct MonthAcc {
    revenue: Decimal,
    total_buy: Decimal,
    total_sell: Decimal,
    row_spread_sum: Decimal,
    rows_with_buy: u32,
}

/// Reduce a daily series into month-of-year summaries, ascending by month.
///
/// Points whose date does not parse are skipped.
pub fn aggregate_by_month(points: &[DailyPoint], mode: SpreadMode) -> Vec<MonthSummary> {
    let mut months: BTreeMap<u32, MonthAcc> = BTreeMap::new();

    for p in points {
        let Some(m) = month_index(&p.date) else {
            continue;
        };
        let acc = months.entry(m).or_default();
        acc.revenue += p.revenue;
        acc.total_buy += p.buy;
        acc.total_sell += p.sell;
        if let Some(row_spread) = ratio(p.sell - p.buy, p.buy) {
            acc.row_spread_sum += row_spread;
            acc.rows_with_buy += 1;
        }
    }

    months
        .into_iter()
        .map(|(m, acc)| {
            let spread = match mode {
                SpreadMode::Weighted if acc.total_buy > Decimal::ZERO => {
                    ratio(acc.total_sell - acc.total_buy, acc.total_buy)
                }
                SpreadMode::Weighted => None,
                SpreadMode::Unweighted => {
                    ratio(acc.row_spread_sum, Decimal::from(acc.rows_with_buy))
                }
            };
            MonthSummary {
                month_index: m,
                month: MONTH_NAMES[m as usize],
                revenue: acc.revenue,
                total_buy: acc.total_buy,
                total_sell: acc.total_sell,
                avg_spread: round_money(spread.unwrap_or(Decimal::ZERO)),
            }
        })
        .collect()
}

/// Month summaries straight from raw orders (engine pass + aggregation).
pub fn monthly_spread_from_orders(orders: &[Order], mode: SpreadMode) -> Vec<MonthSummary> {
    aggregate_by_month(&compute_realized_pnl(orders), mode)
}
