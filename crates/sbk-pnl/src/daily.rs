use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::decimal::round_money;
use crate::types::DailyPoint;

/// Running totals for one calendar day (full precision).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyBucket {
    pub buy_total: Decimal,
    pub sell_total: Decimal,
    pub realized_revenue: Decimal,
}

/// Day-keyed accumulator.
///
/// Keys are fixed-width `YYYY-MM-DD` strings, so the `BTreeMap` order is
/// chronological.
#[derive(Clone, Debug, Default)]
pub struct DailyBook {
    buckets: BTreeMap<String, DailyBucket>,
}

impl DailyBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_mut(&mut self, day: &str) -> &mut DailyBucket {
        self.buckets.entry(day.to_string()).or_default()
    }

    pub fn record_buy(&mut self, day: &str, fiat: Decimal) {
        self.bucket_mut(day).buy_total += fiat;
    }

    pub fn record_sell(&mut self, day: &str, fiat: Decimal) {
        self.bucket_mut(day).sell_total += fiat;
    }

    pub fn record_realized(&mut self, day: &str, realized: Decimal) {
        self.bucket_mut(day).realized_revenue += realized;
    }

    pub fn bucket(&self, day: &str) -> Option<&DailyBucket> {
        self.buckets.get(day)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Finalize into ascending points rounded to 2 dp.
    pub fn into_points(self) -> Vec<DailyPoint> {
        self.buckets
            .into_iter()
            .map(|(date, b)| DailyPoint {
                date,
                buy: round_money(b.buy_total),
                sell: round_money(b.sell_total),
                revenue: round_money(b.realized_revenue),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn points_are_sorted_and_rounded() {
        let mut book = DailyBook::new();
        book.record_sell("2025-02-01", dec!(10.005));
        book.record_buy("2025-01-31", dec!(1.004));
        book.record_realized("2025-02-01", dec!(-0.004));

        let pts = book.into_points();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].date, "2025-01-31");
        assert_eq!(pts[0].buy, dec!(1.00));
        assert_eq!(pts[1].sell, dec!(10.01));
        assert_eq!(pts[1].revenue, Decimal::ZERO);
    }

    #[test]
    fn totals_accumulate_per_day() {
        let mut book = DailyBook::new();
        book.record_buy("2025-01-01", dec!(100));
        book.record_buy("2025-01-01", dec!(50.5));
        assert_eq!(book.bucket("2025-01-01").unwrap().buy_total, dec!(150.5));
        assert_eq!(book.len(), 1);
    }
}
