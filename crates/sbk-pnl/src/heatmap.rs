//! Weekday × hour fiat-volume grid.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::resolve::resolve;
use crate::types::{Order, Side};

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Summed fiat per `[weekday][hour]`, Monday = row 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeHeatmap {
    pub side: Side,
    pub cells: [[Decimal; 24]; 7],
    /// Largest cell, never below 1 so a colour scale can divide by it.
    pub max_cell: Decimal,
    pub total_volume: Decimal,
    pub order_count: usize,
}

impl VolumeHeatmap {
    fn empty(side: Side) -> Self {
        Self {
            side,
            cells: [[Decimal::ZERO; 24]; 7],
            max_cell: Decimal::ONE,
            total_volume: Decimal::ZERO,
            order_count: 0,
        }
    }

    pub fn cell(&self, weekday: usize, hour: usize) -> Decimal {
        self.cells[weekday][hour]
    }
}

/// Grid of completed `side` orders, optionally limited to `start..=end`.
///
/// Orders that fail validation are left out, same as in the FIFO engine.
pub fn volume_heatmap(
    orders: &[Order],
    side: Side,
    span: Option<(NaiveDateTime, NaiveDateTime)>,
) -> VolumeHeatmap {
    let mut map = VolumeHeatmap::empty(side);

    for order in orders.iter().filter(|o| o.side == side) {
        let Ok(r) = resolve(order) else {
            continue;
        };
        if let Some((start, end)) = span {
            if r.at < start || r.at > end {
                continue;
            }
        }
        let row = r.at.weekday().num_days_from_monday() as usize;
        let col = r.at.hour() as usize;
        map.cells[row][col] += r.fiat;
        map.total_volume += r.fiat;
        map.order_count += 1;
    }

    map.max_cell = map
        .cells
        .iter()
        .flatten()
        .copied()
        .fold(Decimal::ONE, Decimal::max);
    map
}
