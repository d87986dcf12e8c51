//! Cycle velocity: average holding time of matched inventory.
//!
//! Runs its own FIFO queue of BUY lots (quantity + acquisition time only).
//! Every SELL consumes head lots and records one duration sample per match.
//! This queue shares nothing with [`crate::engine`]; shorts are not opened
//! here and unmatched sell quantity is simply dropped.

use std::collections::VecDeque;
use std::fmt;

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::decimal::is_dust;
use crate::resolve::resolve_completed;
use crate::types::{Order, Side};

/// Look-back window ending at `now`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VelocityWindow {
    Days7,
    #[default]
    Days30,
    Days90,
}

impl VelocityWindow {
    /// `"7d"`, `"30d"` or `"90d"`.
    pub fn parse(raw: &str) -> Option<VelocityWindow> {
        match raw.trim() {
            "7d" => Some(VelocityWindow::Days7),
            "30d" => Some(VelocityWindow::Days30),
            "90d" => Some(VelocityWindow::Days90),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityWindow::Days7 => "7d",
            VelocityWindow::Days30 => "30d",
            VelocityWindow::Days90 => "90d",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            VelocityWindow::Days7 => 7,
            VelocityWindow::Days30 => 30,
            VelocityWindow::Days90 => 90,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(self.days())
    }
}

impl fmt::Display for VelocityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct BuyLot {
    quantity: Decimal,
    at: NaiveDateTime,
}

/// Mean holding time in whole minutes over `[now - window, now]`.
///
/// Returns 0 when no sell matched a buy inside the window.
pub fn calculate_cycle_velocity(orders: &[Order], window: VelocityWindow, now: NaiveDateTime) -> i64 {
    let samples = holding_samples(orders, window, now);
    let mean = mean_minutes(&samples);
    debug!(
        window = %window,
        samples = samples.len(),
        minutes = mean,
        "cycle velocity computed"
    );
    mean
}

/// Every buy→sell match duration inside the window, in processing order.
pub fn holding_samples(orders: &[Order], window: VelocityWindow, now: NaiveDateTime) -> Vec<Duration> {
    let since = now - window.duration();
    let (resolved, _) = resolve_completed(orders);

    let mut queue: VecDeque<BuyLot> = VecDeque::new();
    let mut samples = Vec::new();

    for o in resolved.iter().filter(|o| o.at >= since && o.at <= now) {
        match o.side {
            Side::Buy => queue.push_back(BuyLot {
                quantity: o.quantity,
                at: o.at,
            }),
            Side::Sell => {
                let mut remaining = o.quantity;
                while remaining > Decimal::ZERO {
                    let Some(head) = queue.front_mut() else {
                        break;
                    };
                    let matched = remaining.min(head.quantity);
                    samples.push(o.at - head.at);
                    head.quantity -= matched;
                    remaining -= matched;
                    if is_dust(head.quantity) {
                        queue.pop_front();
                    }
                }
            }
            Side::Unknown => {}
        }
    }

    samples
}

/// Arithmetic mean rounded half-up to the nearest minute; 0 for no samples.
///
/// `calculate_cycle_velocity` is `mean_minutes(&holding_samples(..))`.
pub fn mean_minutes(samples: &[Duration]) -> i64 {
    if samples.is_empty() {
        return 0;
    }
    let n = samples.len() as i128;
    let total_ms: i128 = samples.iter().map(|d| d.num_milliseconds() as i128).sum();
    let minute_ms: i128 = 60_000;
    let rounded = (total_ms * 2 + n * minute_ms).div_euclid(2 * n * minute_ms);
    rounded as i64
}
