//! Record-level validation.
//!
//! Turns a raw [`Order`] into a [`ResolvedOrder`] the engines can trust, or a
//! [`SkipReason`]. A bad record never aborts a computation pass: it is
//! counted, logged at `debug`, and left out.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calendar::{day_key, parse_order_time};
use crate::ordering::sort_canonical;
use crate::types::{Order, Side};

/// Why an order was left out of a computation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// Status is not `Completed`.
    NotCompleted,
    /// Side is neither BUY nor SELL.
    UnknownSide,
    /// Time cannot be parsed or has no `YYYY-MM-DD` prefix.
    BadTime,
    /// `coin_amount` is absent.
    MissingQuantity,
    /// `coin_amount <= 0`.
    NonPositiveQuantity,
    /// Neither `fiat_amount` nor `price × coin_amount` is usable.
    InvalidFiat,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotCompleted => "not_completed",
            SkipReason::UnknownSide => "unknown_side",
            SkipReason::BadTime => "bad_time",
            SkipReason::MissingQuantity => "missing_quantity",
            SkipReason::NonPositiveQuantity => "non_positive_quantity",
            SkipReason::InvalidFiat => "invalid_fiat",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason skip tally for one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    counts: BTreeMap<SkipReason, usize>,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, usize)> + '_ {
        self.counts.iter().map(|(r, n)| (*r, *n))
    }
}

/// A completed order that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOrder {
    pub order_id: String,
    /// Always `Buy` or `Sell`.
    pub side: Side,
    /// Strictly positive.
    pub quantity: Decimal,
    /// Given fiat total, or `price × quantity`.
    pub fiat: Decimal,
    pub at: NaiveDateTime,
    /// `YYYY-MM-DD`
    pub day: String,
}

/// Validate a single order.
///
/// Check order: status, side, time, quantity, fiat.
pub fn resolve(order: &Order) -> Result<ResolvedOrder, SkipReason> {
    if !order.status.is_completed() {
        return Err(SkipReason::NotCompleted);
    }
    if order.side == Side::Unknown {
        return Err(SkipReason::UnknownSide);
    }

    let time = order.time.trim();
    let at = parse_order_time(time).ok_or(SkipReason::BadTime)?;
    let day = day_key(time).ok_or(SkipReason::BadTime)?;

    let quantity = order.coin_amount.ok_or(SkipReason::MissingQuantity)?;
    if quantity <= Decimal::ZERO {
        return Err(SkipReason::NonPositiveQuantity);
    }

    let fiat = match order.fiat_amount {
        Some(f) => f,
        None => order
            .price
            .and_then(|p| p.checked_mul(quantity))
            .ok_or(SkipReason::InvalidFiat)?,
    };

    Ok(ResolvedOrder {
        order_id: order.order_id.clone(),
        side: order.side,
        quantity,
        fiat,
        at,
        day: day.to_string(),
    })
}

/// Resolve every order, drop the bad ones, and return the rest in canonical
/// chronological order.
pub fn resolve_completed(orders: &[Order]) -> (Vec<ResolvedOrder>, SkipCounts) {
    let mut out = Vec::with_capacity(orders.len());
    let mut skipped = SkipCounts::default();

    for order in orders {
        match resolve(order) {
            Ok(r) => out.push(r),
            Err(reason) => {
                if reason != SkipReason::NotCompleted {
                    debug!(order_id = %order.order_id, %reason, "order skipped");
                }
                skipped.record(reason);
            }
        }
    }

    sort_canonical(&mut out);
    (out, skipped)
}
