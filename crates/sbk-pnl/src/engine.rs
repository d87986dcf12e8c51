//! FIFO inventory engine.
//!
//! Rules (per completed order, in canonical order):
//! - BUY:
//!   - covers short lots at the head first; each match realizes
//!     `lot_proceeds_slice - order_cost_slice`
//!   - any remaining quantity opens a long lot carrying the remaining fiat
//!   - the full order fiat goes to the day's buy total
//! - SELL:
//!   - reduces long lots at the head first; each match realizes
//!     `order_proceeds_slice - lot_cost_slice`
//!   - any remaining quantity opens a short lot carrying the remaining proceeds
//!   - the full order fiat goes to the day's sell total
//!
//! Slices are proportional: the lot side uses `matched / |lot.qty|`, the
//! order side uses `matched / remaining_order_qty`. Realized gain lands on
//! the day of the closing order.
//!
//! Inventory is rebuilt from scratch on every call; nothing is retained
//! between calls.

use rust_decimal::Decimal;
use tracing::debug;

use crate::daily::DailyBook;
use crate::decimal::{is_dust, pro_rata};
use crate::resolve::{resolve_completed, SkipCounts};
use crate::types::{DailyPoint, Inventory, Lot, LotKind, Order, RealizedMatch, Side};

/// Everything one engine pass produced.
#[derive(Clone, Debug, Default)]
pub struct FifoRun {
    /// Daily series, ascending, rounded to 2 dp.
    pub points: Vec<DailyPoint>,
    /// Open lots left after the last order.
    pub inventory: Inventory,
    /// Every closed lot slice, in processing order.
    pub matches: Vec<RealizedMatch>,
    pub skipped: SkipCounts,
}

impl FifoRun {
    /// Sum of realized gain across all matches (full precision).
    pub fn total_realized(&self) -> Decimal {
        self.matches.iter().map(|m| m.realized).sum()
    }
}

/// Daily buy/sell/realized-revenue series for an order history.
pub fn compute_realized_pnl(orders: &[Order]) -> Vec<DailyPoint> {
    run_fifo(orders).points
}

/// Full engine pass: daily series plus final inventory and match log.
pub fn run_fifo(orders: &[Order]) -> FifoRun {
    let (resolved, skipped) = resolve_completed(orders);

    let mut inventory = Inventory::new();
    let mut book = DailyBook::new();
    let mut matches: Vec<RealizedMatch> = Vec::new();

    for o in &resolved {
        let first_new = matches.len();
        match o.side {
            Side::Buy => {
                buy_fifo(&mut inventory, &mut matches, &o.day, o.quantity, o.fiat);
                book.record_buy(&o.day, o.fiat);
            }
            Side::Sell => {
                sell_fifo(&mut inventory, &mut matches, &o.day, o.quantity, o.fiat);
                book.record_sell(&o.day, o.fiat);
            }
            Side::Unknown => continue,
        }
        for m in &matches[first_new..] {
            book.record_realized(&o.day, m.realized);
        }
    }

    debug!(
        orders = orders.len(),
        processed = resolved.len(),
        skipped = skipped.total(),
        matches = matches.len(),
        open_lots = inventory.len(),
        "fifo pass complete"
    );

    FifoRun {
        points: book.into_points(),
        inventory,
        matches,
        skipped,
    }
}

/// Buy: covers shorts FIFO first, then opens a long lot.
pub(crate) fn buy_fifo(
    inv: &mut Inventory,
    matches: &mut Vec<RealizedMatch>,
    day: &str,
    qty: Decimal,
    fiat: Decimal,
) {
    let mut remaining_qty = qty;
    let mut remaining_fiat = fiat;

    while remaining_qty > Decimal::ZERO {
        let Some(lot) = inv.lots.front_mut() else {
            break;
        };
        if !lot.is_short() {
            break;
        }

        let lot_qty = lot.abs_qty();
        let matched = remaining_qty.min(lot_qty);

        // proceeds received when the short was opened vs. cost to buy back
        let proceeds = pro_rata(lot.fiat_basis, matched, lot_qty);
        let cost = pro_rata(remaining_fiat, matched, remaining_qty);
        let realized = proceeds - cost;

        // qty is negative; move it toward zero
        lot.quantity += matched;
        lot.fiat_basis -= proceeds;
        let closed = is_dust(lot.quantity);
        if closed {
            inv.lots.pop_front();
        }

        remaining_qty -= matched;
        remaining_fiat -= cost;

        matches.push(RealizedMatch {
            day: day.to_string(),
            closed: LotKind::Short,
            quantity: matched,
            lot_basis: proceeds,
            order_fiat: cost,
            realized,
        });
    }

    if remaining_qty > Decimal::ZERO {
        inv.lots.push_back(Lot::long(remaining_qty, remaining_fiat));
    }
}

/// Sell: reduces longs FIFO first, then opens a short lot.
pub(crate) fn sell_fifo(
    inv: &mut Inventory,
    matches: &mut Vec<RealizedMatch>,
    day: &str,
    qty: Decimal,
    fiat: Decimal,
) {
    let mut remaining_qty = qty;
    let mut remaining_fiat = fiat;

    while remaining_qty > Decimal::ZERO {
        let Some(lot) = inv.lots.front_mut() else {
            break;
        };
        if !lot.is_long() {
            break;
        }

        let lot_qty = lot.quantity;
        let matched = lot_qty.min(remaining_qty);

        let cost = pro_rata(lot.fiat_basis, matched, lot_qty);
        let revenue = pro_rata(remaining_fiat, matched, remaining_qty);
        let realized = revenue - cost;

        lot.quantity -= matched;
        lot.fiat_basis -= cost;
        let closed = is_dust(lot.quantity);
        if closed {
            inv.lots.pop_front();
        }

        remaining_qty -= matched;
        remaining_fiat -= revenue;

        matches.push(RealizedMatch {
            day: day.to_string(),
            closed: LotKind::Long,
            quantity: matched,
            lot_basis: cost,
            order_fiat: revenue,
            realized,
        });
    }

    // realization of the new short waits for a covering buy
    if remaining_qty > Decimal::ZERO {
        inv.lots.push_back(Lot::short(remaining_qty, remaining_fiat));
    }
}
