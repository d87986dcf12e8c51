//! Canonical processing order.
//!
//! FIFO matching is order-sensitive, so every pass sorts its input into one
//! canonical order before touching inventory. The same set of orders must
//! always produce the same result regardless of how the caller's array was
//! arranged.
//!
//! # Canonical sort key
//!
//! `(at, side_ord, order_id, quantity)` ascending.
//! `side_ord`: `Buy = 0`, `Sell = 1` so that on a tied timestamp lots are
//! opened before they are closed.

use std::cmp::Ordering;

use crate::resolve::ResolvedOrder;
use crate::types::Side;

fn side_ord(s: Side) -> u8 {
    match s {
        Side::Buy => 0,
        Side::Sell => 1,
        Side::Unknown => 2,
    }
}

/// Canonical comparison of two resolved orders.
pub fn canonical_cmp(a: &ResolvedOrder, b: &ResolvedOrder) -> Ordering {
    a.at.cmp(&b.at)
        .then_with(|| side_ord(a.side).cmp(&side_ord(b.side)))
        .then_with(|| a.order_id.cmp(&b.order_id))
        .then_with(|| a.quantity.cmp(&b.quantity))
}

/// Sort in place into canonical order. Stable, so full ties keep input order.
pub fn sort_canonical(orders: &mut [ResolvedOrder]) {
    orders.sort_by(canonical_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_order_time;
    use rust_decimal_macros::dec;

    fn ro(id: &str, side: Side, time: &str) -> ResolvedOrder {
        ResolvedOrder {
            order_id: id.to_string(),
            side,
            quantity: dec!(1),
            fiat: dec!(1),
            at: parse_order_time(time).unwrap(),
            day: time[..10].to_string(),
        }
    }

    #[test]
    fn earlier_time_first() {
        let mut v = vec![
            ro("a", Side::Buy, "2025-01-02 00:00:00"),
            ro("b", Side::Buy, "2025-01-01 00:00:00"),
        ];
        sort_canonical(&mut v);
        assert_eq!(v[0].order_id, "b");
    }

    #[test]
    fn buy_before_sell_on_tied_time() {
        let mut v = vec![
            ro("1", Side::Sell, "2025-01-01 10:00:00"),
            ro("2", Side::Buy, "2025-01-01 10:00:00"),
        ];
        sort_canonical(&mut v);
        assert_eq!(v[0].side, Side::Buy);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let mut v = vec![
            ro("c", Side::Sell, "2025-01-01 10:00:00"),
            ro("a", Side::Buy, "2025-01-01 10:00:00"),
            ro("b", Side::Buy, "2025-01-01 10:00:00"),
        ];
        sort_canonical(&mut v);
        let once = v.clone();
        sort_canonical(&mut v);
        assert_eq!(v, once);
        assert_eq!(v[0].order_id, "a");
        assert_eq!(v[1].order_id, "b");
    }
}
