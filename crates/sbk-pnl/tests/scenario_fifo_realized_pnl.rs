//! Scenario: realized PnL through FIFO lot matching.
//!
//! Covers the two reference histories plus FIFO order, proportional
//! allocation and position flips.

use rust_decimal_macros::dec;
use sbk_pnl::{compute_realized_pnl, run_fifo, Decimal, Lot, LotKind, Order, Side};

fn buy(id: &str, fiat: Decimal, qty: Decimal, time: &str) -> Order {
    Order::completed(id, Side::Buy, fiat, qty, time)
}

fn sell(id: &str, fiat: Decimal, qty: Decimal, time: &str) -> Order {
    Order::completed(id, Side::Sell, fiat, qty, time)
}

#[test]
fn scenario_single_round_trip_realizes_on_closing_day() {
    let orders = vec![
        buy("1", dec!(1000), dec!(10), "2025-01-01 09:00:00"),
        sell("2", dec!(1200), dec!(10), "2025-01-02 09:00:00"),
    ];

    let pts = compute_realized_pnl(&orders);

    assert_eq!(pts.len(), 2);
    assert_eq!(pts[0].date, "2025-01-01");
    assert_eq!(pts[0].buy, dec!(1000));
    assert_eq!(pts[0].sell, Decimal::ZERO);
    assert_eq!(pts[0].revenue, Decimal::ZERO);
    assert_eq!(pts[1].date, "2025-01-02");
    assert_eq!(pts[1].buy, Decimal::ZERO);
    assert_eq!(pts[1].sell, dec!(1200));
    assert_eq!(pts[1].revenue, dec!(200));
}

#[test]
fn scenario_sell_spans_two_lots() {
    // BUY 5 for 100, BUY 5 for 110, SELL 7 for 120
    let orders = vec![
        buy("1", dec!(100), dec!(5), "2025-01-01 09:00:00"),
        buy("2", dec!(110), dec!(5), "2025-01-01 10:00:00"),
        sell("3", dec!(120), dec!(7), "2025-01-02 09:00:00"),
    ];

    let run = run_fifo(&orders);

    // lot 1 fully closed: 120*(5/7) - 100
    // lot 2 closed 2 of 5: 120*(2/7) - 110*(2/5)
    // total: 120 - 100 - 44 = -24
    assert_eq!(run.matches.len(), 2);
    assert_eq!(run.matches[1].lot_basis, dec!(44));
    assert_eq!(run.total_realized(), dec!(-24));
    assert_eq!(run.points[1].revenue, dec!(-24));
    assert_eq!(run.points[0].buy, dec!(210));

    // 3 units of the second lot remain at 3/5 of its cost
    assert_eq!(run.inventory.len(), 1);
    assert_eq!(run.inventory.lots()[0], Lot::long(dec!(3), dec!(66)));
}

#[test]
fn scenario_sell_of_first_lot_quantity_is_exact() {
    // awkward binary-float values on purpose
    let orders = vec![
        buy("1", dec!(0.3), dec!(0.1), "2025-02-01 09:00:00"),
        buy("2", dec!(0.7), dec!(0.2), "2025-02-01 09:01:00"),
        buy("3", dec!(1.1), dec!(0.3), "2025-02-01 09:02:00"),
        sell("4", dec!(0.45), dec!(0.1), "2025-02-02 09:00:00"),
    ];

    let run = run_fifo(&orders);

    assert_eq!(run.total_realized(), dec!(0.15));
    assert_eq!(run.points[1].revenue, dec!(0.15));
    let lots = run.inventory.lots();
    assert_eq!(lots.len(), 2);
    assert_eq!(lots[0], Lot::long(dec!(0.2), dec!(0.7)));
    assert_eq!(lots[1], Lot::long(dec!(0.3), dec!(1.1)));
}

#[test]
fn scenario_partial_close_keeps_unit_basis() {
    let orders = vec![
        buy("1", dec!(100), dec!(3), "2025-03-01 09:00:00"),
        sell("2", dec!(40), dec!(1), "2025-03-01 10:00:00"),
    ];

    let run = run_fifo(&orders);
    let lot = &run.inventory.lots()[0];

    assert_eq!(lot.quantity, dec!(2));
    let original = dec!(100) / dec!(3);
    let remaining = lot.unit_basis().unwrap();
    assert!((remaining - original).abs() < dec!(0.000000000000000001));
}

#[test]
fn scenario_sell_larger_than_longs_flips_to_short() {
    let orders = vec![
        buy("1", dec!(100), dec!(1), "2025-04-01 09:00:00"),
        buy("2", dec!(120), dec!(1), "2025-04-01 09:30:00"),
        sell("3", dec!(600), dec!(5), "2025-04-02 09:00:00"),
    ];

    let run = run_fifo(&orders);

    // each long closed produces a sample: 600*(1/5)-100, 480*(1/4)-120
    assert_eq!(run.matches.len(), 2);
    assert!(run.matches.iter().all(|m| m.closed == LotKind::Long));
    assert_eq!(run.matches[0].realized, dec!(20));
    assert_eq!(run.matches[1].realized, Decimal::ZERO);

    // exactly one short with the leftover quantity and proceeds
    assert_eq!(run.inventory.len(), 1);
    assert_eq!(run.inventory.lots()[0], Lot::short(dec!(3), dec!(360)));
    assert_eq!(run.inventory.net_quantity(), dec!(-3));
}

#[test]
fn scenario_short_then_cover_across_days() {
    let orders = vec![
        sell("1", dec!(500), dec!(5), "2025-05-01 09:00:00"),
        buy("2", dec!(180), dec!(2), "2025-05-02 09:00:00"),
        buy("3", dec!(400), dec!(4), "2025-05-03 09:00:00"),
    ];

    let run = run_fifo(&orders);

    // day 2: covers 2 of 5 short units: 500*(2/5) - 180
    assert_eq!(run.points[1].revenue, dec!(20));
    // day 3: covers remaining 3 at 100 each (300 proceeds) for 400*(3/4)
    // then opens a long 1 for the remaining 100
    assert_eq!(run.points[2].revenue, Decimal::ZERO);
    assert_eq!(run.inventory.lots()[0], Lot::long(dec!(1), dec!(100)));
    assert!(run.matches.iter().all(|m| m.closed == LotKind::Short));
}

#[test]
fn scenario_empty_history_yields_empty_series() {
    let run = run_fifo(&[]);
    assert!(run.points.is_empty());
    assert!(run.inventory.is_empty());
    assert_eq!(run.skipped.total(), 0);
}

#[test]
fn scenario_buy_larger_than_shorts_flips_to_long() {
    let orders = vec![
        sell("1", dec!(100), dec!(1), "2025-06-01 09:00:00"),
        sell("2", dec!(120), dec!(1), "2025-06-01 09:30:00"),
        buy("3", dec!(500), dec!(5), "2025-06-02 09:00:00"),
    ];

    let run = run_fifo(&orders);

    // 100 - 500*(1/5), then 120 - 400*(1/4)
    assert_eq!(run.matches.len(), 2);
    assert!(run.matches.iter().all(|m| m.closed == LotKind::Short));
    assert_eq!(run.matches[0].realized, Decimal::ZERO);
    assert_eq!(run.matches[1].realized, dec!(20));
    assert_eq!(run.points[1].revenue, dec!(20));

    // one long with the leftover quantity and cost
    assert_eq!(run.inventory.len(), 1);
    assert_eq!(run.inventory.lots()[0], Lot::long(dec!(3), dec!(300)));
    assert_eq!(run.inventory.net_quantity(), dec!(3));
}
