//! Scenario: results do not depend on the caller's array order.
//!
//! GIVEN: one set of orders presented in several permutations
//! THEN:  every permutation produces the identical daily series, inventory
//!        and match log.

use rust_decimal_macros::dec;
use sbk_pnl::{compute_realized_pnl, run_fifo, Order, Side};

fn history() -> Vec<Order> {
    vec![
        Order::completed("101", Side::Buy, dec!(1000), dec!(10), "2025-07-01 09:00:00"),
        Order::completed("102", Side::Buy, dec!(515.5), dec!(5), "2025-07-01 11:00:00"),
        // tied timestamp: buy sorts before sell
        Order::completed("103", Side::Sell, dec!(330), dec!(3), "2025-07-02 12:00:00"),
        Order::completed("104", Side::Buy, dec!(99), dec!(1), "2025-07-02 12:00:00"),
        Order::completed("105", Side::Sell, dec!(1500), dec!(14), "2025-07-03 08:15:00"),
        Order::completed("106", Side::Sell, dec!(220), dec!(2), "2025-07-03 18:40:00"),
    ]
}

#[test]
fn scenario_permutations_yield_identical_output() {
    let base = history();
    let expected = run_fifo(&base);

    let mut reversed = base.clone();
    reversed.reverse();

    let mut rotated = base.clone();
    rotated.rotate_left(2);

    let mut swapped = base.clone();
    swapped.swap(0, 5);
    swapped.swap(2, 3);

    for perm in [reversed, rotated, swapped] {
        let got = run_fifo(&perm);
        assert_eq!(got.points, expected.points);
        assert_eq!(got.inventory, expected.inventory);
        assert_eq!(got.matches, expected.matches);
    }
}

#[test]
fn scenario_repeated_calls_are_identical() {
    let orders = history();
    let a = compute_realized_pnl(&orders);
    let b = compute_realized_pnl(&orders);
    assert_eq!(a, b);
}

#[test]
fn scenario_tied_timestamp_opens_before_closing() {
    let orders = vec![
        Order::completed("2", Side::Sell, dec!(120), dec!(1), "2025-07-05 10:00:00"),
        Order::completed("1", Side::Buy, dec!(100), dec!(1), "2025-07-05 10:00:00"),
    ];

    let run = run_fifo(&orders);

    // buy processed first, so the sell closes a long instead of opening a short
    assert!(run.inventory.is_empty());
    assert_eq!(run.points[0].revenue, dec!(20));
}
