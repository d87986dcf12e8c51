//! Scenario: metric layer on top of the engine output.
//!
//! Month-of-year spread (including cross-year collision), revenue windows,
//! trailing chart slice, cycle velocity and the volume heatmap, all driven
//! from one order history.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use sbk_pnl::{
    aggregate_by_month, calculate_cycle_velocity, compute_realized_pnl,
    monthly_spread_from_orders, trailing_points, volume_heatmap, ChartRange, Decimal, Order,
    RevenueSummary, Side, SpreadMode, VelocityWindow,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn history() -> Vec<Order> {
    vec![
        // January 2024
        Order::completed("1", Side::Buy, dec!(1000), dec!(10), "2024-01-10 09:00:00"),
        Order::completed("2", Side::Sell, dec!(1100), dec!(10), "2024-01-11 09:00:00"),
        // January 2025, same month index
        Order::completed("3", Side::Buy, dec!(2000), dec!(20), "2025-01-20 09:00:00"),
        Order::completed("4", Side::Sell, dec!(2300), dec!(20), "2025-01-20 10:30:00"),
        // February 2025
        Order::completed("5", Side::Buy, dec!(500), dec!(5), "2025-02-03 14:00:00"),
        Order::completed("6", Side::Sell, dec!(560), dec!(5), "2025-02-04 15:00:00"),
    ]
}

#[test]
fn scenario_month_index_collapses_years() {
    let months = aggregate_by_month(&compute_realized_pnl(&history()), SpreadMode::Weighted);

    assert_eq!(months.len(), 2);
    let jan = &months[0];
    assert_eq!(jan.month, "Jan");
    assert_eq!(jan.total_buy, dec!(3000));
    assert_eq!(jan.total_sell, dec!(3400));
    assert_eq!(jan.revenue, dec!(400));
    // 400 / 3000 = 0.1333..
    assert_eq!(jan.avg_spread, dec!(0.13));

    let feb = &months[1];
    assert_eq!(feb.month_index, 1);
    assert_eq!(feb.avg_spread, dec!(0.12));
}

#[test]
fn scenario_unweighted_spread_ignores_sell_only_days() {
    let months = monthly_spread_from_orders(&history(), SpreadMode::Unweighted);

    // January rows with a buy: 2024-01-10 (-1.0) and 2025-01-20 (0.15)
    assert_eq!(months[0].avg_spread, dec!(-0.43));
    // February: only 2025-02-03 has a buy, and it has no sell
    assert_eq!(months[1].avg_spread, dec!(-1.00));
}

#[test]
fn scenario_revenue_windows_for_fixed_today() {
    let pts = compute_realized_pnl(&history());
    let today = NaiveDate::from_ymd_opt(2025, 2, 4).unwrap();

    let s = RevenueSummary::compute(&pts, today);

    assert_eq!(s.this_week, dec!(60));
    assert_eq!(s.this_month, dec!(60));
    assert_eq!(s.last_7_days, dec!(60));
    assert_eq!(s.last_30_days, dec!(360));
    assert_eq!(s.total, dec!(460));
    assert_eq!(s.display().last_90_days, "360");
}

#[test]
fn scenario_chart_slice_follows_last_point() {
    let pts = compute_realized_pnl(&history());
    let last_30 = trailing_points(&pts, ChartRange::Days30);
    let dates: Vec<&str> = last_30.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-20", "2025-02-03", "2025-02-04"]);
}

#[test]
fn scenario_velocity_over_recent_window() {
    let now = at("2025-02-05 00:00:00");

    // 30d window: 2025-01-20 (90 min) and 2025-02-03→04 (25 h)
    let minutes = calculate_cycle_velocity(&history(), VelocityWindow::Days30, now);
    assert_eq!(minutes, (90 + 25 * 60) / 2);

    // 7d window: only the February round trip
    let minutes = calculate_cycle_velocity(&history(), VelocityWindow::Days7, now);
    assert_eq!(minutes, 25 * 60);
}

#[test]
fn scenario_velocity_without_sells_is_zero() {
    let buys: Vec<Order> = history().into_iter().filter(|o| o.side == Side::Buy).collect();
    let now = at("2025-02-05 00:00:00");
    assert_eq!(calculate_cycle_velocity(&buys, VelocityWindow::Days90, now), 0);
}

#[test]
fn scenario_heatmap_of_sells() {
    let map = volume_heatmap(&history(), Side::Sell, None);

    assert_eq!(map.order_count, 3);
    assert_eq!(map.total_volume, dec!(3960));
    // 2025-01-20 is a Monday, 2025-02-04 a Tuesday, 2024-01-11 a Thursday
    assert_eq!(map.cell(0, 10), dec!(2300));
    assert_eq!(map.cell(1, 15), dec!(560));
    assert_eq!(map.cell(3, 9), dec!(1100));
    assert_eq!(map.cell(0, 9), Decimal::ZERO);
    assert_eq!(map.max_cell, dec!(2300));
}

#[test]
fn scenario_heatmap_span_with_date_only_end() {
    use sbk_pnl::calendar::{parse_order_time, parse_span_end};

    let span = (
        parse_order_time("2025-01-01").unwrap(),
        parse_span_end("2025-01-20").unwrap(),
    );
    let map = volume_heatmap(&history(), Side::Sell, Some(span));

    // the 10:30 sell on the 20th is inside a span ending on that date
    assert_eq!(map.order_count, 1);
    assert_eq!(map.cell(0, 10), dec!(2300));
}
