//! sbk-pnl
//!
//! FIFO cost-basis and realized-PnL core.
//! - Completed orders only; bad records are skipped and counted, never fatal
//! - FIFO lots with long/short flips inside a single order
//! - Decimal money math (no binary floats)
//! - Daily series, month-of-year spread, cycle velocity, revenue windows,
//!   weekday/hour volume heatmap
//! - Pure deterministic logic (no IO, no wall clock, no retained state)

pub mod calendar;
pub mod decimal;

mod daily;
mod engine;
mod heatmap;
mod monthly;
mod ordering;
mod resolve;
mod revenue;
mod types;
mod velocity;

pub use daily::{DailyBook, DailyBucket};
pub use engine::{compute_realized_pnl, run_fifo, FifoRun};
pub use heatmap::{volume_heatmap, VolumeHeatmap, WEEKDAYS};
pub use monthly::{aggregate_by_month, monthly_spread_from_orders, MonthSummary, SpreadMode, MONTH_NAMES};
pub use ordering::{canonical_cmp, sort_canonical};
pub use resolve::{resolve, resolve_completed, ResolvedOrder, SkipCounts, SkipReason};
pub use revenue::{
    revenue_between, revenue_for_range, trailing_points, ChartRange, RevenueDisplay,
    RevenueSummary,
};
pub use types::{
    DailyPoint, Inventory, Lot, LotKind, Order, OrderStatus, RealizedMatch, Side,
};
pub use velocity::{calculate_cycle_velocity, holding_samples, mean_minutes, VelocityWindow};

pub use rust_decimal::Decimal;
