//! sbk-schemas
//!
//! Serialization boundary: export-row decoding into [`sbk_pnl::Order`] and
//! the JSON shapes handed to report consumers.

mod dto;
mod wire;

pub use dto::{
    daily_points, month_summaries, DailyPointDto, HeatmapDto, MonthSummaryDto, RevenueSummaryDto,
    SkipCountsDto, VelocityDto,
};
pub use wire::{
    decode_order_value, decode_orders, encode_orders, DecodedOrders, OrderRecord, WireError,
};
