//! Report commands: `daily`, `monthly`, `velocity`, `revenue`, `heatmap`,
//! `chart`.
//!
//! Each one recomputes from the full order list in the context.

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use tracing::info;

use sbk_pnl::calendar::{fmt_day, parse_order_time, parse_span_end};
use sbk_pnl::{
    aggregate_by_month, holding_samples, mean_minutes, run_fifo, trailing_points,
    volume_heatmap, ChartRange, FifoRun, RevenueSummary, Side, SpreadMode, VelocityWindow,
};
use sbk_schemas::{
    daily_points, month_summaries, HeatmapDto, RevenueSummaryDto, SkipCountsDto, VelocityDto,
};

use super::{print_json, ReportContext};

fn engine_pass(ctx: &ReportContext) -> FifoRun {
    let run = run_fifo(&ctx.orders);
    let skipped = SkipCountsDto::from(&run.skipped);
    info!(
        days = run.points.len(),
        matches = run.matches.len(),
        open_lots = run.inventory.len(),
        skipped = ?skipped.0,
        "fifo pass"
    );
    run
}

pub fn daily(ctx: &ReportContext) -> Result<()> {
    let run = engine_pass(ctx);
    print_json(&daily_points(&run.points))
}

pub fn monthly(ctx: &ReportContext, spread_mode: Option<&str>) -> Result<()> {
    let mode = match spread_mode {
        Some(raw) => SpreadMode::parse(raw)
            .with_context(|| format!("invalid --spread-mode {raw:?}; expected weighted | unweighted"))?,
        None => ctx.cfg.spread_mode,
    };
    let run = engine_pass(ctx);
    let months = aggregate_by_month(&run.points, mode);
    info!(months = months.len(), spread_mode = %mode, "monthly summary");
    print_json(&month_summaries(&months))
}

pub fn velocity(ctx: &ReportContext, window: Option<&str>) -> Result<()> {
    let window = match window {
        Some(raw) => VelocityWindow::parse(raw)
            .with_context(|| format!("invalid --window {raw:?}; expected 7d | 30d | 90d"))?,
        None => ctx.cfg.velocity_window,
    };
    let samples = holding_samples(&ctx.orders, window, ctx.now);
    let minutes = mean_minutes(&samples);
    info!(window = %window, samples = samples.len(), minutes, "cycle velocity");
    print_json(&VelocityDto::new(window, minutes, samples.len()))
}

pub fn revenue(ctx: &ReportContext) -> Result<()> {
    let run = engine_pass(ctx);
    let today = ctx.now.date();
    let summary = RevenueSummary::compute(&run.points, today);
    print_json(&RevenueSummaryDto::new(fmt_day(today), &summary))
}

pub fn heatmap(ctx: &ReportContext, side: &str, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let side = match Side::parse(side) {
        Side::Unknown => bail!("invalid --side {side:?}; expected buy | sell"),
        s => s,
    };
    let span = match (from, to) {
        (None, None) => None,
        (from, to) => Some((
            bound(from, "--from", parse_order_time)?.unwrap_or(NaiveDateTime::MIN),
            bound(to, "--to", parse_span_end)?.unwrap_or(NaiveDateTime::MAX),
        )),
    };
    let map = volume_heatmap(&ctx.orders, side, span);
    info!(side = side.as_str(), orders = map.order_count, "heatmap built");
    print_json(&HeatmapDto::from(&map))
}

fn bound(
    raw: Option<&str>,
    flag: &str,
    parse: fn(&str) -> Option<NaiveDateTime>,
) -> Result<Option<NaiveDateTime>> {
    raw.map(|r| {
        parse(r).with_context(|| format!("invalid {flag} {r:?}; expected YYYY-MM-DD[ HH:MM:SS]"))
    })
    .transpose()
}

pub fn chart(ctx: &ReportContext, range: Option<&str>) -> Result<()> {
    let range = match range {
        Some(raw) => ChartRange::parse(raw)
            .with_context(|| format!("invalid --range {raw:?}; expected 7d | 30d | 90d"))?,
        None => ctx.cfg.chart_range,
    };
    let run = engine_pass(ctx);
    let points = trailing_points(&run.points, range);
    info!(range = %range, days = points.len(), "chart slice");
    print_json(&daily_points(&points))
}
