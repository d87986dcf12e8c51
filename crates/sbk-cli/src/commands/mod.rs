//! Command handlers for `sbk`.
//!
//! Shared loading (config, orders, clock) lives here; the report bodies are
//! in [`report`].

pub mod report;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use sbk_config::{load_layered_yaml, report_unused_keys, ReportConfig, UnusedKeyPolicy};
use sbk_history::{fetch_all, JsonFileHistory, OrderHistory};
use sbk_pnl::calendar::parse_order_time;
use sbk_pnl::Order;

use crate::CommonArgs;

/// Everything a report needs, resolved once per invocation.
pub struct ReportContext {
    pub cfg: ReportConfig,
    pub orders: Vec<Order>,
    /// Naive wall clock in `cfg.timezone`.
    pub now: NaiveDateTime,
}

pub fn load_context(common: &CommonArgs) -> Result<ReportContext> {
    let cfg = load_report_config(&common.config_paths)?;

    let Some(path) = common.orders.as_ref() else {
        bail!("no order history: pass --orders <file> or set SBK_ORDERS");
    };
    let history = JsonFileHistory::new(path);
    let orders = fetch_all(&history, cfg.page_size)
        .with_context(|| format!("load orders via {} from {}", history.name(), path.display()))?;

    let now = match common.now.as_deref() {
        Some(raw) => parse_order_time(raw)
            .with_context(|| format!("invalid --now {raw:?}; expected YYYY-MM-DD HH:MM:SS"))?,
        None => Utc::now().with_timezone(&cfg.timezone).naive_local(),
    };

    info!(
        orders = orders.len(),
        timezone = cfg.timezone.name(),
        now = %now,
        "report context loaded"
    );

    Ok(ReportContext { cfg, orders, now })
}

fn load_report_config(paths: &[String]) -> Result<ReportConfig> {
    if paths.is_empty() {
        return Ok(ReportConfig::default());
    }
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;
    warn_unused_keys(&loaded.config_json)?;
    info!(config_hash = %loaded.config_hash, "config loaded");
    ReportConfig::from_config_json(&loaded.config_json)
}

fn warn_unused_keys(config_json: &serde_json::Value) -> Result<()> {
    let report = report_unused_keys(config_json, UnusedKeyPolicy::Warn)?;
    for key in &report.unused_leaf_pointers {
        warn!(key = %key, "config key is not used by any report");
    }
    Ok(())
}

/// `sbk config-hash`: hash line, then canonical JSON.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;
    warn_unused_keys(&loaded.config_json)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report json failed")?;
    println!("{json}");
    Ok(())
}
