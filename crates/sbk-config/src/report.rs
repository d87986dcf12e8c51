use anyhow::{bail, Result};
use chrono_tz::Tz;
use serde_json::Value;

use sbk_pnl::{ChartRange, SpreadMode, VelocityWindow};

/// Same window as the history provider's default page.
pub const DEFAULT_PAGE_SIZE: usize = 300;

/// Typed report settings.
///
/// Every key is optional; a missing key takes the default. A present key
/// with a bad value is an error, never silently defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Zone that defines "now" and "today" for rolling windows.
    pub timezone: Tz,
    pub spread_mode: SpreadMode,
    pub velocity_window: VelocityWindow,
    pub chart_range: ChartRange,
    pub page_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            spread_mode: SpreadMode::Weighted,
            velocity_window: VelocityWindow::Days30,
            chart_range: ChartRange::Days90,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ReportConfig {
    pub fn from_config_json(v: &Value) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(raw) = read_str(v, "/report/timezone")? {
            cfg.timezone = match raw.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => bail!("CONFIG_INVALID /report/timezone: unknown zone {raw:?}"),
            };
        }
        if let Some(raw) = read_str(v, "/report/spread_mode")? {
            cfg.spread_mode = match SpreadMode::parse(raw) {
                Some(m) => m,
                None => bail!(
                    "CONFIG_INVALID /report/spread_mode: expected weighted|unweighted, got {raw:?}"
                ),
            };
        }
        if let Some(raw) = read_str(v, "/report/velocity_window")? {
            cfg.velocity_window = match VelocityWindow::parse(raw) {
                Some(w) => w,
                None => bail!(
                    "CONFIG_INVALID /report/velocity_window: expected 7d|30d|90d, got {raw:?}"
                ),
            };
        }
        if let Some(raw) = read_str(v, "/report/chart_range")? {
            cfg.chart_range = match ChartRange::parse(raw) {
                Some(r) => r,
                None => bail!("CONFIG_INVALID /report/chart_range: expected 7d|30d|90d, got {raw:?}"),
            };
        }
        if let Some(n) = v.pointer("/history/page_size") {
            cfg.page_size = match n.as_u64() {
                Some(n) if n > 0 => n as usize,
                _ => bail!("CONFIG_INVALID /history/page_size: expected a positive integer, got {n}"),
            };
        }

        Ok(cfg)
    }
}

fn read_str<'a>(v: &'a Value, ptr: &str) -> Result<Option<&'a str>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => bail!("CONFIG_INVALID {ptr}: expected a string, got {other}"),
    }
}
