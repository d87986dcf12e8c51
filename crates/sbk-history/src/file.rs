use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

use sbk_pnl::Order;
use sbk_schemas::decode_orders;

use crate::{sort_newest_first, HistoryError, OrderHistory, PageRequest};

/// Orders stored as a JSON array of export rows in one file.
///
/// The file is read and decoded on the first page request; every later page
/// is cut from that snapshot, so edits made while paging are not seen.
/// A failed load is not cached.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
    snapshot: OnceLock<Vec<Order>>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Order>, HistoryError> {
        let source = self.path.display().to_string();
        let text = fs::read_to_string(&self.path).map_err(|e| HistoryError::Io {
            source: source.clone(),
            message: e.to_string(),
        })?;
        let decoded = decode_orders(&text).map_err(|e| HistoryError::Decode {
            source: source.clone(),
            message: e.to_string(),
        })?;
        if decoded.rejected > 0 {
            warn!(path = %source, rejected = decoded.rejected, "rows rejected while loading order history");
        }
        let mut orders = decoded.orders;
        sort_newest_first(&mut orders);
        debug!(path = %source, rows = orders.len(), "order history snapshot loaded");
        Ok(orders)
    }

    fn snapshot(&self) -> Result<&[Order], HistoryError> {
        if let Some(rows) = self.snapshot.get() {
            return Ok(rows.as_slice());
        }
        let loaded = self.load()?;
        Ok(self.snapshot.get_or_init(|| loaded).as_slice())
    }
}

impl OrderHistory for JsonFileHistory {
    fn name(&self) -> &'static str {
        "json-file"
    }

    fn fetch_page(&self, req: &PageRequest) -> Result<Vec<Order>, HistoryError> {
        req.validate()?;
        Ok(req.slice(self.snapshot()?).to_vec())
    }
}
