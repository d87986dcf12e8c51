//! Order-history provider boundary.
//!
//! The core never owns an order store; a caller hands it whatever an
//! [`OrderHistory`] returns. Pages are offset/limit windows over the history
//! ordered newest first, the same window shape the dashboard route serves.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use sbk_pnl::calendar::parse_order_time;
use sbk_pnl::Order;

mod file;
mod memory;

pub use file::JsonFileHistory;
pub use memory::InMemoryHistory;

/// Default page size, matching the dashboard's `range(0, 299)` window.
pub const DEFAULT_PAGE_LIMIT: usize = 300;

// ---------------------------------------------------------------------------
// Page request
// ---------------------------------------------------------------------------

/// `offset` rows skipped, at most `limit` rows returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// A zero limit could never make progress.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.limit == 0 {
            return Err(HistoryError::InvalidPage {
                offset: self.offset,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// The window applied to a newest-first slice.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset.min(rows.len());
        let end = self.offset.saturating_add(self.limit).min(rows.len());
        &rows[start..end]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The backing store could not be read.
    Io { source: String, message: String },
    /// The store was read but its contents are not an order list.
    Decode { source: String, message: String },
    InvalidPage { offset: usize, limit: usize },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io { source, message } => {
                write!(f, "failed to read order history {source}: {message}")
            }
            HistoryError::Decode { source, message } => {
                write!(f, "failed to decode order history {source}: {message}")
            }
            HistoryError::InvalidPage { offset, limit } => {
                write!(f, "invalid page request offset={offset} limit={limit}")
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Paginated source of raw orders.
///
/// Object safe, so callers can hold a `Box<dyn OrderHistory>`.
pub trait OrderHistory: Send + Sync {
    /// Short name for logs (e.g. `"json-file"`).
    fn name(&self) -> &'static str;

    /// One page of orders, newest first.
    ///
    /// A page shorter than `req.limit` means the history is exhausted.
    fn fetch_page(&self, req: &PageRequest) -> Result<Vec<Order>, HistoryError>;
}

/// Read the whole history by walking pages until a short one comes back.
///
/// The result keeps the provider's newest-first order; the engines sort
/// their own input.
pub fn fetch_all(history: &dyn OrderHistory, page_size: usize) -> Result<Vec<Order>, HistoryError> {
    let mut req = PageRequest::new(0, page_size);
    req.validate()?;

    let mut out = Vec::new();
    loop {
        let page = history.fetch_page(&req)?;
        let n = page.len();
        debug!(
            provider = history.name(),
            offset = req.offset,
            rows = n,
            "history page fetched"
        );
        out.extend(page);
        if n < req.limit {
            break;
        }
        req.offset += n;
    }
    Ok(out)
}

/// Newest first by parsed time; unparseable times go last in input order.
pub(crate) fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        match (parse_order_time(&a.time), parse_order_time(&b.time)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
