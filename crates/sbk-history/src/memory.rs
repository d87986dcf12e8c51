use sbk_pnl::Order;

use crate::{sort_newest_first, HistoryError, OrderHistory, PageRequest};

/// Caller-owned order store held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    orders: Vec<Order>,
}

impl InMemoryHistory {
    pub fn new(mut orders: Vec<Order>) -> Self {
        sort_newest_first(&mut orders);
        Self { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn insert(&mut self, order: Order) {
        self.orders.push(order);
        sort_newest_first(&mut self.orders);
    }
}

impl OrderHistory for InMemoryHistory {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch_page(&self, req: &PageRequest) -> Result<Vec<Order>, HistoryError> {
        req.validate()?;
        Ok(req.slice(&self.orders).to_vec())
    }
}
