use std::collections::VecDeque;

use rust_decimal::Decimal;

/// BUY or SELL as recorded on the order. Anything else parses to `Unknown`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Buy,
    Sell,
    Unknown,
}

impl Side {
    /// Case-insensitive parse (`"BUY"`, `"buy"`, `" Sell "`).
    pub fn parse(raw: &str) -> Side {
        let t = raw.trim();
        if t.eq_ignore_ascii_case("buy") {
            Side::Buy
        } else if t.eq_ignore_ascii_case("sell") {
            Side::Sell
        } else {
            Side::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
            Side::Unknown => "UNKNOWN",
        }
    }
}

/// Order lifecycle status. Only `Completed` orders move inventory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Completed,
    Canceled,
    Other,
}

impl OrderStatus {
    /// Case-insensitive parse; `"Cancelled"` is accepted as `Canceled`.
    pub fn parse(raw: &str) -> OrderStatus {
        let t = raw.trim();
        if t.eq_ignore_ascii_case("completed") {
            OrderStatus::Completed
        } else if t.eq_ignore_ascii_case("canceled") || t.eq_ignore_ascii_case("cancelled") {
            OrderStatus::Canceled
        } else {
            OrderStatus::Other
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Other => "OTHER",
        }
    }
}

/// One executed (or attempted) trade against fiat, as handed to the core.
///
/// Numeric fields are optional because upstream exports may leave them
/// empty or non-finite; [`crate::resolve`] decides what is usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: String,
    pub side: Side,
    /// Total fiat moved: cost for a BUY, proceeds for a SELL.
    pub fiat_amount: Option<Decimal>,
    /// Unit price; only used when `fiat_amount` is missing.
    pub price: Option<Decimal>,
    pub coin_amount: Option<Decimal>,
    pub counterparty: String,
    pub status: OrderStatus,
    /// `YYYY-MM-DD HH:MM:SS[.fff][offset]`; the first 10 chars are the day key.
    pub time: String,
}

impl Order {
    /// A completed order with an explicit fiat total and no counterparty.
    pub fn completed<I, T>(
        order_id: I,
        side: Side,
        fiat_amount: Decimal,
        coin_amount: Decimal,
        time: T,
    ) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            order_id: order_id.into(),
            side,
            fiat_amount: Some(fiat_amount),
            price: None,
            coin_amount: Some(coin_amount),
            counterparty: String::new(),
            status: OrderStatus::Completed,
            time: time.into(),
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_counterparty<S: Into<String>>(mut self, counterparty: S) -> Self {
        self.counterparty = counterparty.into();
        self
    }

    /// Drop the fiat total so the engine falls back to `price × coin_amount`.
    pub fn without_fiat(mut self) -> Self {
        self.fiat_amount = None;
        self
    }
}

/// Which kind of lot a match closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LotKind {
    Long,
    Short,
}

/// An open FIFO lot. `quantity` carries direction:
/// +qty = long lot, -qty = short lot.
///
/// `fiat_basis` is the remaining cost of a long lot or the remaining
/// proceeds of a short lot; it shrinks in proportion to the quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lot {
    pub quantity: Decimal,
    pub fiat_basis: Decimal,
}

impl Lot {
    pub fn long(qty: Decimal, cost: Decimal) -> Self {
        debug_assert!(qty > Decimal::ZERO);
        Self {
            quantity: qty,
            fiat_basis: cost,
        }
    }

    pub fn short(qty: Decimal, proceeds: Decimal) -> Self {
        debug_assert!(qty > Decimal::ZERO);
        Self {
            quantity: -qty,
            fiat_basis: proceeds,
        }
    }

    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    pub fn abs_qty(&self) -> Decimal {
        self.quantity.abs()
    }

    /// Basis per unit, `None` for an empty lot.
    pub fn unit_basis(&self) -> Option<Decimal> {
        crate::decimal::ratio(self.fiat_basis, self.abs_qty())
    }
}

/// FIFO queue of open lots, oldest at the front.
///
/// The engine keeps a single polarity at a time: opposite-polarity lots are
/// always drained from the front before a new lot is pushed at the back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub(crate) lots: VecDeque<Lot>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lots(&self) -> &VecDeque<Lot> {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Signed position (+long, -short, 0 flat).
    pub fn net_quantity(&self) -> Decimal {
        self.lots.iter().map(|l| l.quantity).sum()
    }

    /// Sum of remaining basis across lots.
    pub fn total_basis(&self) -> Decimal {
        self.lots.iter().map(|l| l.fiat_basis).sum()
    }
}

/// One closed slice of a lot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RealizedMatch {
    /// Day key of the closing order.
    pub day: String,
    pub closed: LotKind,
    pub quantity: Decimal,
    /// Slice of the lot's basis released by this match.
    pub lot_basis: Decimal,
    /// Slice of the closing order's fiat attributed to this match.
    pub order_fiat: Decimal,
    pub realized: Decimal,
}

/// One output row of the daily series. Values are rounded to 2 dp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub buy: Decimal,
    pub sell: Decimal,
    pub revenue: Decimal,
}

impl DailyPoint {
    pub fn new<S: Into<String>>(date: S, buy: Decimal, sell: Decimal, revenue: Decimal) -> Self {
        Self {
            date: date.into(),
            buy,
            sell,
            revenue,
        }
    }
}
