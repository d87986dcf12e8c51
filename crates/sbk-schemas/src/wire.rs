//! Order export wire format.
//!
//! Field names are the spreadsheet column headers of the upstream export
//! and are significant: `"Order No."`, `Type`, `"Fiat Amount"`, `Price`,
//! `"Coin Amount"`, `Counterparty`, `Status`, `Time`.
//!
//! Numbers are lenient: a JSON number, a numeric string or `null` are all
//! accepted, and anything unusable becomes `None` so record-level recovery
//! can decide what to do. A field holding the wrong JSON type altogether
//! (an object for `Time`, say) rejects the whole row.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use sbk_pnl::decimal::parse_decimal;
use sbk_pnl::{Order, OrderStatus, Side};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Order No.", default, deserialize_with = "order_no")]
    pub order_no: String,

    #[serde(rename = "Type", default, deserialize_with = "text")]
    pub kind: String,

    #[serde(
        rename = "Fiat Amount",
        default,
        deserialize_with = "lenient_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub fiat_amount: Option<Decimal>,

    #[serde(
        rename = "Price",
        default,
        deserialize_with = "lenient_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub price: Option<Decimal>,

    #[serde(
        rename = "Coin Amount",
        default,
        deserialize_with = "lenient_decimal",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub coin_amount: Option<Decimal>,

    #[serde(rename = "Counterparty", default, deserialize_with = "text")]
    pub counterparty: String,

    #[serde(rename = "Status", default, deserialize_with = "text")]
    pub status: String,

    #[serde(rename = "Time", default, deserialize_with = "text")]
    pub time: String,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Order {
            order_id: r.order_no,
            side: Side::parse(&r.kind),
            fiat_amount: r.fiat_amount,
            price: r.price,
            coin_amount: r.coin_amount,
            counterparty: r.counterparty,
            status: OrderStatus::parse(&r.status),
            time: r.time,
        }
    }
}

impl From<&Order> for OrderRecord {
    fn from(o: &Order) -> Self {
        OrderRecord {
            order_no: o.order_id.clone(),
            kind: o.side.as_str().to_string(),
            fiat_amount: o.fiat_amount,
            price: o.price,
            coin_amount: o.coin_amount,
            counterparty: o.counterparty.clone(),
            status: o.status.as_str().to_string(),
            time: o.time.clone(),
        }
    }
}

fn order_no<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        // arbitrary_precision: the literal digits, not an f64 rendering
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "\"Order No.\" must be a number or string, got {}",
            json_kind(&other)
        ))),
    }
}

fn text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, got {}",
            json_kind(&other)
        ))),
    }
}

fn lenient_decimal<'de, D>(d: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(&s),
        _ => None,
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural decode failures. Row-level problems never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The payload is not valid JSON.
    Json(String),
    /// The payload is JSON but not an array of orders.
    NotAnArray { found: &'static str },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Json(msg) => write!(f, "invalid json: {msg}"),
            WireError::NotAnArray { found } => {
                write!(f, "expected an array of orders, got {found}")
            }
        }
    }
}

impl std::error::Error for WireError {}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Orders decoded from one payload plus the number of rows left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedOrders {
    pub orders: Vec<Order>,
    pub rejected: usize,
}

/// Decode a JSON array of export rows.
pub fn decode_orders(json: &str) -> Result<DecodedOrders, WireError> {
    let doc: Value = serde_json::from_str(json).map_err(|e| WireError::Json(e.to_string()))?;
    decode_order_value(doc)
}

/// [`decode_orders`] for an already parsed document.
pub fn decode_order_value(doc: Value) -> Result<DecodedOrders, WireError> {
    let items = match doc {
        Value::Array(items) => items,
        other => {
            return Err(WireError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut out = DecodedOrders {
        orders: Vec::with_capacity(items.len()),
        rejected: 0,
    };
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<OrderRecord>(item) {
            Ok(record) => out.orders.push(record.into()),
            Err(e) => {
                warn!(index, error = %e, "order row rejected");
                out.rejected += 1;
            }
        }
    }
    Ok(out)
}

/// Render orders back into the export format.
pub fn encode_orders(orders: &[Order]) -> Result<String, WireError> {
    let records: Vec<OrderRecord> = orders.iter().map(OrderRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| WireError::Json(e.to_string()))
}
