//! Low-level wire types and constants.
//!
//! This module defines:
//! - the request path and the success code,
//! - the JSON request body,
//! - the response envelope and the raw record row.
//!
//! Record rows are decoded loosely: the server sends most numeric fields
//! as strings (`"150.5"`), older builds sent plain numbers, and any field
//! may be missing. Conversion into a typed `TradeRecord` lives here too.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use flow_core::{CallPut, FlowColor, QueryFilter, TradeRecord};

/// Query endpoint, relative to the server base URL.
pub const TRADES_PATH: &str = "/api/option-trades";

/// Application-level success code in the response envelope.
pub const SUCCESS_CODE: i64 = 200;

/// JSON request body: `{offset, limit, ...filter}`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub offset: usize,
    pub limit: usize,
    #[serde(flatten)]
    pub filter: &'a QueryFilter,
}

/// Response envelope: `{code, message?, data, total?}`.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<WireTradeRow>>,
    /// Total matching rows server-side. Not used by the client.
    #[serde(default)]
    pub total: Option<i64>,
}

/// One row as the server sends it.
#[derive(Debug, Default, Deserialize)]
pub struct WireTradeRow {
    #[serde(rename = "Time", default)]
    pub time: Option<Value>,
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<Value>,
    #[serde(rename = "CreationDate", default)]
    pub creation_date: Option<Value>,
    #[serde(rename = "Exp", default)]
    pub exp: Option<Value>,
    #[serde(rename = "Strike", default)]
    pub strike: Option<Value>,
    #[serde(rename = "CP", default)]
    pub cp: Option<Value>,
    #[serde(rename = "Spot", default)]
    pub spot: Option<Value>,
    #[serde(rename = "Details", default)]
    pub details: Option<Value>,
    #[serde(rename = "Type", default)]
    pub trade_type: Option<Value>,
    #[serde(rename = "Value", default)]
    pub value: Option<Value>,
    #[serde(rename = "Iv", default)]
    pub iv: Option<Value>,
    #[serde(rename = "Color", default)]
    pub color: Option<Value>,
}

impl WireTradeRow {
    pub fn into_record(self) -> TradeRecord {
        TradeRecord {
            time: text(&self.time),
            symbol: text(&self.symbol),
            expiration: text(&self.exp),
            strike: number(&self.strike),
            call_put: CallPut::parse(&text(&self.cp)),
            spot: number(&self.spot),
            details: text(&self.details),
            trade_type: text(&self.trade_type),
            value: number(&self.value),
            implied_volatility: number(&self.iv),
            color: FlowColor::parse(&text(&self.color)),
            creation_timestamp: integer(&self.creation_date).unwrap_or(0),
        }
    }
}

/// String view of a loose field. `null` / missing => empty.
fn text(v: &Option<Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Numeric view of a loose field. Unparseable => `None`.
fn number(v: &Option<Value>) -> Option<f64> {
    match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn integer(v: &Option<Value>) -> Option<i64> {
    match v {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
