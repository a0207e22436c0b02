//! Projection of the visible records into display rows.
//!
//! This is the UI-independent half of rendering: every cell is already a
//! formatted string and every row carries its color scheme. The terminal
//! client only maps these onto widgets.

use crate::format::{format_expiration, format_iv, format_money, format_price};
use crate::record::{CallPut, FlowColor, TradeRecord};

/// Column headers, in display order.
pub const COLUMNS: [&str; 10] = [
    "Time", "Symbol", "Exp", "Strike", "C/P", "Spot", "Details", "Type", "Value", "IV",
];

/// Row color scheme derived from the record's flow color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowStyle {
    /// Magenta text, transparent background.
    Magenta,
    /// Yellow text, transparent background.
    Yellow,
    /// White text on the dark default background.
    Default,
}

impl RowStyle {
    pub fn for_color(color: FlowColor) -> Self {
        match color {
            FlowColor::Magenta => RowStyle::Magenta,
            FlowColor::Yellow => RowStyle::Yellow,
            FlowColor::Default => RowStyle::Default,
        }
    }
}

/// Background of [`RowStyle::Default`] rows.
pub const DEFAULT_ROW_BG: (u8, u8, u8) = (33, 42, 51);

/// Tint of the call/put cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CpTint {
    /// Calls: light green.
    Call,
    /// Puts, and rows with no call/put at all: red.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub style: RowStyle,
    pub cp_tint: CpTint,
    /// Lower-cased trade type, used to pick a type highlight.
    pub type_class: String,
    /// One entry per [`COLUMNS`] header.
    pub cells: [String; 10],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedTable {
    pub title: String,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render `records` in the order given. No sorting happens here.
pub fn render(records: &[TradeRecord]) -> RenderedTable {
    RenderedTable {
        title: header_title(records.len()),
        rows: records.iter().map(render_row).collect(),
    }
}

/// Header text with the live record count.
pub fn header_title(count: usize) -> String {
    format!("OPTIONS ({}) > ALL", count)
}

pub fn render_row(record: &TradeRecord) -> RenderedRow {
    let cp = record.call_put.map(CallPut::as_str).unwrap_or("");
    let cp_tint = match record.call_put {
        Some(CallPut::Call) => CpTint::Call,
        _ => CpTint::Other,
    };

    RenderedRow {
        style: RowStyle::for_color(record.color),
        cp_tint,
        type_class: record.trade_type.to_lowercase(),
        cells: [
            record.time.clone(),
            record.symbol.clone(),
            format_expiration(&record.expiration),
            format_price(record.strike),
            cp.to_string(),
            format_price(record.spot),
            record.details.clone(),
            record.trade_type.clone(),
            format_money(record.value),
            format_iv(record.implied_volatility),
        ],
    }
}
