//! Option trade records as held by the dataset store.
//!
//! These are **transport-agnostic**: the JSON codec in `flow-protocol`
//! decodes the server's loosely-typed rows into [`TradeRecord`]s, filling
//! in defaults for anything missing.

/// Call / put side of an option contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CallPut {
    Call,
    Put,
}

impl CallPut {
    /// Wire / display representation (`"CALL"` / `"PUT"`).
    pub fn as_str(self) -> &'static str {
        match self {
            CallPut::Call => "CALL",
            CallPut::Put => "PUT",
        }
    }

    /// Parse a call/put label, case-insensitive. Unknown labels yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("CALL") {
            Some(CallPut::Call)
        } else if s.eq_ignore_ascii_case("PUT") {
            Some(CallPut::Put)
        } else {
            None
        }
    }
}

/// Flow color assigned by the upstream feed. Drives row styling.
///
/// Anything other than yellow or magenta (including `WHITE`) renders
/// with the default scheme.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FlowColor {
    Yellow,
    Magenta,
    #[default]
    Default,
}

impl FlowColor {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "YELLOW" => FlowColor::Yellow,
            "MAGENTA" => FlowColor::Magenta,
            _ => FlowColor::Default,
        }
    }
}

/// One option trade event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeRecord {
    /// Trade time, already formatted by the server (`HH:MM:SS`, UTC).
    pub time: String,
    pub symbol: String,
    /// Expiration date in whatever format the server sent.
    pub expiration: String,
    pub strike: Option<f64>,
    pub call_put: Option<CallPut>,
    pub spot: Option<f64>,
    pub details: String,
    /// Free-form label such as `SWEEP` or `BLOCK`.
    pub trade_type: String,
    /// Premium paid, in dollars.
    pub value: Option<f64>,
    pub implied_volatility: Option<f64>,
    pub color: FlowColor,
    /// Creation time in epoch milliseconds; ordering key and poll watermark.
    pub creation_timestamp: i64,
}

impl TradeRecord {
    /// Case-insensitive substring match against symbol, details and
    /// call/put. `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle)
            || self.details.to_lowercase().contains(needle)
            || self
                .call_put
                .map(|cp| cp.as_str().to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}
