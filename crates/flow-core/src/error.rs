//! Error types for the sync core.
//!
//! The dataset store itself is infallible; failures only come from the
//! fetch path and are carried back to the controller as a
//! [`FetchOutcome`].

use thiserror::Error;

use crate::record::TradeRecord;

/// Why a fetch produced no records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never got an HTTP response (connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-200 application code.
    #[error("server returned code {code}: {message}")]
    Application { code: i64, message: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result of one fetch: the records on success, the failure otherwise.
pub type FetchOutcome = Result<Vec<TradeRecord>, FetchError>;
