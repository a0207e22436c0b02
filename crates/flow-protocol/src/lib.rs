//! flow-protocol
//!
//! Wire-level encoding/decoding for the option-trades endpoint.
//!
//! This crate turns a logical [`flow_core::FetchRequest`] into the JSON
//! body the server expects, and the server's JSON reply back into a
//! [`flow_core::FetchOutcome`].
//!
//! - [`wire_types`] : request body, response envelope, raw record rows
//! - [`json_codec`] : encode / decode entry points

pub mod wire_types;
pub mod json_codec;

pub use json_codec::{decode_response, encode_request, CodecError};
pub use wire_types::{TRADES_PATH, SUCCESS_CODE};
