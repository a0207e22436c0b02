// crates/flow-protocol/src/json_codec.rs

//! JSON codec for the option-trades endpoint.
//!
//! Request (`FetchRequest` → body):
//!
//! ```json
//! {"offset": 0, "limit": 100, "optionType": ["PUT"], "sinceCreation": "1741305600000"}
//! ```
//!
//! Response (body → `FetchOutcome`):
//!
//! - `{"code": 200, "data": [...]}`          → `Ok(records)`
//! - `{"code": 500, "message": "..."}`        → `Err(FetchError::Application)`
//! - anything that is not an envelope         → `Err(FetchError::Decode)`
//!
//! A success envelope with `data: null` decodes as an empty batch.

use thiserror::Error;

use flow_core::{FetchError, FetchOutcome, FetchRequest};

use crate::wire_types::{QueryRequest, ResponseEnvelope, SUCCESS_CODE};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode `request` as the JSON body for `POST /api/option-trades`.
pub fn encode_request(request: &FetchRequest) -> Result<Vec<u8>, CodecError> {
    let body = QueryRequest {
        offset: request.offset,
        limit: request.limit,
        filter: &request.filter,
    };
    Ok(serde_json::to_vec(&body)?)
}

/// Decode a response body into the records it carries.
pub fn decode_response(body: &[u8]) -> FetchOutcome {
    let envelope: ResponseEnvelope =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if envelope.code != SUCCESS_CODE {
        return Err(FetchError::Application {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|row| row.into_record())
        .collect())
}
