// crates/flow-terminal/src/network.rs

use std::time::Duration;

use anyhow::Result;
use flow_core::{FetchError, FetchOutcome, FetchRequest};
use flow_protocol::{decode_response, encode_request, TRADES_PATH};
use reqwest::header::CONTENT_TYPE;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Outcome of one request, tagged with the request's `seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub seq: u64,
    pub outcome: FetchOutcome,
}

pub struct TradeFeedConnection {
    client: reqwest::Client,
    endpoint: String,
    tx: UnboundedSender<FetchResponse>,
}

impl TradeFeedConnection {
    pub fn new(base_url: &str, timeout: Duration, tx: UnboundedSender<FetchResponse>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
            tx,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one request and decode the answer.
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        let body = encode_request(request).map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(
            "POST {} seq={} kind={:?} offset={} limit={}",
            self.endpoint, request.seq, request.kind, request.offset, request.limit
        );

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        match decode_response(&bytes) {
            Err(FetchError::Decode(_)) if !status.is_success() => {
                Err(FetchError::Transport(format!("HTTP {}", status)))
            }
            outcome => outcome,
        }
    }

    /// Serve requests one at a time, in the order they were queued.
    pub async fn run(self, mut rx: UnboundedReceiver<FetchRequest>) {
        info!("Trade feed worker started ({})", self.endpoint);

        while let Some(request) = rx.recv().await {
            let seq = request.seq;
            let outcome = self.fetch(&request).await;

            match &outcome {
                Ok(records) => debug!("seq={} returned {} records", seq, records.len()),
                Err(FetchError::Transport(e)) => error!("seq={} transport failure: {}", seq, e),
                Err(e) => warn!("seq={} failed: {}", seq, e),
            }

            if let Err(e) = self.tx.send(FetchResponse { seq, outcome }) {
                error!("Failed to send response to app: {}", e);
                break;
            }
        }

        info!("Trade feed worker stopped");
    }
}

/// `base_url` with the query path appended.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), TRADES_PATH)
}
