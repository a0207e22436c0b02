// crates/flow-terminal/src/poller.rs

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// One poll period elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTick;

/// Emit a [`PollTick`] every `period`, starting one period from now.
///
/// Late ticks are skipped rather than bunched up. The task ends when the
/// receiver is dropped.
pub fn spawn(period: Duration, tx: UnboundedSender<PollTick>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of `interval` completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if tx.send(PollTick).is_err() {
                debug!("Poll receiver gone, stopping poller");
                break;
            }
        }
    })
}
