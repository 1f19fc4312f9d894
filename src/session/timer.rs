//! Per-question countdown running as a tokio task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// One second passed; `remaining` seconds are left.
    Tick { remaining: u32 },
    Expired,
}

/// Event sent by a countdown. `epoch` identifies the arming that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub epoch: u64,
    pub kind: TimerKind,
}

/// Epochs are drawn from one counter so events never match a countdown of
/// another session sharing the same channel.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Cancellable countdown. At most one task is alive at a time.
pub struct Countdown {
    tx: UnboundedSender<TimerEvent>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new(tx: UnboundedSender<TimerEvent>) -> Self {
        Self {
            tx,
            epoch: next_epoch(),
            task: None,
        }
    }

    /// Abort any running countdown and start a new one of `seconds`.
    ///
    /// Returns the epoch carried by the new countdown's events.
    pub fn arm(&mut self, seconds: u32) -> u64 {
        self.cancel();

        let epoch = self.epoch;
        let tx = self.tx.clone();

        self.task = Some(tokio::spawn(async move {
            let start = Instant::now();

            for elapsed in 1..=seconds {
                sleep_until(start + Duration::from_secs(u64::from(elapsed))).await;

                let remaining = seconds - elapsed;
                let kind = if remaining == 0 {
                    TimerKind::Expired
                } else {
                    TimerKind::Tick { remaining }
                };

                if tx.send(TimerEvent { epoch, kind }).is_err() {
                    return;
                }
            }

            if seconds == 0 {
                let _ = tx.send(TimerEvent {
                    epoch,
                    kind: TimerKind::Expired,
                });
            }
        }));

        epoch
    }

    /// Stop the running countdown. Events already queued become stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.epoch = next_epoch();
    }

    /// Epoch of the most recent arming or cancellation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
