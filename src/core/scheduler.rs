//! # Periodic Scheduler
//!
//! Drives the location poll. Change notifications can be missed by whatever
//! delivers them, so the UI also re-reads the location on a fixed interval.
//! The callback runs on a tokio worker; it should only post a message to the
//! UI thread, never touch router state directly.

use log::debug;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

/// Default location poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    type Handle;

    /// Call `callback` every `interval` until cancelled.
    fn schedule(&mut self, callback: TickCallback, interval: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Handle to a running periodic task.
#[derive(Debug)]
pub struct TickHandle {
    abort: AbortHandle,
}

impl TickHandle {
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// `Scheduler` backed by `tokio::time::interval` tasks.
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TickHandle;

    fn schedule(&mut self, mut callback: TickCallback, interval: Duration) -> TickHandle {
        // tokio::time::interval panics on a zero period
        let interval = interval.max(Duration::from_millis(1));
        debug!("Scheduling periodic callback every {}ms", interval.as_millis());

        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        });

        TickHandle {
            abort: task.abort_handle(),
        }
    }

    fn cancel(&mut self, handle: TickHandle) {
        debug!("Cancelling periodic callback");
        handle.abort.abort();
    }
}
