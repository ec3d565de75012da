//! Periodic tick sources

use std::time::Duration;

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, sleep_until, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::error::TimerError;

/// Interval between ticks for every countdown run
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Tick handler, called with the time remaining in the run
pub type TickFn = Box<dyn FnMut(Duration) + Send>;
/// Completion handler, called once when the run is exhausted
pub type FinishFn = Box<dyn FnOnce() + Send>;

/// A scheduling primitive that drives one countdown run at a time per call.
///
/// `on_tick` fires at every interval boundary strictly before `span` with the
/// time remaining, then `on_finish` fires exactly once when `span` has
/// elapsed. Implementations must not call either handler from inside
/// `schedule` itself.
pub trait TickSource: Send + Sync {
    fn schedule(
        &self,
        span: Duration,
        interval: Duration,
        on_tick: TickFn,
        on_finish: FinishFn,
    ) -> Box<dyn TickHandle>;
}

/// Cancellation handle for a scheduled run
pub trait TickHandle: Send {
    /// Suppress every future handler call for this run
    fn cancel(&self);
}

/// Tick source backed by tokio timers, one spawned task per run
#[derive(Debug, Clone)]
pub struct TokioTickSource {
    runtime: Handle,
}

impl TokioTickSource {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is currently running inside
    pub fn current() -> Result<Self, TimerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| TimerError::NoRuntime)
    }
}

impl TickSource for TokioTickSource {
    fn schedule(
        &self,
        span: Duration,
        interval: Duration,
        mut on_tick: TickFn,
        on_finish: FinishFn,
    ) -> Box<dyn TickHandle> {
        let task = self.runtime.spawn(async move {
            let start = Instant::now();
            let deadline = start + span;

            let mut ticks = interval_at(start + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let expiry = sleep_until(deadline);
            tokio::pin!(expiry);

            loop {
                tokio::select! {
                    biased;

                    // Deadline wins over a tick landing on the same instant
                    _ = &mut expiry => {
                        debug!("Countdown run of {:?} exhausted", span);
                        on_finish();
                        break;
                    }

                    _ = ticks.tick() => {
                        let remaining = deadline.saturating_duration_since(Instant::now());
                        if !remaining.is_zero() {
                            on_tick(remaining);
                        }
                    }
                }
            }
        });

        Box::new(TokioTickHandle { task })
    }
}

struct TokioTickHandle {
    task: JoinHandle<()>,
}

impl TickHandle for TokioTickHandle {
    fn cancel(&self) {
        self.task.abort();
    }
}
