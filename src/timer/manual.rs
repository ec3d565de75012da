//! Manually driven tick source
//!
//! Nothing happens until the caller advances time, and every handler runs
//! synchronously on the caller's thread. Used by the test suites and by any
//! embedder that owns its own clock.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use super::source::{FinishFn, TickFn, TickHandle, TickSource};

struct ManualRun {
    span: Duration,
    interval: Duration,
    elapsed: Duration,
    cancelled: Arc<AtomicBool>,
    finished: bool,
    on_tick: Option<TickFn>,
    on_finish: Option<FinishFn>,
}

impl ManualRun {
    fn is_live(&self) -> bool {
        !self.finished && !self.cancelled.load(Ordering::SeqCst)
    }

    /// Time until the next tick boundary or the end of the span
    fn until_next_event(&self) -> Duration {
        let interval = self.interval.as_nanos().max(1);
        let boundaries = self.elapsed.as_nanos() / interval + 1;
        let next_tick = Duration::from_nanos((boundaries * interval) as u64);
        next_tick.min(self.span).saturating_sub(self.elapsed)
    }
}

enum Step {
    Tick(usize, TickFn, Duration),
    Finish(FinishFn),
}

/// A tick source whose clock only moves when told to
#[derive(Clone, Default)]
pub struct ManualTickSource {
    runs: Arc<Mutex<Vec<ManualRun>>>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn runs(&self) -> MutexGuard<'_, Vec<ManualRun>> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of runs scheduled so far, cancelled or not
    pub fn run_count(&self) -> usize {
        self.runs().len()
    }

    /// Number of runs that are neither cancelled nor finished
    pub fn live_runs(&self) -> usize {
        self.runs().iter().filter(|run| run.is_live()).count()
    }

    pub fn is_cancelled(&self, run: usize) -> bool {
        self.runs()
            .get(run)
            .is_some_and(|run| run.cancelled.load(Ordering::SeqCst))
    }

    /// Span the given run was scheduled with
    pub fn span_of(&self, run: usize) -> Option<Duration> {
        self.runs().get(run).map(|run| run.span)
    }

    /// Move the clock of the most recent live run forward by `by`.
    ///
    /// Fires every tick whose boundary is crossed and the completion handler
    /// when the span is reached. Returns `false` when there was no live run.
    pub fn advance(&self, by: Duration) -> bool {
        let mut left = by;
        let mut advanced = false;

        loop {
            let step = {
                let mut runs = self.runs();
                let Some(index) = runs.iter().rposition(ManualRun::is_live) else {
                    return advanced;
                };
                advanced = true;
                let run = &mut runs[index];

                let next = run.until_next_event();
                if next > left {
                    run.elapsed += left;
                    return true;
                }
                run.elapsed += next;
                left -= next;

                if run.elapsed >= run.span {
                    run.finished = true;
                    match run.on_finish.take() {
                        Some(on_finish) => Step::Finish(on_finish),
                        None => continue,
                    }
                } else {
                    let remaining = run.span - run.elapsed;
                    match run.on_tick.take() {
                        Some(on_tick) => Step::Tick(index, on_tick, remaining),
                        None => continue,
                    }
                }
            };

            // Handlers may schedule new runs, so the lock is released here
            match step {
                Step::Tick(index, mut on_tick, remaining) => {
                    on_tick(remaining);
                    self.restore_tick(index, on_tick);
                }
                Step::Finish(on_finish) => on_finish(),
            }
        }
    }

    /// Invoke the tick handler of `run` directly, even if it was cancelled.
    ///
    /// Simulates a callback already in flight when its run was cancelled.
    pub fn fire_tick(&self, run: usize, remaining: Duration) -> bool {
        let handler = self.runs().get_mut(run).and_then(|run| run.on_tick.take());
        match handler {
            Some(mut on_tick) => {
                on_tick(remaining);
                self.restore_tick(run, on_tick);
                true
            }
            None => false,
        }
    }

    fn restore_tick(&self, index: usize, on_tick: TickFn) {
        if let Some(run) = self.runs().get_mut(index) {
            run.on_tick = Some(on_tick);
        }
    }
}

impl TickSource for ManualTickSource {
    fn schedule(
        &self,
        span: Duration,
        interval: Duration,
        on_tick: TickFn,
        on_finish: FinishFn,
    ) -> Box<dyn TickHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.runs().push(ManualRun {
            span,
            interval,
            elapsed: Duration::ZERO,
            cancelled: Arc::clone(&cancelled),
            finished: false,
            on_tick: Some(on_tick),
            on_finish: Some(on_finish),
        });
        Box::new(ManualTickHandle { cancelled })
    }
}

struct ManualTickHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle for ManualTickHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
