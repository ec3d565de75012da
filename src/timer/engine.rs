//! Single countdown engine

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tracing::{debug, info};

use super::{
    source::{TickHandle, TickSource, TICK_INTERVAL},
    CallbackSet, RunState,
};

/// Owns one countdown's remaining time and run state.
///
/// Ticks come from a [`TickSource`]; each tick updates the remaining time and
/// runs the `on_tick` actions, and completion stops the engine before running
/// the `on_finished` actions. The engine can be started again at any time.
pub struct CountdownEngine {
    shared: Arc<EngineShared>,
}

struct EngineShared {
    state: Mutex<EngineState>,
    callbacks: Arc<CallbackSet>,
    source: Arc<dyn TickSource>,
}

struct EngineState {
    remaining: Duration,
    run_state: RunState,
    /// Identifies the live run; handlers from older runs are ignored
    generation: u64,
    handle: Option<Box<dyn TickHandle>>,
}

impl EngineState {
    fn halt(&mut self) {
        if self.run_state.is_running() {
            if let Some(handle) = self.handle.take() {
                handle.cancel();
            }
            self.run_state = RunState::Idle;
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        self.generation == generation && self.run_state.is_running()
    }
}

impl CountdownEngine {
    /// Create an idle engine holding `initial` as its remaining time
    pub fn new(initial: Duration, callbacks: Arc<CallbackSet>, source: Arc<dyn TickSource>) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                state: Mutex::new(EngineState {
                    remaining: initial,
                    run_state: RunState::Idle,
                    generation: 0,
                    handle: None,
                }),
                callbacks,
                source,
            }),
        }
    }

    /// Start counting down from the current remaining time.
    ///
    /// A run already in progress is cancelled first, so there is never more
    /// than one tick stream feeding this engine.
    pub fn begin(&self) {
        let mut state = self.shared.lock();
        if state.run_state.is_running() {
            debug!("Countdown already running, restarting from {:?}", state.remaining);
            state.halt();
        }

        state.generation += 1;
        let generation = state.generation;
        let span = state.remaining;

        let tick_target = Arc::downgrade(&self.shared);
        let finish_target = Weak::clone(&tick_target);
        let handle = self.shared.source.schedule(
            span,
            TICK_INTERVAL,
            Box::new(move |remaining: Duration| {
                if let Some(shared) = tick_target.upgrade() {
                    shared.handle_tick(generation, remaining);
                }
            }),
            Box::new(move || {
                if let Some(shared) = finish_target.upgrade() {
                    shared.handle_finish(generation);
                }
            }),
        );

        state.handle = Some(handle);
        state.run_state = RunState::Running;
        info!("Countdown started with {:?} remaining", span);
    }

    /// Cancel the live run, keeping the remaining time. No-op when idle.
    pub fn stop(&self) {
        let mut state = self.shared.lock();
        if state.run_state.is_running() {
            state.halt();
            info!("Countdown stopped with {:?} remaining", state.remaining);
        }
    }

    /// Remaining time on the countdown
    pub fn current_time(&self) -> Duration {
        self.shared.lock().remaining
    }

    pub fn run_state(&self) -> RunState {
        self.shared.lock().run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state().is_running()
    }
}

impl EngineShared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_tick(&self, generation: u64, remaining: Duration) {
        {
            let mut state = self.lock();
            if !state.accepts(generation) {
                debug!("Discarding tick from superseded run {}", generation);
                return;
            }
            state.remaining = remaining;
        }

        debug!("Countdown tick, {:?} remaining", remaining);
        self.callbacks.run_tick();
    }

    fn handle_finish(&self, generation: u64) {
        {
            let mut state = self.lock();
            if !state.accepts(generation) {
                debug!("Discarding completion from superseded run {}", generation);
                return;
            }
            state.halt();
            state.remaining = Duration::ZERO;
        }

        info!("Countdown finished");
        self.callbacks.run_finished();
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.shared.lock().halt();
    }
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("CountdownEngine")
            .field("remaining", &state.remaining)
            .field("run_state", &state.run_state)
            .field("callbacks", &self.shared.callbacks)
            .finish()
    }
}
