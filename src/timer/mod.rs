//! Countdown engine module
//!
//! This module contains the single-countdown engine, the callback actions it
//! runs, and the periodic tick sources that drive it.

pub mod engine;
pub mod manual;
pub mod source;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

// Re-export main types
pub use engine::CountdownEngine;
pub use manual::ManualTickSource;
pub use source::{TickHandle, TickSource, TokioTickSource, TICK_INTERVAL};

/// A zero-argument side effect run on tick or on completion
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// Whether an engine currently has a live periodic run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Ordered tick and completion actions, built once and shared with every engine
#[derive(Default, Clone)]
pub struct CallbackSet {
    on_tick: Vec<Action>,
    on_finished: Vec<Action>,
}

impl CallbackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action to run after every tick
    pub fn on_tick<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_tick.push(Arc::new(action));
        self
    }

    /// Append an action to run once the countdown completes
    pub fn on_finished<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_finished.push(Arc::new(action));
        self
    }

    pub fn tick_actions(&self) -> &[Action] {
        &self.on_tick
    }

    pub fn finished_actions(&self) -> &[Action] {
        &self.on_finished
    }

    pub(crate) fn run_tick(&self) {
        for action in &self.on_tick {
            action();
        }
    }

    pub(crate) fn run_finished(&self) {
        for action in &self.on_finished {
            action();
        }
    }
}

impl fmt::Debug for CallbackSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet")
            .field("on_tick", &self.on_tick.len())
            .field("on_finished", &self.on_finished.len())
            .finish()
    }
}
