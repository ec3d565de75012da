//! Egg Timer - A preset countdown timer with a pluggable tick source
//!
//! The core is a countdown engine driven by a periodic tick source and a
//! controller that maps preset options onto it and reports to a notification
//! sink. The binary serves the controller over HTTP.

pub mod config;
pub mod error;
pub mod timer;
pub mod controller;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use controller::{format_time, NotificationSink, TimerController, TimerOption};
pub use timer::{CallbackSet, CountdownEngine, ManualTickSource, RunState, TickSource, TokioTickSource};
pub use state::AppState;
pub use api::create_router;
