//! State management module
//!
//! This module contains the application state shared with the HTTP handlers
//! and the view the controller presents through.

pub mod app_state;
pub mod view_state;

// Re-export main types
pub use app_state::{AppState, TimerSnapshot};
pub use view_state::{ViewSink, ViewState};
