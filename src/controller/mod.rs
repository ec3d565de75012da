//! Timer controller module
//!
//! This module contains the controller that turns option selection into a
//! running countdown, plus the formatting and sink contract it presents
//! through.

pub mod format;
pub mod options;
pub mod sink;
pub mod timer_controller;

// Re-export main types
pub use format::format_time;
pub use options::TimerOption;
pub use sink::{Labels, Locale, NotificationSink};
pub use timer_controller::{TimerController, TimerStatus};
