//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_log;

// Re-export main functions
pub use display_log::display_log_task;
