//! Error types for the timer core

use thiserror::Error;

/// Errors raised by the countdown engine, the controller and option parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// An operation was called in an order the controller cannot honour
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("unknown timer option: {0:?}")]
    UnknownOption(String),
    #[error("no tokio runtime is available to drive the tick source")]
    NoRuntime,
}
