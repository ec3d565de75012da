//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    controller::TimerOption,
    state::ViewState,
    timer::RunState,
};

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: ViewState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, view: ViewState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            view,
        }
    }

    /// Response for a successful selection
    pub fn selected(message: String, view: ViewState) -> Self {
        Self::new("selected".to_string(), message, view)
    }

    /// Response for a started countdown
    pub fn running(message: String, view: ViewState) -> Self {
        Self::new("running".to_string(), message, view)
    }
}

/// Status response with timer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub view: ViewState,
    pub selected_option: Option<TimerOption>,
    pub run_state: RunState,
    pub remaining_ms: Option<u64>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
