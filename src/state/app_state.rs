//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{ViewSink, ViewState};
use crate::{
    controller::{Labels, TimerController, TimerOption},
    error::TimerError,
    timer::{RunState, TickSource},
};

/// Main application state: the controller, its view, and server metadata
#[derive(Debug)]
pub struct AppState {
    pub controller: TimerController,
    pub view: Arc<ViewSink>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

/// Point-in-time view of the timer for status reporting
#[derive(Debug, Clone)]
pub struct TimerSnapshot {
    pub view: ViewState,
    pub selected_option: Option<TimerOption>,
    pub run_state: RunState,
    pub remaining_ms: Option<u64>,
}

impl AppState {
    /// Create a new AppState whose controller ticks on `source`
    pub fn new(port: u16, host: String, labels: Labels, source: Arc<dyn TickSource>) -> Self {
        let view = Arc::new(ViewSink::new(&labels));
        let controller = TimerController::with_labels(view.clone(), source, labels);

        Self {
            controller,
            view,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Select a preset and record the action
    pub fn select(&self, option: TimerOption) -> ViewState {
        self.controller.select_option(option);
        self.record_action(format!("select-{}", option));
        self.view.snapshot()
    }

    /// Start the selected countdown and record the action
    pub fn begin(&self) -> Result<ViewState, TimerError> {
        self.controller.begin()?;
        self.record_action("start".to_string());
        Ok(self.view.snapshot())
    }

    fn record_action(&self, action: String) {
        info!("Action: {}", action);
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Current timer status
    pub fn snapshot(&self) -> TimerSnapshot {
        let status = self.controller.status();
        TimerSnapshot {
            view: self.view.snapshot(),
            selected_option: status.selected_option,
            run_state: status.run_state,
            remaining_ms: status.remaining.map(|remaining| remaining.as_millis() as u64),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTickSource;
    use std::time::Duration;

    fn app_state() -> (AppState, ManualTickSource) {
        let source = ManualTickSource::new();
        let state = AppState::new(
            20554,
            "127.0.0.1".to_string(),
            Labels::english(),
            Arc::new(source.clone()),
        );
        (state, source)
    }

    #[test]
    fn select_records_action_and_returns_view() {
        let (state, _) = app_state();

        let view = state.select(TimerOption::Option1);

        assert_eq!(view.display_text, "01:00");
        assert!(view.control_enabled);
        assert_eq!(state.get_last_action().0.as_deref(), Some("select-option1"));
        assert!(state.get_last_action().1.is_some());
    }

    #[test]
    fn begin_before_select_leaves_no_action() {
        let (state, _) = app_state();

        assert!(state.begin().is_err());
        assert_eq!(state.get_last_action().0, None);
    }

    #[test]
    fn snapshot_tracks_countdown() {
        let (state, source) = app_state();
        state.select(TimerOption::Option1);
        state.begin().unwrap();

        source.advance(Duration::from_secs(2));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.run_state, RunState::Running);
        assert_eq!(snapshot.remaining_ms, Some(58_000));
        assert_eq!(snapshot.view.display_text, "00:58");
        assert_eq!(snapshot.selected_option, Some(TimerOption::Option1));
    }

    #[test]
    fn uptime_starts_in_seconds() {
        let (state, _) = app_state();
        assert!(state.get_uptime().ends_with('s'));
    }
}
