//! View snapshot and the notification sink that maintains it

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::controller::{format_time, Labels, NotificationSink};

/// What a client of the timer should currently be showing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub control_enabled: bool,
    pub control_label: String,
    pub display_text: String,
    /// Number of countdowns that ran to completion
    pub finished_count: u64,
    pub last_finished_at: Option<DateTime<Utc>>,
    pub completion_message: String,
}

impl ViewState {
    /// Initial view: control disabled, asking for a type, display at zero
    pub fn new(labels: &Labels) -> Self {
        Self {
            control_enabled: false,
            control_label: labels.choose_type.clone(),
            display_text: format_time(std::time::Duration::ZERO),
            finished_count: 0,
            last_finished_at: None,
            completion_message: labels.finished_message.clone(),
        }
    }
}

/// Notification sink backed by a [`ViewState`], publishing every change
#[derive(Debug)]
pub struct ViewSink {
    view: Mutex<ViewState>,
    view_update_tx: watch::Sender<ViewState>,
}

impl ViewSink {
    pub fn new(labels: &Labels) -> Self {
        let initial = ViewState::new(labels);
        let (view_update_tx, _) = watch::channel(initial.clone());
        Self {
            view: Mutex::new(initial),
            view_update_tx,
        }
    }

    /// Current view snapshot
    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    /// Follow view changes
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view_update_tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut ViewState),
    {
        let mut view = self.lock();
        updater(&mut view);
        let new_view = view.clone();
        drop(view);

        // send_replace keeps the value current even with no receivers
        self.view_update_tx.send_replace(new_view);
    }
}

impl NotificationSink for ViewSink {
    fn set_control_enabled(&self, active: bool) {
        self.update(|view| view.control_enabled = active);
    }

    fn set_control_label(&self, text: &str) {
        self.update(|view| view.control_label = text.to_string());
    }

    fn set_display_text(&self, text: &str) {
        self.update(|view| view.display_text = text.to_string());
    }

    fn notify_finished(&self) {
        let mut message = String::new();
        self.update(|view| {
            view.finished_count += 1;
            view.last_finished_at = Some(Utc::now());
            message = view.completion_message.clone();
        });
        if message.is_empty() {
            warn!("Countdown finished with no completion message configured");
        } else {
            info!("{}", message);
        }
    }
}
