//! Presentation-side contract and the strings pushed through it

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Whatever presents the timer to a user.
///
/// The controller calls these while holding its own lock, so implementations
/// must not call back into the controller.
pub trait NotificationSink: Send + Sync {
    /// Enable or disable the primary control
    fn set_control_enabled(&self, active: bool);
    fn set_control_label(&self, text: &str);
    /// Show the formatted remaining time
    fn set_display_text(&self, text: &str);
    /// The countdown completed
    fn notify_finished(&self);
}

/// Language of the control labels and completion message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Da,
}

/// Control labels for each controller state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub choose_type: String,
    pub start_timer: String,
    pub timer_running: String,
    pub finished_message: String,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::Da => Self::danish(),
        }
    }

    pub fn english() -> Self {
        Self {
            choose_type: "choose type".to_string(),
            start_timer: "start timer".to_string(),
            timer_running: "timer running".to_string(),
            finished_message: "Egg is done!".to_string(),
        }
    }

    pub fn danish() -> Self {
        Self {
            choose_type: "Vælg type".to_string(),
            start_timer: "Start timer".to_string(),
            timer_running: "Timer kører".to_string(),
            finished_message: "Æg er færdigt!".to_string(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}
