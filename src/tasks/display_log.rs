//! Display logging background task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::ViewState;

/// Background task that follows view changes and logs what a user would see.
///
/// Ends once the view sink is dropped.
pub async fn display_log_task(mut view_rx: watch::Receiver<ViewState>) {
    info!("Starting display log task");

    let mut last = view_rx.borrow_and_update().clone();

    while view_rx.changed().await.is_ok() {
        let view = view_rx.borrow_and_update().clone();

        if view.display_text != last.display_text {
            debug!("Display: {}", view.display_text);
        }
        if view.control_label != last.control_label || view.control_enabled != last.control_enabled {
            debug!(
                "Control: {:?} ({})",
                view.control_label,
                if view.control_enabled { "enabled" } else { "disabled" }
            );
        }
        if view.finished_count > last.finished_count {
            info!("Countdown complete ({} so far)", view.finished_count);
        }

        last = view;
    }

    debug!("View channel closed, display log task exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Labels;

    #[tokio::test]
    async fn exits_when_sender_is_dropped() {
        let (tx, rx) = watch::channel(ViewState::new(&Labels::english()));
        let task = tokio::spawn(display_log_task(rx));

        let mut view = ViewState::new(&Labels::english());
        view.display_text = "00:59".to_string();
        tx.send_replace(view);
        drop(tx);

        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("task should finish once the channel closes")
            .unwrap();
    }
}
