//! Selection and orchestration on top of the countdown engine

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tracing::{debug, info};

use super::{format_time, Labels, NotificationSink, TimerOption};
use crate::{
    error::TimerError,
    timer::{CallbackSet, CountdownEngine, RunState, TickSource},
};

/// Holds the selected option and its engine, and keeps a sink up to date
pub struct TimerController {
    shared: Arc<ControllerShared>,
}

struct ControllerShared {
    sink: Arc<dyn NotificationSink>,
    source: Arc<dyn TickSource>,
    labels: Labels,
    this: Weak<ControllerShared>,
    slot: Mutex<EngineSlot>,
}

#[derive(Default)]
struct EngineSlot {
    /// Bumped on every selection; actions of older engines compare against it
    epoch: u64,
    option: Option<TimerOption>,
    engine: Option<CountdownEngine>,
}

/// Selection and countdown state read under a single lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerStatus {
    pub selected_option: Option<TimerOption>,
    pub run_state: RunState,
    pub remaining: Option<Duration>,
}

impl TimerController {
    /// Create a controller with English labels
    pub fn new(sink: Arc<dyn NotificationSink>, source: Arc<dyn TickSource>) -> Self {
        Self::with_labels(sink, source, Labels::default())
    }

    pub fn with_labels(sink: Arc<dyn NotificationSink>, source: Arc<dyn TickSource>, labels: Labels) -> Self {
        let shared = Arc::new_cyclic(|weak: &Weak<ControllerShared>| ControllerShared {
            sink,
            source,
            labels,
            this: weak.clone(),
            slot: Mutex::new(EngineSlot::default()),
        });
        Self { shared }
    }

    /// Install a fresh engine for `option`, replacing any previous one.
    ///
    /// A running engine is stopped before it is dropped, and any of its
    /// actions still in flight find the selection moved on and do nothing.
    pub fn select_option(&self, option: TimerOption) {
        let duration = option.duration();
        let mut slot = self.shared.slot();
        if let Some(previous) = slot.engine.take() {
            previous.stop();
        }
        slot.epoch += 1;
        slot.engine = Some(CountdownEngine::new(
            duration,
            Arc::new(standing_callbacks(&self.shared.this, slot.epoch)),
            Arc::clone(&self.shared.source),
        ));
        slot.option = Some(option);

        info!("Selected {} ({:?})", option, duration);
        // Slot stays locked so no stale action lands between these calls
        let sink = &self.shared.sink;
        sink.set_display_text(&format_time(duration));
        sink.set_control_enabled(true);
        sink.set_control_label(&self.shared.labels.start_timer);
    }

    /// Start the selected countdown.
    ///
    /// Fails with [`TimerError::InvalidOperation`] when nothing has been
    /// selected yet.
    pub fn begin(&self) -> Result<(), TimerError> {
        let slot = self.shared.slot();
        let engine = slot
            .engine
            .as_ref()
            .ok_or(TimerError::InvalidOperation("begin called before a timer option was selected"))?;
        engine.begin();

        let sink = &self.shared.sink;
        sink.set_control_enabled(false);
        sink.set_control_label(&self.shared.labels.timer_running);
        Ok(())
    }

    pub fn selected_option(&self) -> Option<TimerOption> {
        self.shared.slot().option
    }

    /// Remaining time on the current engine, if one is installed
    pub fn current_time(&self) -> Option<Duration> {
        self.shared.slot().engine.as_ref().map(CountdownEngine::current_time)
    }

    pub fn run_state(&self) -> RunState {
        self.shared
            .slot()
            .engine
            .as_ref()
            .map_or(RunState::Idle, CountdownEngine::run_state)
    }

    /// Option, run state and remaining time as of one moment
    pub fn status(&self) -> TimerStatus {
        let slot = self.shared.slot();
        let engine = slot.engine.as_ref();
        TimerStatus {
            selected_option: slot.option,
            run_state: engine.map_or(RunState::Idle, CountdownEngine::run_state),
            remaining: engine.map(CountdownEngine::current_time),
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.shared.labels
    }
}

impl ControllerShared {
    fn slot(&self) -> MutexGuard<'_, EngineSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the slot if `epoch` is still the current selection.
    ///
    /// The guard is held across the sink calls that follow.
    fn slot_for(&self, epoch: u64) -> Option<MutexGuard<'_, EngineSlot>> {
        let slot = self.slot();
        if slot.epoch == epoch {
            Some(slot)
        } else {
            debug!("Dropping action from superseded selection {}", epoch);
            None
        }
    }

    fn push_remaining(&self, epoch: u64) {
        let Some(slot) = self.slot_for(epoch) else { return };
        if let Some(engine) = slot.engine.as_ref() {
            self.sink.set_display_text(&format_time(engine.current_time()));
        }
    }

    fn signal_finished(&self, epoch: u64) {
        if let Some(_slot) = self.slot_for(epoch) {
            self.sink.notify_finished();
        }
    }

    fn reset_control(&self, epoch: u64) {
        if let Some(_slot) = self.slot_for(epoch) {
            self.sink.set_control_enabled(false);
            self.sink.set_control_label(&self.labels.choose_type);
        }
    }
}

/// Tick: refresh the display. Finish: notify, then reset the control.
///
/// Every action is bound to the selection `epoch` of the engine it serves.
fn standing_callbacks(controller: &Weak<ControllerShared>, epoch: u64) -> CallbackSet {
    let (on_tick, on_done, on_reset) = (controller.clone(), controller.clone(), controller.clone());
    CallbackSet::new()
        .on_tick(move || {
            if let Some(shared) = on_tick.upgrade() {
                shared.push_remaining(epoch);
            }
        })
        .on_finished(move || {
            if let Some(shared) = on_done.upgrade() {
                shared.signal_finished(epoch);
            }
        })
        .on_finished(move || {
            if let Some(shared) = on_reset.upgrade() {
                shared.reset_control(epoch);
            }
        })
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot();
        f.debug_struct("TimerController")
            .field("epoch", &slot.epoch)
            .field("option", &slot.option)
            .field("engine", &slot.engine)
            .field("labels", &self.shared.labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTickSource;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl NotificationSink for Recorder {
        fn set_control_enabled(&self, active: bool) {
            self.calls.lock().unwrap().push(format!("enabled={}", active));
        }
        fn set_control_label(&self, text: &str) {
            self.calls.lock().unwrap().push(format!("label={}", text));
        }
        fn set_display_text(&self, text: &str) {
            self.calls.lock().unwrap().push(format!("display={}", text));
        }
        fn notify_finished(&self) {
            self.calls.lock().unwrap().push("finished".to_string());
        }
    }

    fn controller() -> (TimerController, Arc<Recorder>, ManualTickSource) {
        let sink = Arc::new(Recorder::default());
        let source = ManualTickSource::new();
        let controller = TimerController::new(sink.clone(), Arc::new(source.clone()));
        (controller, sink, source)
    }

    #[test]
    fn registers_one_tick_and_two_finish_actions() {
        let callbacks = standing_callbacks(&Weak::new(), 1);
        assert_eq!(callbacks.tick_actions().len(), 1);
        assert_eq!(callbacks.finished_actions().len(), 2);
    }

    #[test]
    fn construction_pushes_nothing() {
        let (controller, sink, _) = controller();
        assert!(sink.take().is_empty());
        assert_eq!(controller.selected_option(), None);
        assert_eq!(controller.current_time(), None);
    }

    #[test]
    fn select_pushes_initial_time_and_enables_start() {
        let (controller, sink, _) = controller();

        controller.select_option(TimerOption::Option2);

        assert_eq!(sink.take(), vec!["display=02:00", "enabled=true", "label=start timer"]);
        assert_eq!(controller.current_time(), Some(Duration::from_secs(120)));
        assert_eq!(controller.run_state(), RunState::Idle);
    }

    #[test]
    fn begin_without_selection_is_invalid() {
        let (controller, sink, source) = controller();

        let err = controller.begin().unwrap_err();

        assert!(matches!(err, TimerError::InvalidOperation(_)));
        assert!(sink.take().is_empty());
        assert_eq!(source.run_count(), 0);
    }

    #[test]
    fn reselect_stops_running_engine() {
        let (controller, _, source) = controller();
        controller.select_option(TimerOption::Option1);
        controller.begin().unwrap();

        controller.select_option(TimerOption::Option3);

        assert!(source.is_cancelled(0));
        assert_eq!(source.live_runs(), 0);
        assert_eq!(controller.run_state(), RunState::Idle);
        assert_eq!(controller.current_time(), Some(Duration::from_secs(180)));
    }

    #[test]
    fn danish_labels_flow_to_sink() {
        let sink = Arc::new(Recorder::default());
        let controller = TimerController::with_labels(
            sink.clone(),
            Arc::new(ManualTickSource::new()),
            Labels::danish(),
        );

        controller.select_option(TimerOption::Option1);
        controller.begin().unwrap();

        assert_eq!(
            sink.take(),
            vec!["display=01:00", "enabled=true", "label=Start timer", "enabled=false", "label=Timer kører"]
        );
    }

    #[test]
    fn actions_of_a_replaced_selection_do_nothing() {
        let (controller, sink, _) = controller();
        controller.select_option(TimerOption::Option1);
        let first_selection = standing_callbacks(&Arc::downgrade(&controller.shared), 1);
        controller.select_option(TimerOption::Option2);
        sink.take();

        first_selection.run_tick();
        first_selection.run_finished();

        assert!(sink.take().is_empty());
    }

    #[test]
    fn status_reads_one_moment() {
        let (controller, _, source) = controller();
        assert_eq!(
            controller.status(),
            TimerStatus { selected_option: None, run_state: RunState::Idle, remaining: None }
        );

        controller.select_option(TimerOption::Option1);
        controller.begin().unwrap();
        source.advance(Duration::from_secs(4));

        assert_eq!(
            controller.status(),
            TimerStatus {
                selected_option: Some(TimerOption::Option1),
                run_state: RunState::Running,
                remaining: Some(Duration::from_secs(56)),
            }
        );
    }
}
