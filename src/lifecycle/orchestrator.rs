// SPDX-License-Identifier: MPL-2.0
//! Top-level coordinator of instance lifecycles.
//!
//! The orchestrator owns the mount point, the registry, the countdown timers
//! and the counters. Output bindings it installs never touch that state
//! directly: they post a command which is applied at once when the
//! orchestrator is idle, or queued until the running operation completes.
//! This keeps every operation atomic even when a mount point emits events
//! synchronously from inside `create` or `destroy`.
//!
//! Host producers run before the state is locked. Observers called while an
//! operation holds it (from a mount point, say) see the state as it was when
//! that operation started.

use std::cell::{OnceCell, RefCell, RefMut};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::countdown::{CountdownState, CountdownTimer};
use super::registry::ComponentRegistry;
use super::statistics::Statistics;
use crate::behavior::{self, BehaviorFlags, BehaviorModule, BehaviorRequest};
use crate::binding::{BindingDescriptor, BindingSet, InputBinding, Value};
use crate::config::Config;
use crate::diagnostics::{ActivityEntry, ActivityLog, LifecycleEvent, RemovalReason};
use crate::domain::component::{ComponentHandle, ComponentKind, InstanceRef};
use crate::domain::ui::{DismissDuration, StaggerDelay, TickInterval};
use crate::error::{Error, Result};
use crate::mount::MountPoint;
use crate::preview::CreationPreview;
use crate::shape::{
    events, fields, NotificationSpec, NotificationVariant, ShapeInputs, WidgetSpec,
};

/// Handle of an instance whose creation may still be in flight.
type Slot = Rc<OnceCell<ComponentHandle>>;

enum Command {
    Teardown(Slot, RemovalReason),
    Action(Slot, String),
    ClearAll,
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    tick_interval: TickInterval,
    notification_duration: DismissDuration,
}

struct State<M> {
    mount: M,
    registry: ComponentRegistry,
    timers: HashMap<InstanceRef, CountdownTimer>,
    actions_performed: u64,
    settings: Settings,
    activity: ActivityLog,
    last_preview: Option<CreationPreview>,
}

/// What observers report while an operation holds the state.
#[derive(Default)]
struct Snapshot {
    statistics: Statistics,
    widgets: Vec<ComponentHandle>,
    notifications: Vec<ComponentHandle>,
    countdowns: HashMap<InstanceRef, CountdownState>,
    activity: Vec<ActivityEntry>,
    last_preview: Option<CreationPreview>,
}

impl Snapshot {
    fn active(&self, kind: ComponentKind) -> &[ComponentHandle] {
        match kind {
            ComponentKind::Widget => &self.widgets,
            ComponentKind::Notification => &self.notifications,
        }
    }
}

/// Locks the state for one operation, recording what observers see meanwhile.
fn enter<'a, M: MountPoint + 'static>(
    state: &'a RefCell<State<M>>,
    snapshot: &RefCell<Snapshot>,
) -> Option<RefMut<'a, State<M>>> {
    let guard = state.try_borrow_mut().ok()?;
    *snapshot.borrow_mut() = guard.snapshot();
    Some(guard)
}

/// Route from instance callbacks back into the orchestrator.
///
/// Holds the state weakly: the callbacks live inside the mount point, which
/// the state owns.
struct Dispatcher<M> {
    state: Weak<RefCell<State<M>>>,
    queue: Rc<RefCell<VecDeque<Command>>>,
    snapshot: Rc<RefCell<Snapshot>>,
}

impl<M> Clone for Dispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
            queue: Rc::clone(&self.queue),
            snapshot: Rc::clone(&self.snapshot),
        }
    }
}

impl<M: MountPoint + 'static> Dispatcher<M> {
    fn dispatch(&self, command: Command) {
        self.queue.borrow_mut().push_back(command);
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // A running operation drains the queue itself once it completes.
        let idle = state.try_borrow_mut().is_ok();
        if idle {
            self.drain();
        }
    }

    fn drain(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            match enter(&state, &self.snapshot) {
                Some(mut guard) => guard.apply(command, self),
                None => {
                    self.queue.borrow_mut().push_front(command);
                    break;
                }
            }
        }
    }
}

/// A creation request resolved against host state, ready to mount.
struct Prepared {
    kind: ComponentKind,
    slot: Slot,
    bindings: BindingSet,
    countdown: Option<DismissDuration>,
    modules: Vec<BehaviorModule>,
    preview: CreationPreview,
}

impl Prepared {
    /// Validates the inputs, installs the lifecycle outputs and evaluates
    /// the producers the countdown and the preview need.
    fn new<M: MountPoint + 'static>(
        kind: ComponentKind,
        inputs: ShapeInputs,
        behaviors: &[BehaviorRequest],
        settings: Settings,
        dispatcher: &Dispatcher<M>,
    ) -> Result<Self> {
        let slot: Slot = Rc::new(OnceCell::new());

        let mut bindings = BindingSet::new();
        for descriptor in inputs.into_descriptors()? {
            bindings.push(descriptor)?;
        }
        bindings.push(closed_binding(&slot, dispatcher)?)?;
        if kind == ComponentKind::Widget {
            bindings.push(action_binding(&slot, dispatcher)?)?;
        }

        let countdown = match kind {
            ComponentKind::Notification => countdown_for(&bindings, settings.notification_duration),
            ComponentKind::Widget => None,
        };
        let modules = behavior::attach(behaviors);
        let preview = CreationPreview::capture(kind, &bindings, &modules);
        Ok(Self {
            kind,
            slot,
            bindings,
            countdown,
            modules,
            preview,
        })
    }
}

/// Lifetime of a notification, read from its own `autoDismiss` and
/// `duration` inputs. `None` when it stays until closed.
fn countdown_for(bindings: &BindingSet, fallback: DismissDuration) -> Option<DismissDuration> {
    let auto_dismiss = bindings
        .input(fields::AUTO_DISMISS)
        .map(InputBinding::resolve)
        .and_then(|v| v.as_bool())
        .unwrap_or(true);
    if !auto_dismiss {
        return None;
    }
    let duration = bindings
        .input(fields::DURATION)
        .map(InputBinding::resolve)
        .and_then(|v| v.as_int())
        .map(|ms| DismissDuration::new(u64::try_from(ms).unwrap_or_default()))
        .unwrap_or(fallback);
    Some(duration)
}

impl<M: MountPoint + 'static> State<M> {
    fn create(&mut self, prepared: Prepared, dispatcher: &Dispatcher<M>) -> Result<ComponentHandle> {
        let Prepared {
            kind,
            slot,
            bindings,
            countdown,
            modules,
            preview,
        } = prepared;
        let module_names: Vec<String> = modules.iter().map(|m| m.id().to_string()).collect();

        let id = match self.mount.create(kind, bindings, modules) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%kind, error = %err, "mount point rejected instance");
                self.activity.record(LifecycleEvent::CreationFailed {
                    kind,
                    reason: err.to_string(),
                });
                return Err(err.into());
            }
        };

        let handle = ComponentHandle::new(id, kind);
        // The slot is fresh, so this cannot fail.
        let _ = slot.set(handle.clone());
        self.registry.register(kind, handle.clone());

        if let Some(duration) = countdown {
            let expiry = dispatcher.clone();
            let target = Rc::clone(&slot);
            let timer = CountdownTimer::new(duration, self.settings.tick_interval, move || {
                expiry.dispatch(Command::Teardown(target, RemovalReason::Expired));
            });
            self.timers.insert(id, timer);
        }

        self.activity.record(LifecycleEvent::Created {
            kind,
            instance: id,
            modules: module_names,
        });
        self.last_preview = Some(preview);
        tracing::debug!(instance = %id, %kind, countdown_ms = countdown.map(DismissDuration::millis), "instance created");
        Ok(handle)
    }

    fn remove(&mut self, handle: &ComponentHandle, reason: RemovalReason) -> bool {
        if let Some(mut timer) = self.timers.remove(&handle.id()) {
            timer.cancel();
        }
        if !self.registry.unregister(handle.kind(), handle) {
            return false;
        }
        if let Err(err) = self.mount.destroy(handle.id()) {
            tracing::debug!(instance = %handle.id(), error = %err, "ignoring destroy failure");
        }
        self.activity.record(LifecycleEvent::Removed {
            kind: handle.kind(),
            instance: handle.id(),
            reason,
        });
        tracing::debug!(instance = %handle.id(), kind = %handle.kind(), ?reason, "instance removed");
        true
    }

    fn perform_action(
        &mut self,
        source: &ComponentHandle,
        action: &str,
        dispatcher: &Dispatcher<M>,
    ) -> Result<ComponentHandle> {
        if source.kind() != ComponentKind::Widget {
            tracing::warn!(instance = %source.id(), kind = %source.kind(), action, "ignoring action from a non-widget");
            return Err(Error::NotAWidget(source.id()));
        }
        self.actions_performed += 1;
        self.activity.record(LifecycleEvent::Action {
            instance: source.id(),
            action: action.to_string(),
        });
        tracing::info!(instance = %source.id(), action, "widget action performed");

        let number = self.registry.created(ComponentKind::Notification) + 1;
        let spec = NotificationSpec::numbered(
            format!("Action: {action}"),
            number,
            self.settings.notification_duration,
        )
        .variant(NotificationVariant::Success);
        let prepared = Prepared::new(
            ComponentKind::Notification,
            spec.into(),
            &[],
            self.settings,
            dispatcher,
        )?;
        self.create(prepared, dispatcher)
    }

    fn clear_all(&mut self) {
        let (widgets, notifications) = self.registry.clear_all();
        for handle in widgets.iter().chain(&notifications) {
            if let Some(mut timer) = self.timers.remove(&handle.id()) {
                timer.cancel();
            }
            if let Err(err) = self.mount.destroy(handle.id()) {
                tracing::debug!(instance = %handle.id(), error = %err, "ignoring destroy failure");
            }
        }
        for timer in self.timers.values_mut() {
            timer.cancel();
        }
        self.timers.clear();
        self.mount.clear();

        self.activity.record(LifecycleEvent::Cleared {
            widgets: widgets.len(),
            notifications: notifications.len(),
        });
        tracing::debug!(
            widgets = widgets.len(),
            notifications = notifications.len(),
            "containers cleared"
        );
    }

    fn advance(&mut self, elapsed: Duration) {
        for timer in self.timers.values_mut() {
            timer.advance(elapsed);
        }
        self.timers.retain(|_, timer| !timer.status().is_terminal());
    }

    fn apply(&mut self, command: Command, dispatcher: &Dispatcher<M>) {
        match command {
            Command::Teardown(slot, reason) => {
                if let Some(handle) = slot.get().cloned() {
                    self.remove(&handle, reason);
                }
            }
            Command::Action(slot, action) => {
                if let Some(handle) = slot.get().cloned() {
                    if let Err(err) = self.perform_action(&handle, &action, dispatcher) {
                        tracing::warn!(instance = %handle.id(), action, error = %err, "action notification not shown");
                    }
                }
            }
            Command::ClearAll => self.clear_all(),
        }
    }

    fn statistics(&self) -> Statistics {
        Statistics {
            components_created: self.registry.created(ComponentKind::Widget),
            notifications_shown: self.registry.created(ComponentKind::Notification),
            actions_performed: self.actions_performed,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            statistics: self.statistics(),
            widgets: self.registry.list_active(ComponentKind::Widget),
            notifications: self.registry.list_active(ComponentKind::Notification),
            countdowns: self
                .timers
                .iter()
                .map(|(id, timer)| (*id, timer.state()))
                .collect(),
            activity: self.activity.entries(),
            last_preview: self.last_preview.clone(),
        }
    }
}

fn closed_binding<M: MountPoint + 'static>(
    slot: &Slot,
    dispatcher: &Dispatcher<M>,
) -> std::result::Result<BindingDescriptor, crate::error::InvalidBindingError> {
    let dispatcher = dispatcher.clone();
    let slot = Rc::clone(slot);
    BindingDescriptor::output(events::CLOSED, move |_| {
        dispatcher.dispatch(Command::Teardown(Rc::clone(&slot), RemovalReason::Closed));
    })
}

fn action_binding<M: MountPoint + 'static>(
    slot: &Slot,
    dispatcher: &Dispatcher<M>,
) -> std::result::Result<BindingDescriptor, crate::error::InvalidBindingError> {
    let dispatcher = dispatcher.clone();
    let slot = Rc::clone(slot);
    BindingDescriptor::output(events::ACTION_PERFORMED, move |payload| {
        match action_name(payload) {
            Some(action) => {
                dispatcher.dispatch(Command::Action(Rc::clone(&slot), action.to_string()));
            }
            None => tracing::warn!(%payload, "action event without an action name"),
        }
    })
}

/// Accepts `{ action: "..." }` records as well as bare text payloads.
fn action_name(payload: &Value) -> Option<&str> {
    payload
        .get("action")
        .and_then(Value::as_text)
        .or_else(|| payload.as_text())
        .filter(|name| !name.is_empty())
}

/// One entry of a batch creation.
pub struct CreateRequest {
    pub kind: ComponentKind,
    pub inputs: ShapeInputs,
    pub behaviors: Vec<BehaviorRequest>,
}

impl CreateRequest {
    #[must_use]
    pub fn widget(spec: WidgetSpec, flags: BehaviorFlags) -> Self {
        Self {
            kind: ComponentKind::Widget,
            inputs: spec.into(),
            behaviors: flags.requests(),
        }
    }

    #[must_use]
    pub fn notification(spec: NotificationSpec) -> Self {
        Self {
            kind: ComponentKind::Notification,
            inputs: spec.into(),
            behaviors: Vec::new(),
        }
    }
}

/// Coordinates creation, cascading actions and teardown of instances.
///
/// Cloning yields another handle to the same orchestrator.
pub struct Orchestrator<M: MountPoint + 'static> {
    state: Rc<RefCell<State<M>>>,
    queue: Rc<RefCell<VecDeque<Command>>>,
    snapshot: Rc<RefCell<Snapshot>>,
    settings: Settings,
}

impl<M: MountPoint + 'static> Clone for Orchestrator<M> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            queue: Rc::clone(&self.queue),
            snapshot: Rc::clone(&self.snapshot),
            settings: self.settings,
        }
    }
}

impl<M: MountPoint + 'static> fmt::Debug for Orchestrator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Orchestrator")
                .field("registry", &state.registry)
                .field("timers", &state.timers.len())
                .field("statistics", &state.statistics())
                .finish_non_exhaustive(),
            Err(_) => f.write_str("Orchestrator { <busy> }"),
        }
    }
}

impl<M: MountPoint + 'static> Orchestrator<M> {
    /// Wraps `mount` with timings and log sizing taken from `config`.
    pub fn new(mount: M, config: &Config) -> Self {
        let settings = Settings {
            tick_interval: config.tick_interval(),
            notification_duration: config.notification_duration(),
        };
        let state = State {
            mount,
            registry: ComponentRegistry::new(),
            timers: HashMap::new(),
            actions_performed: 0,
            settings,
            activity: ActivityLog::new(config.activity_capacity()),
            last_preview: None,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            snapshot: Rc::new(RefCell::new(Snapshot::default())),
            settings,
        }
    }

    pub fn with_defaults(mount: M) -> Self {
        Self::new(mount, &Config::default())
    }

    fn dispatcher(&self) -> Dispatcher<M> {
        Dispatcher {
            state: Rc::downgrade(&self.state),
            queue: Rc::clone(&self.queue),
            snapshot: Rc::clone(&self.snapshot),
        }
    }

    fn state_mut(&self, operation: &'static str) -> Result<RefMut<'_, State<M>>> {
        enter(&self.state, &self.snapshot).ok_or(Error::Reentrant(operation))
    }

    /// Reads the live state, or the snapshot when an operation holds it.
    fn read<T>(
        &self,
        live: impl FnOnce(&State<M>) -> T,
        held: impl FnOnce(&Snapshot) -> T,
    ) -> T {
        match self.state.try_borrow() {
            Ok(state) => live(&*state),
            Err(_) => held(&*self.snapshot.borrow()),
        }
    }

    /// Creates an instance of `kind` and starts tracking it.
    ///
    /// Every instance gets a `closed` output tearing it down; widgets also
    /// get an `actionPerformed` output routed to [`perform_action`]. An
    /// auto-dismissing notification starts its countdown here.
    ///
    /// Nothing is registered or counted when this fails.
    ///
    /// [`perform_action`]: Orchestrator::perform_action
    pub fn create_instance(
        &self,
        kind: ComponentKind,
        inputs: ShapeInputs,
        behaviors: &[BehaviorRequest],
    ) -> Result<ComponentHandle> {
        let dispatcher = self.dispatcher();
        // Producers may read this orchestrator, so they run before it is locked.
        let prepared = Prepared::new(kind, inputs, behaviors, self.settings, &dispatcher)?;
        let result = self
            .state_mut("create_instance")?
            .create(prepared, &dispatcher);
        dispatcher.drain();
        result
    }

    /// Records a widget action and shows a notification summarizing it.
    ///
    /// Returns the handle of that notification. The action is counted even
    /// if the notification cannot be created. The source may already be
    /// removed, but it must be a widget.
    pub fn perform_action(&self, source: &ComponentHandle, action: &str) -> Result<ComponentHandle> {
        let dispatcher = self.dispatcher();
        let result = self
            .state_mut("perform_action")?
            .perform_action(source, action, &dispatcher);
        dispatcher.drain();
        result
    }

    /// Cancels the countdown of `handle`, forgets it and destroys the
    /// instance. Removing an inactive handle does nothing.
    pub fn remove_instance(&self, handle: &ComponentHandle) {
        let dispatcher = self.dispatcher();
        dispatcher.dispatch(Command::Teardown(
            Rc::new(OnceCell::from(handle.clone())),
            RemovalReason::Removed,
        ));
    }

    /// Tears down every instance of both kinds and empties the containers.
    ///
    /// Creation counters are kept.
    pub fn clear_all(&self) {
        self.dispatcher().dispatch(Command::ClearAll);
    }

    /// Feeds `elapsed` wall time to every running countdown.
    ///
    /// Notifications whose countdown expires are torn down before this
    /// returns.
    pub fn advance(&self, elapsed: Duration) -> Result<()> {
        let dispatcher = self.dispatcher();
        self.state_mut("advance")?.advance(elapsed);
        dispatcher.drain();
        Ok(())
    }

    /// Creates `requests` in order, waiting `delay` between two creations.
    ///
    /// Each creation is applied atomically. The first failure stops the
    /// batch; instances created before it stay active.
    pub async fn create_batch(
        &self,
        requests: Vec<CreateRequest>,
        delay: StaggerDelay,
    ) -> Result<Vec<ComponentHandle>> {
        let mut handles = Vec::with_capacity(requests.len());
        for (index, request) in requests.into_iter().enumerate() {
            if index > 0 && !delay.is_immediate() {
                tokio::time::sleep(delay.as_duration()).await;
            }
            handles.push(self.create_instance(request.kind, request.inputs, &request.behaviors)?);
        }
        Ok(handles)
    }

    /// Active instances of `kind`, oldest first.
    #[must_use]
    pub fn list_active(&self, kind: ComponentKind) -> Vec<ComponentHandle> {
        self.read(
            |state| state.registry.list_active(kind),
            |held| held.active(kind).to_vec(),
        )
    }

    #[must_use]
    pub fn is_active(&self, handle: &ComponentHandle) -> bool {
        self.read(
            |state| state.registry.contains(handle),
            |held| {
                held.active(handle.kind())
                    .iter()
                    .any(|h| h.is_same_instance(handle))
            },
        )
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.read(State::statistics, |held| held.statistics)
    }

    /// Countdown of a live auto-dismissing notification.
    #[must_use]
    pub fn countdown(&self, handle: &ComponentHandle) -> Option<CountdownState> {
        self.read(
            |state| state.timers.get(&handle.id()).map(CountdownTimer::state),
            |held| held.countdowns.get(&handle.id()).copied(),
        )
    }

    /// Activity log entries, oldest first.
    #[must_use]
    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.read(|state| state.activity.entries(), |held| held.activity.clone())
    }

    /// The most recent successful creation request.
    #[must_use]
    pub fn last_preview(&self) -> Option<CreationPreview> {
        self.read(
            |state| state.last_preview.clone(),
            |held| held.last_preview.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::BehaviorId;
    use crate::binding::ModelCell;
    use crate::error::{InstanceCreationError, InvalidBindingError, MountError};
    use crate::lifecycle::CountdownStatus;
    use crate::mount::MemoryMount;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    fn setup() -> (Orchestrator<MemoryMount>, MemoryMount) {
        let mount = MemoryMount::new();
        (Orchestrator::with_defaults(mount.clone()), mount)
    }

    fn widget(orchestrator: &Orchestrator<MemoryMount>, n: u64) -> ComponentHandle {
        orchestrator
            .create_instance(
                ComponentKind::Widget,
                WidgetSpec::numbered(format!("Widget {n}"), n).into(),
                &BehaviorFlags::NONE.requests(),
            )
            .expect("widget accepted")
    }

    fn notification(orchestrator: &Orchestrator<MemoryMount>, duration_ms: u64) -> ComponentHandle {
        orchestrator
            .create_instance(
                ComponentKind::Notification,
                NotificationSpec::new("Hello", "World")
                    .duration(DismissDuration::new(duration_ms))
                    .into(),
                &[],
            )
            .expect("notification accepted")
    }

    #[test]
    fn create_registers_and_counts() {
        let (orchestrator, mount) = setup();
        let handle = widget(&orchestrator, 1);

        assert_eq!(orchestrator.list_active(ComponentKind::Widget), vec![handle.clone()]);
        assert_eq!(orchestrator.statistics().components_created, 1);
        assert!(mount.is_mounted(handle.id()));
    }

    #[test]
    fn active_count_tracks_matched_removals() {
        let (orchestrator, _) = setup();
        let handles: Vec<_> = (1..=4).map(|n| widget(&orchestrator, n)).collect();

        orchestrator.remove_instance(&handles[1]);
        orchestrator.remove_instance(&handles[1]);
        orchestrator.remove_instance(&handles[3]);

        let active = orchestrator.list_active(ComponentKind::Widget);
        assert_eq!(active, vec![handles[0].clone(), handles[2].clone()]);
        assert_eq!(orchestrator.statistics().components_created, 4);
    }

    #[test]
    fn double_remove_matches_single_remove() {
        let (orchestrator, mount) = setup();
        let handle = widget(&orchestrator, 1);

        orchestrator.remove_instance(&handle);
        let after_once = (orchestrator.list_active(ComponentKind::Widget), orchestrator.statistics());
        orchestrator.remove_instance(&handle);
        let after_twice = (orchestrator.list_active(ComponentKind::Widget), orchestrator.statistics());

        assert_eq!(after_once, after_twice);
        assert_eq!(mount.destroy_calls(), 1);
    }

    #[test]
    fn closed_event_tears_down_the_instance() {
        let (orchestrator, mount) = setup();
        let handle = widget(&orchestrator, 1);

        assert_eq!(mount.emit(handle.id(), events::CLOSED, Value::Unit), 1);
        assert!(!orchestrator.is_active(&handle));
        assert!(!mount.is_mounted(handle.id()));

        // A second close from a stale reference is harmless.
        assert_eq!(mount.emit(handle.id(), events::CLOSED, Value::Unit), 0);
    }

    #[test]
    fn perform_action_cascades_into_a_notification() {
        let (orchestrator, mount) = setup();
        let source = widget(&orchestrator, 1);
        let before = orchestrator.statistics();

        let shown = orchestrator
            .perform_action(&source, "like")
            .expect("notification created");

        let after = orchestrator.statistics();
        assert_eq!(after.actions_performed, before.actions_performed + 1);
        assert_eq!(after.notifications_shown, before.notifications_shown + 1);
        assert_eq!(orchestrator.list_active(ComponentKind::Notification), vec![shown.clone()]);

        let rendered = mount.render(shown.id()).expect("notification mounted");
        assert_eq!(rendered.fields.get(fields::TITLE), Some(&Value::from("Action: like")));
        assert_eq!(rendered.fields.get(fields::TYPE), Some(&Value::from("success")));
    }

    #[test]
    fn emitted_action_event_reaches_perform_action() {
        let (orchestrator, mount) = setup();
        let source = widget(&orchestrator, 1);

        let payload = Value::record([("action", "share"), ("widgetId", "abc")]);
        mount.emit(source.id(), events::ACTION_PERFORMED, payload);

        assert_eq!(orchestrator.statistics().actions_performed, 1);
        assert_eq!(orchestrator.list_active(ComponentKind::Notification).len(), 1);
    }

    #[test]
    fn action_event_without_name_is_ignored() {
        let (orchestrator, mount) = setup();
        let source = widget(&orchestrator, 1);

        mount.emit(source.id(), events::ACTION_PERFORMED, Value::Unit);
        assert_eq!(orchestrator.statistics().actions_performed, 0);
    }

    #[test]
    fn notification_expires_through_the_close_path() {
        let (orchestrator, mount) = setup();
        let handle = notification(&orchestrator, 1000);

        orchestrator.advance(Duration::from_millis(900)).expect("idle");
        let state = orchestrator.countdown(&handle).expect("countdown running");
        assert_eq!(state.status, CountdownStatus::Running);
        assert!(orchestrator.is_active(&handle));

        orchestrator.advance(Duration::from_millis(100)).expect("idle");
        assert!(!orchestrator.is_active(&handle));
        assert!(!mount.is_mounted(handle.id()));
        assert!(orchestrator.countdown(&handle).is_none());
        assert_eq!(mount.destroy_calls(), 1);

        let last = orchestrator.activity().pop().expect("removal logged");
        assert!(matches!(
            last.event,
            LifecycleEvent::Removed {
                reason: RemovalReason::Expired,
                ..
            }
        ));
    }

    #[test]
    fn manual_close_stops_the_countdown() {
        let (orchestrator, mount) = setup();
        let handle = notification(&orchestrator, 1000);

        orchestrator.advance(Duration::from_millis(300)).expect("idle");
        mount.emit(handle.id(), events::CLOSED, Value::Unit);
        orchestrator.advance(Duration::from_secs(5)).expect("idle");

        assert_eq!(mount.destroy_calls(), 1);
        let removals = orchestrator
            .activity()
            .into_iter()
            .filter(|e| matches!(e.event, LifecycleEvent::Removed { .. }))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn notification_without_auto_dismiss_has_no_countdown() {
        let (orchestrator, _) = setup();
        let handle = orchestrator
            .create_instance(
                ComponentKind::Notification,
                NotificationSpec::new("Sticky", "Stays").auto_dismiss(false).into(),
                &[],
            )
            .expect("notification accepted");

        assert!(orchestrator.countdown(&handle).is_none());
        orchestrator.advance(Duration::from_secs(120)).expect("idle");
        assert!(orchestrator.is_active(&handle));
    }

    #[test]
    fn clear_all_empties_both_kinds_and_keeps_counters() {
        let (orchestrator, mount) = setup();
        widget(&orchestrator, 1);
        widget(&orchestrator, 2);
        notification(&orchestrator, 5000);
        let before = orchestrator.statistics();

        orchestrator.clear_all();

        assert!(orchestrator.list_active(ComponentKind::Widget).is_empty());
        assert!(orchestrator.list_active(ComponentKind::Notification).is_empty());
        assert_eq!(orchestrator.statistics(), before);
        assert_eq!(mount.clear_calls(), 1);
        assert!(mount.mounted(ComponentKind::Widget).is_empty());

        // No countdown survives a clear.
        orchestrator.advance(Duration::from_secs(10)).expect("idle");
        assert_eq!(mount.destroy_calls(), 3);
    }

    #[test]
    fn duplicate_field_fails_before_the_mount_point() {
        let (orchestrator, mount) = setup();
        let inputs = ShapeInputs::from(WidgetSpec::new("A", "B")).with_value(fields::TITLE, "again");

        let err = orchestrator
            .create_instance(ComponentKind::Widget, inputs, &[])
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidBinding(InvalidBindingError::DuplicateField(ref f)) if f == "title"
        ));
        assert_eq!(mount.create_calls(), 0);
        assert_eq!(orchestrator.statistics(), Statistics::default());
    }

    #[test]
    fn mount_rejection_leaves_no_trace() {
        let mount = MemoryMount::accepting([ComponentKind::Widget]);
        let orchestrator = Orchestrator::with_defaults(mount.clone());
        let source = widget(&orchestrator, 1);
        let before = orchestrator.statistics();

        let err = orchestrator
            .create_instance(
                ComponentKind::Notification,
                NotificationSpec::new("Hello", "World").into(),
                &[],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InstanceCreation(InstanceCreationError::UnknownKind(ComponentKind::Notification))
        ));
        assert_eq!(orchestrator.statistics(), before);
        assert!(orchestrator.list_active(ComponentKind::Notification).is_empty());
        assert_eq!(orchestrator.list_active(ComponentKind::Widget), vec![source]);
    }

    #[test]
    fn synchronous_close_during_create_is_applied_afterwards() {
        let (orchestrator, mount) = setup();
        mount.emit_on_create(events::CLOSED);

        let handle = widget(&orchestrator, 1);

        assert!(!orchestrator.is_active(&handle));
        assert!(!mount.is_mounted(handle.id()));
        assert_eq!(orchestrator.statistics().components_created, 1);
    }

    #[test]
    fn synchronous_close_during_clear_all_is_ignored() {
        let (orchestrator, mount) = setup();
        for n in 1..=3 {
            widget(&orchestrator, n);
        }
        notification(&orchestrator, 5000);
        let before = orchestrator.statistics();
        mount.emit_on_destroy(events::CLOSED);

        orchestrator.clear_all();

        assert!(orchestrator.list_active(ComponentKind::Widget).is_empty());
        assert!(orchestrator.list_active(ComponentKind::Notification).is_empty());
        assert_eq!(orchestrator.statistics(), before);
        assert_eq!(mount.destroy_calls(), 4);

        let events: Vec<_> = orchestrator.activity().into_iter().map(|e| e.event).collect();
        assert!(matches!(
            events.last(),
            Some(LifecycleEvent::Cleared {
                widgets: 3,
                notifications: 1
            })
        ));
        assert!(!events
            .iter()
            .any(|e| matches!(e, LifecycleEvent::Removed { .. })));
    }

    #[test]
    fn synchronous_close_during_remove_is_ignored() {
        let (orchestrator, mount) = setup();
        let handle = widget(&orchestrator, 1);
        mount.emit_on_destroy(events::CLOSED);

        orchestrator.remove_instance(&handle);

        assert!(!orchestrator.is_active(&handle));
        assert_eq!(mount.destroy_calls(), 1);
    }

    fn counted_widget<M: MountPoint + 'static>(observer: &Orchestrator<M>) -> ShapeInputs {
        let observer = observer.clone();
        ShapeInputs::new()
            .with_input(fields::TITLE, move || {
                let next = observer.statistics().components_created + 1;
                Value::from(format!("Widget {next}"))
            })
            .with_value(fields::DESCRIPTION, "Numbered from live statistics")
    }

    #[test]
    fn producers_may_read_the_orchestrator() {
        let (orchestrator, mount) = setup();

        let handle = orchestrator
            .create_instance(ComponentKind::Widget, counted_widget(&orchestrator), &[])
            .expect("widget accepted");

        let preview = orchestrator.last_preview().expect("preview captured").to_string();
        assert!(preview.contains("input('title', 'Widget 1')"));
        let rendered = mount.render(handle.id()).expect("mounted");
        assert_eq!(rendered.fields.get(fields::TITLE), Some(&Value::from("Widget 2")));
    }

    /// Resolves the title while mounting, as an eager renderer would.
    struct EagerRenderMount {
        inner: MemoryMount,
        titles: Rc<RefCell<Vec<Value>>>,
    }

    impl MountPoint for EagerRenderMount {
        fn create(
            &mut self,
            kind: ComponentKind,
            bindings: BindingSet,
            modules: Vec<BehaviorModule>,
        ) -> std::result::Result<InstanceRef, InstanceCreationError> {
            if let Some(title) = bindings.input(fields::TITLE) {
                self.titles.borrow_mut().push(title.resolve());
            }
            self.inner.create(kind, bindings, modules)
        }

        fn destroy(&mut self, instance: InstanceRef) -> std::result::Result<(), MountError> {
            self.inner.destroy(instance)
        }

        fn clear(&mut self) {
            self.inner.clear();
        }
    }

    #[test]
    fn observers_called_while_mounting_see_the_starting_state() {
        let titles = Rc::new(RefCell::new(Vec::new()));
        let orchestrator = Orchestrator::with_defaults(EagerRenderMount {
            inner: MemoryMount::new(),
            titles: Rc::clone(&titles),
        });

        for _ in 0..2 {
            orchestrator
                .create_instance(ComponentKind::Widget, counted_widget(&orchestrator), &[])
                .expect("widget accepted");
        }

        assert_eq!(
            *titles.borrow(),
            vec![Value::from("Widget 1"), Value::from("Widget 2")]
        );
        assert_eq!(orchestrator.statistics().components_created, 2);
        assert_eq!(orchestrator.list_active(ComponentKind::Widget).len(), 2);
    }

    #[test]
    fn perform_action_rejects_non_widget_sources() {
        let (orchestrator, _) = setup();
        let shown = notification(&orchestrator, 5000);
        let before = orchestrator.statistics();

        let err = orchestrator.perform_action(&shown, "like").unwrap_err();

        assert!(matches!(err, Error::NotAWidget(id) if id == shown.id()));
        assert_eq!(orchestrator.statistics(), before);
        assert_eq!(orchestrator.list_active(ComponentKind::Notification), vec![shown]);
    }

    #[test]
    fn two_way_cell_is_shared_with_the_host() {
        let (orchestrator, mount) = setup();
        let collapsed = ModelCell::new(false);
        let a = orchestrator
            .create_instance(
                ComponentKind::Widget,
                WidgetSpec::new("A", "a").collapsed(collapsed.clone()).into(),
                &[],
            )
            .expect("widget accepted");
        let b = orchestrator
            .create_instance(
                ComponentKind::Widget,
                WidgetSpec::new("B", "b").collapsed(collapsed.clone()).into(),
                &[],
            )
            .expect("widget accepted");

        assert!(mount.write_model(a.id(), fields::COLLAPSED, true));
        assert_eq!(collapsed.get(), Value::Bool(true));
        let rendered = mount.render(b.id()).expect("mounted");
        assert_eq!(rendered.fields.get(fields::COLLAPSED), Some(&Value::Bool(true)));
    }

    #[test]
    fn behavior_flags_reach_the_mount_point_in_order() {
        let (orchestrator, mount) = setup();
        let flags = BehaviorFlags {
            hover_effect: true,
            pulse_animation: true,
        };
        let handle = orchestrator
            .create_instance(ComponentKind::Widget, WidgetSpec::new("A", "a").into(), &flags.requests())
            .expect("widget accepted");

        let rendered = mount.render(handle.id()).expect("mounted");
        assert_eq!(
            rendered.modules,
            vec![BehaviorId::HoverEffect, BehaviorId::PulseAnimation]
        );
        let preview = orchestrator.last_preview().expect("preview captured").to_string();
        assert!(preview.contains("output('closed')"));
        assert!(preview.contains("output('actionPerformed')"));
        assert!(preview.contains("hover-effect, pulse-animation"));
    }

    #[test]
    fn countdown_uses_configured_tick_interval() {
        let config = Config {
            tick_interval_ms: Some(250),
            ..Config::default()
        };
        let orchestrator = Orchestrator::new(MemoryMount::new(), &config);
        let handle = notification(&orchestrator, 1000);

        orchestrator.advance(Duration::from_millis(500)).expect("idle");
        let state = orchestrator.countdown(&handle).expect("running");
        assert_eq!(state.tick_interval_ms, 250);
        assert_abs_diff_eq!(state.remaining_fraction, 0.5, epsilon = F64_EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_creation_is_staggered() {
        let (orchestrator, _) = setup();
        let requests = (1..=3)
            .map(|n| CreateRequest::widget(WidgetSpec::numbered(format!("Batch Widget {n}"), n), BehaviorFlags::NONE))
            .collect();

        let started = tokio::time::Instant::now();
        let handles = orchestrator
            .create_batch(requests, StaggerDelay::new(200))
            .await
            .expect("batch created");

        assert_eq!(handles.len(), 3);
        assert!(started.elapsed() >= Duration::from_millis(400));
        assert_eq!(orchestrator.list_active(ComponentKind::Widget), handles);
    }
}
