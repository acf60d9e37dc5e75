// SPDX-License-Identifier: MPL-2.0
//! End-to-end lifecycle scenarios driven through the in-memory mount point.

use std::time::Duration;

use live_mount::behavior::BehaviorFlags;
use live_mount::binding::{ModelCell, Value};
use live_mount::diagnostics::{LifecycleEvent, RemovalReason};
use live_mount::domain::component::ComponentKind;
use live_mount::domain::ui::{DismissDuration, StaggerDelay};
use live_mount::error::{Error, InstanceCreationError};
use live_mount::lifecycle::{CountdownStatus, CreateRequest, Orchestrator};
use live_mount::mount::MemoryMount;
use live_mount::shape::{events, fields, NotificationSpec, ShapeInputs, WidgetSpec};

fn session() -> (Orchestrator<MemoryMount>, MemoryMount) {
    let mount = MemoryMount::new();
    (Orchestrator::with_defaults(mount.clone()), mount)
}

#[test]
fn widget_action_notification_and_expiry() {
    let (orchestrator, mount) = session();
    let widget = orchestrator
        .create_instance(
            ComponentKind::Widget,
            WidgetSpec::numbered("Sample Widget", 1).into(),
            &BehaviorFlags::default().requests(),
        )
        .expect("widget accepted");

    mount.emit(
        widget.id(),
        events::ACTION_PERFORMED,
        Value::record([("action", "like")]),
    );
    let notifications = orchestrator.list_active(ComponentKind::Notification);
    assert_eq!(notifications.len(), 1);
    let shown = &notifications[0];

    let rendered = mount.render(shown.id()).expect("notification mounted");
    assert_eq!(rendered.fields.get(fields::TITLE), Some(&Value::from("Action: like")));
    assert_eq!(
        rendered.fields.get(fields::MESSAGE),
        Some(&Value::from(
            "This is notification #1. It will auto-dismiss in 5 seconds unless you close it manually."
        ))
    );

    // Ten 500 ms steps at the default 100 ms tick.
    for _ in 0..9 {
        orchestrator
            .advance(Duration::from_millis(500))
            .expect("orchestrator idle");
    }
    let state = orchestrator.countdown(shown).expect("still running");
    assert_eq!(state.status, CountdownStatus::Running);
    assert_eq!(state.progress_percent().round(), 10.0);

    orchestrator
        .advance(Duration::from_millis(500))
        .expect("orchestrator idle");
    assert!(orchestrator.list_active(ComponentKind::Notification).is_empty());
    assert!(orchestrator.is_active(&widget));

    let stats = orchestrator.statistics();
    assert_eq!(stats.components_created, 1);
    assert_eq!(stats.notifications_shown, 1);
    assert_eq!(stats.actions_performed, 1);
}

#[test]
fn independent_countdowns_expire_in_order() {
    let (orchestrator, _) = session();
    let short = orchestrator
        .create_instance(
            ComponentKind::Notification,
            NotificationSpec::new("Short", "1s")
                .duration(DismissDuration::new(1000))
                .into(),
            &[],
        )
        .expect("accepted");
    let long = orchestrator
        .create_instance(
            ComponentKind::Notification,
            NotificationSpec::new("Long", "3s")
                .duration(DismissDuration::new(3000))
                .into(),
            &[],
        )
        .expect("accepted");

    orchestrator
        .advance(Duration::from_millis(1000))
        .expect("orchestrator idle");
    assert_eq!(orchestrator.list_active(ComponentKind::Notification), vec![long.clone()]);
    assert!(!orchestrator.is_active(&short));

    orchestrator
        .advance(Duration::from_millis(2000))
        .expect("orchestrator idle");
    assert!(orchestrator.list_active(ComponentKind::Notification).is_empty());
}

#[test]
fn shared_collapse_state_survives_removal() {
    let (orchestrator, mount) = session();
    let collapsed = ModelCell::new(false);
    let first = orchestrator
        .create_instance(
            ComponentKind::Widget,
            WidgetSpec::new("First", "one").collapsed(collapsed.clone()).into(),
            &[],
        )
        .expect("accepted");

    mount.write_model(first.id(), fields::COLLAPSED, true);
    orchestrator.remove_instance(&first);

    let second = orchestrator
        .create_instance(
            ComponentKind::Widget,
            WidgetSpec::new("Second", "two").collapsed(collapsed.clone()).into(),
            &[],
        )
        .expect("accepted");
    let rendered = mount.render(second.id()).expect("mounted");
    assert_eq!(rendered.fields.get(fields::COLLAPSED), Some(&Value::Bool(true)));
}

#[test]
fn activity_log_tells_the_whole_story() {
    let (orchestrator, mount) = session();
    let widget = orchestrator
        .create_instance(ComponentKind::Widget, WidgetSpec::new("W", "w").into(), &[])
        .expect("accepted");
    mount.emit(widget.id(), events::CLOSED, Value::Unit);
    orchestrator.clear_all();

    let events: Vec<_> = orchestrator.activity().into_iter().map(|e| e.event).collect();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], LifecycleEvent::Created { kind: ComponentKind::Widget, .. }));
    assert!(matches!(
        events[1],
        LifecycleEvent::Removed {
            reason: RemovalReason::Closed,
            ..
        }
    ));
    assert!(matches!(
        events[2],
        LifecycleEvent::Cleared {
            widgets: 0,
            notifications: 0
        }
    ));

    let json = serde_json::to_value(orchestrator.activity()).expect("serializable");
    assert_eq!(json[1]["reason"], "closed");
}

#[test]
fn rejected_notification_keeps_the_action_count() {
    let mount = MemoryMount::accepting([ComponentKind::Widget]);
    let orchestrator = Orchestrator::with_defaults(mount);
    let widget = orchestrator
        .create_instance(ComponentKind::Widget, WidgetSpec::new("W", "w").into(), &[])
        .expect("accepted");

    let err = orchestrator.perform_action(&widget, "like").unwrap_err();
    assert!(matches!(
        err,
        Error::InstanceCreation(InstanceCreationError::UnknownKind(ComponentKind::Notification))
    ));
    let stats = orchestrator.statistics();
    assert_eq!(stats.actions_performed, 1);
    assert_eq!(stats.notifications_shown, 0);
}

#[tokio::test(start_paused = true)]
async fn batch_stops_at_first_failure() {
    let (orchestrator, _) = session();
    let requests = vec![
        CreateRequest::widget(WidgetSpec::numbered("Batch 1", 1), BehaviorFlags::NONE),
        CreateRequest {
            kind: ComponentKind::Widget,
            inputs: ShapeInputs::from(WidgetSpec::new("Broken", "dup"))
                .with_value(fields::TITLE, "again"),
            behaviors: Vec::new(),
        },
        CreateRequest::widget(WidgetSpec::numbered("Batch 3", 3), BehaviorFlags::NONE),
    ];

    let result = orchestrator
        .create_batch(requests, StaggerDelay::new(50))
        .await;

    assert!(matches!(result, Err(Error::InvalidBinding(_))));
    assert_eq!(orchestrator.list_active(ComponentKind::Widget).len(), 1);
}
