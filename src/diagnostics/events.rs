// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event types recorded in the activity log.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::component::{ComponentKind, InstanceRef};

/// Why an instance left its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// The instance emitted `closed`.
    Closed,
    /// Its countdown reached zero.
    Expired,
    /// The host removed it explicitly.
    Removed,
}

/// Something that happened to an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    Created {
        kind: ComponentKind,
        instance: InstanceRef,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        modules: Vec<String>,
    },
    CreationFailed {
        kind: ComponentKind,
        reason: String,
    },
    Removed {
        kind: ComponentKind,
        instance: InstanceRef,
        reason: RemovalReason,
    },
    /// A widget reported a user action.
    Action {
        instance: InstanceRef,
        action: String,
    },
    Cleared {
        widgets: usize,
        notifications: usize,
    },
}

/// A lifecycle event with the local time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    #[serde(flatten)]
    pub event: LifecycleEvent,
}

impl ActivityEntry {
    #[must_use]
    pub fn now(event: LifecycleEvent) -> Self {
        Self {
            at: Local::now(),
            event,
        }
    }
}
