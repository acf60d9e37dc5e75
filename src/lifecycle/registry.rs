// SPDX-License-Identifier: MPL-2.0
//! Ordered tracking of live instances.
//!
//! The registry keeps one insertion-ordered list per [`ComponentKind`] plus a
//! creation counter per kind. Removing a handle never reorders the others.

use crate::domain::component::{ComponentHandle, ComponentKind};

#[derive(Debug, Default)]
struct KindList {
    active: Vec<ComponentHandle>,
    created: u64,
}

/// Live instances per kind.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    widgets: KindList,
    notifications: KindList,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: ComponentKind) -> &KindList {
        match kind {
            ComponentKind::Widget => &self.widgets,
            ComponentKind::Notification => &self.notifications,
        }
    }

    fn list_mut(&mut self, kind: ComponentKind) -> &mut KindList {
        match kind {
            ComponentKind::Widget => &mut self.widgets,
            ComponentKind::Notification => &mut self.notifications,
        }
    }

    /// Appends `handle` and counts one creation for `kind`.
    pub fn register(&mut self, kind: ComponentKind, handle: ComponentHandle) {
        debug_assert_eq!(kind, handle.kind(), "handle registered under the wrong kind");
        let list = self.list_mut(kind);
        list.active.push(handle);
        list.created += 1;
    }

    /// Removes the first handle with the same identity.
    ///
    /// Returns `false` when the handle is not active, which is not an error.
    pub fn unregister(&mut self, kind: ComponentKind, handle: &ComponentHandle) -> bool {
        let list = self.list_mut(kind);
        match list.active.iter().position(|h| h.is_same_instance(handle)) {
            Some(pos) => {
                list.active.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the active handles of `kind`, in insertion order.
    #[must_use]
    pub fn list_active(&self, kind: ComponentKind) -> Vec<ComponentHandle> {
        self.list(kind).active.clone()
    }

    #[must_use]
    pub fn active_count(&self, kind: ComponentKind) -> usize {
        self.list(kind).active.len()
    }

    #[must_use]
    pub fn contains(&self, handle: &ComponentHandle) -> bool {
        self.list(handle.kind())
            .active
            .iter()
            .any(|h| h.is_same_instance(handle))
    }

    /// Number of `register` calls for `kind` since creation.
    #[must_use]
    pub fn created(&self, kind: ComponentKind) -> u64 {
        self.list(kind).created
    }

    /// Removes and returns every active handle as `(widgets, notifications)`.
    ///
    /// Creation counters are left untouched.
    pub fn clear_all(&mut self) -> (Vec<ComponentHandle>, Vec<ComponentHandle>) {
        (
            std::mem::take(&mut self.widgets.active),
            std::mem::take(&mut self.notifications.active),
        )
    }
}
