// SPDX-License-Identifier: MPL-2.0
//! Instance identity types.
//!
//! A live instance is never referenced by pointer. The mount point hands out
//! an opaque [`InstanceRef`], and the registry tracks it inside a
//! [`ComponentHandle`] until the instance is torn down.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The two fixed containers an instance can be mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Widget,
    Notification,
}

impl ComponentKind {
    /// All kinds, in container order.
    pub const ALL: [ComponentKind; 2] = [ComponentKind::Widget, ComponentKind::Notification];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Widget => "widget",
            ComponentKind::Notification => "notification",
        }
    }

    /// Input fields a shape of this kind cannot render without.
    #[must_use]
    pub fn required_inputs(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Widget => &["title", "description"],
            ComponentKind::Notification => &["title", "message"],
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to an instance living inside a mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceRef(u64);

impl InstanceRef {
    /// Wraps a raw identifier chosen by a mount point.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry entry for one live instance.
///
/// Handles are immutable. Re-creating an instance produces a new handle.
/// Identity is the [`InstanceRef`]; two handles with the same reference are
/// the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentHandle {
    id: InstanceRef,
    kind: ComponentKind,
    created_at: DateTime<Local>,
}

impl ComponentHandle {
    #[must_use]
    pub fn new(id: InstanceRef, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            created_at: Local::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceRef {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Returns true when both handles refer to the same instance.
    #[must_use]
    pub fn is_same_instance(&self, other: &ComponentHandle) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(ComponentKind::Widget.to_string(), "widget");
        assert_eq!(ComponentKind::Notification.to_string(), "notification");
    }

    #[test]
    fn handles_compare_by_instance() {
        let a = ComponentHandle::new(InstanceRef::from_raw(1), ComponentKind::Widget);
        let b = ComponentHandle::new(InstanceRef::from_raw(1), ComponentKind::Widget);
        let c = ComponentHandle::new(InstanceRef::from_raw(2), ComponentKind::Widget);

        assert!(a.is_same_instance(&b));
        assert!(!a.is_same_instance(&c));
    }

    #[test]
    fn instance_ref_display() {
        assert_eq!(InstanceRef::from_raw(42).to_string(), "#42");
    }
}
