// SPDX-License-Identifier: MPL-2.0
//! Session-wide usage counters.

use serde::Serialize;

/// Snapshot of the usage counters.
///
/// Every counter only grows; they are reset by restarting the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    /// Widgets created since start.
    pub components_created: u64,
    /// Notifications created since start, including action notifications.
    pub notifications_shown: u64,
    /// Actions reported by widgets.
    pub actions_performed: u64,
}
