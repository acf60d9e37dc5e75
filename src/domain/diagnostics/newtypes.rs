// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Activity Capacity Bounds
// =============================================================================

/// Activity log capacity bounds (16 to 4096 entries).
pub mod activity_capacity_bounds {
    /// Minimum number of retained entries.
    pub const MIN: usize = 16;
    /// Maximum number of retained entries.
    pub const MAX: usize = 4096;
    /// Default number of retained entries.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// ActivityCapacity
// =============================================================================

/// Number of lifecycle events the activity log keeps before evicting the
/// oldest one.
///
/// # Example
///
/// ```
/// use live_mount::domain::diagnostics::ActivityCapacity;
///
/// assert_eq!(ActivityCapacity::new(64).value(), 64);
/// assert_eq!(ActivityCapacity::new(1).value(), 16); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCapacity(usize);

impl ActivityCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(activity_capacity_bounds::MIN, activity_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= activity_capacity_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= activity_capacity_bounds::MAX
    }
}

impl Default for ActivityCapacity {
    fn default() -> Self {
        Self(activity_capacity_bounds::DEFAULT)
    }
}
