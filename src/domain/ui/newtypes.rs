// SPDX-License-Identifier: MPL-2.0
//! UI timing newtypes.
//!
//! This module provides type-safe wrappers for durations used by the
//! lifecycle core, ensuring they are always within valid ranges.

use std::time::Duration;

use crate::config::{
    DEFAULT_DISMISS_DURATION_MS, DEFAULT_STAGGER_DELAY_MS, DEFAULT_TICK_INTERVAL_MS,
    MAX_DISMISS_DURATION_MS, MAX_STAGGER_DELAY_MS, MAX_TICK_INTERVAL_MS,
    MIN_DISMISS_DURATION_MS, MIN_TICK_INTERVAL_MS,
};

// =============================================================================
// TickInterval
// =============================================================================

/// Period between two countdown ticks, in milliseconds (10–1000 ms).
///
/// # Example
///
/// ```
/// use live_mount::domain::ui::TickInterval;
///
/// assert_eq!(TickInterval::default().millis(), 100);
/// assert_eq!(TickInterval::new(5).millis(), 10); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval(u64);

impl TickInterval {
    /// Creates a new tick interval, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS))
    }

    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(DEFAULT_TICK_INTERVAL_MS)
    }
}

// =============================================================================
// DismissDuration
// =============================================================================

/// Total lifetime of an auto-dismissing notification (1–60 s).
///
/// This newtype enforces validity at the type level so a countdown never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissDuration(u64);

impl DismissDuration {
    /// Creates a new dismiss duration, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_DISMISS_DURATION_MS, MAX_DISMISS_DURATION_MS))
    }

    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the duration in whole seconds, rounded down.
    #[must_use]
    pub fn whole_seconds(self) -> u64 {
        self.0 / 1000
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DismissDuration {
    fn default() -> Self {
        Self(DEFAULT_DISMISS_DURATION_MS)
    }
}

// =============================================================================
// StaggerDelay
// =============================================================================

/// Delay between two creations of a batch (0–5000 ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerDelay(u64);

impl StaggerDelay {
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.min(MAX_STAGGER_DELAY_MS))
    }

    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true when batch creations happen back to back.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self.0 == 0
    }
}

impl Default for StaggerDelay {
    fn default() -> Self {
        Self(DEFAULT_STAGGER_DELAY_MS)
    }
}
