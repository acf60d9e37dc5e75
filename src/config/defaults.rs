// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Countdown**: Tick period and notification lifetime
//! - **Batch**: Delay between staggered creations
//! - **Activity**: Activity log sizing
//! - **Shapes**: Default titles and behavior flags

// ==========================================================================
// Countdown Defaults
// ==========================================================================

/// Default period between two countdown ticks (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick period (in milliseconds).
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Maximum tick period (in milliseconds).
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

/// Default lifetime of an auto-dismissing notification (in milliseconds).
pub const DEFAULT_DISMISS_DURATION_MS: u64 = 5000;

/// Minimum notification lifetime (in milliseconds).
pub const MIN_DISMISS_DURATION_MS: u64 = 1000;

/// Maximum notification lifetime (in milliseconds).
pub const MAX_DISMISS_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Batch Defaults
// ==========================================================================

/// Default delay between two creations of a batch (in milliseconds).
pub const DEFAULT_STAGGER_DELAY_MS: u64 = 200;

/// Maximum delay between two creations of a batch (in milliseconds).
pub const MAX_STAGGER_DELAY_MS: u64 = 5000;

// ==========================================================================
// Activity Defaults
// ==========================================================================

/// Default number of lifecycle events kept in the activity log.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 256;

// ==========================================================================
// Shape Defaults
// ==========================================================================

/// Title used for the first widget of a session.
pub const DEFAULT_WIDGET_TITLE: &str = "Sample Widget";

/// Title used for the first notification of a session.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Hello World!";

/// Whether the hover effect is attached to new widgets by default.
pub const DEFAULT_HOVER_EFFECT: bool = true;

/// Whether the pulse animation is attached to new widgets by default.
pub const DEFAULT_PULSE_ANIMATION: bool = false;

/// Default re-scheduling period of the pulse animation (in milliseconds).
pub const DEFAULT_PULSE_INTERVAL_MS: u64 = 5000;
