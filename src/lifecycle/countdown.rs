// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss countdown for notification instances.
//!
//! ```text
//! Running ──(fraction reaches 0)──▶ Expired    (close action runs once)
//!    │
//!    └──────(cancel)──────────────▶ Cancelled  (close action never runs)
//! ```
//!
//! Both terminal states are absorbing. Every operation on a terminal timer is
//! a silent no-op.

use std::fmt;
use std::time::Duration;

use crate::domain::ui::{DismissDuration, TickInterval};

/// Lifecycle status of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Running,
    Expired,
    Cancelled,
}

impl CountdownStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, CountdownStatus::Running)
    }
}

/// Read-only snapshot of a countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownState {
    /// Remaining share of the lifetime, in `[0, 1]`.
    pub remaining_fraction: f64,
    pub tick_interval_ms: u64,
    pub total_duration_ms: u64,
    pub status: CountdownStatus,
}

impl CountdownState {
    /// Width of the progress bar, in percent.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.remaining_fraction * 100.0
    }
}

/// Action run when the countdown expires.
pub type CloseAction = Box<dyn FnOnce()>;

/// Per-instance countdown state machine.
///
/// The remaining fraction is derived from the number of elapsed ticks rather
/// than accumulated by repeated subtraction, so it lands on exactly `0.0` on
/// the final tick.
pub struct CountdownTimer {
    tick_interval: TickInterval,
    total_duration: DismissDuration,
    ticks: u64,
    pending: Duration,
    status: CountdownStatus,
    on_expire: Option<CloseAction>,
}

impl CountdownTimer {
    /// Creates a running countdown with a full fraction.
    pub fn new(
        total_duration: DismissDuration,
        tick_interval: TickInterval,
        on_expire: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            tick_interval,
            total_duration,
            ticks: 0,
            pending: Duration::ZERO,
            status: CountdownStatus::Running,
            on_expire: Some(Box::new(on_expire)),
        }
    }

    #[must_use]
    pub fn status(&self) -> CountdownStatus {
        self.status
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn elapsed_ms(&self) -> u64 {
        self.ticks.saturating_mul(self.tick_interval.millis())
    }

    #[must_use]
    pub fn remaining_fraction(&self) -> f64 {
        let total = self.total_duration.millis();
        let elapsed = self.elapsed_ms();
        if elapsed >= total {
            0.0
        } else {
            (total - elapsed) as f64 / total as f64
        }
    }

    /// Time left before expiry.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::from_millis(
            self.total_duration
                .millis()
                .saturating_sub(self.elapsed_ms()),
        )
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        CountdownState {
            remaining_fraction: self.remaining_fraction(),
            tick_interval_ms: self.tick_interval.millis(),
            total_duration_ms: self.total_duration.millis(),
            status: self.status,
        }
    }

    /// Applies one tick. Expiry runs the close action before returning.
    pub fn tick(&mut self) -> CountdownStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        self.ticks += 1;
        if self.remaining_fraction() <= 0.0 {
            self.status = CountdownStatus::Expired;
            if let Some(close) = self.on_expire.take() {
                close();
            }
        }
        self.status
    }

    /// Feeds elapsed wall time and fires one tick per whole interval.
    ///
    /// Returns the number of ticks applied. Leftover time is carried over to
    /// the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if self.status.is_terminal() {
            return 0;
        }
        self.pending += elapsed;
        let interval = self.tick_interval.as_duration();
        let mut fired = 0;
        while self.pending >= interval && !self.status.is_terminal() {
            self.pending -= interval;
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Stops the countdown without running the close action.
    ///
    /// Returns true when the timer was running.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = CountdownStatus::Cancelled;
        self.on_expire = None;
        true
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("tick_interval", &self.tick_interval)
            .field("total_duration", &self.total_duration)
            .field("ticks", &self.ticks)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
