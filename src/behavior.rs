// SPDX-License-Identifier: MPL-2.0
//! Behavior modules attachable to an instance at creation time.
//!
//! A module is a capability token. Once handed to the mount point its whole
//! lifecycle (event listeners, periodic effects) belongs to the mount point.

use std::fmt;

use crate::binding::Value;
use crate::config::DEFAULT_PULSE_INTERVAL_MS;

/// Known cross-cutting effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorId {
    /// Glow and slight scale-up while the pointer hovers the instance.
    HoverEffect,
    /// Periodic pulse whose phase is re-randomized every interval.
    PulseAnimation,
}

impl BehaviorId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorId::HoverEffect => "hover-effect",
            BehaviorId::PulseAnimation => "pulse-animation",
        }
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module token with its optional configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorModule {
    id: BehaviorId,
    config: Option<Value>,
}

impl BehaviorModule {
    #[must_use]
    pub fn new(id: BehaviorId) -> Self {
        Self { id, config: None }
    }

    #[must_use]
    pub fn hover_effect() -> Self {
        Self::new(BehaviorId::HoverEffect)
    }

    /// Pulse animation re-scheduled every `interval_ms`.
    #[must_use]
    pub fn pulse_animation(interval_ms: u64) -> Self {
        Self::new(BehaviorId::PulseAnimation).with_config(Value::record([("intervalMs", interval_ms)]))
    }

    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn id(&self) -> BehaviorId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }
}

/// A module the caller asks for, with its enable flag.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorRequest {
    pub module: BehaviorModule,
    pub enabled: bool,
}

impl BehaviorRequest {
    #[must_use]
    pub fn new(module: BehaviorModule, enabled: bool) -> Self {
        Self { module, enabled }
    }
}

/// The two operator toggles of the demo form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorFlags {
    pub hover_effect: bool,
    pub pulse_animation: bool,
}

impl BehaviorFlags {
    /// No modules at all.
    pub const NONE: BehaviorFlags = BehaviorFlags {
        hover_effect: false,
        pulse_animation: false,
    };

    /// Requests in layering order: hover below pulse.
    #[must_use]
    pub fn requests(self) -> Vec<BehaviorRequest> {
        vec![
            BehaviorRequest::new(BehaviorModule::hover_effect(), self.hover_effect),
            BehaviorRequest::new(
                BehaviorModule::pulse_animation(DEFAULT_PULSE_INTERVAL_MS),
                self.pulse_animation,
            ),
        ]
    }
}

impl Default for BehaviorFlags {
    fn default() -> Self {
        Self {
            hover_effect: crate::config::DEFAULT_HOVER_EFFECT,
            pulse_animation: crate::config::DEFAULT_PULSE_ANIMATION,
        }
    }
}

/// Resolves the modules to hand to the mount point.
///
/// Keeps the caller's declaration order so visual layering is reproducible.
/// Disabled requests are dropped entirely.
#[must_use]
pub fn attach(requests: &[BehaviorRequest]) -> Vec<BehaviorModule> {
    requests
        .iter()
        .filter(|request| request.enabled)
        .map(|request| request.module.clone())
        .collect()
}
