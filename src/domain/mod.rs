// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by every other module.
//!
//! This module contains plain data types and validated newtypes. It does not
//! know about mount points, timers or the orchestrator.
//!
//! # Modules
//!
//! - [`component`]: Instance identity ([`ComponentKind`](component::ComponentKind),
//!   [`ComponentHandle`](component::ComponentHandle), [`InstanceRef`](component::InstanceRef))
//! - [`diagnostics`]: Activity log sizing ([`ActivityCapacity`](diagnostics::ActivityCapacity))
//! - [`ui`]: Timing value objects ([`TickInterval`](ui::TickInterval),
//!   [`DismissDuration`](ui::DismissDuration), [`StaggerDelay`](ui::StaggerDelay))

pub mod component;
pub mod diagnostics;
pub mod ui;
