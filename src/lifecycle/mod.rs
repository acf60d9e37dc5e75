// SPDX-License-Identifier: MPL-2.0
//! Dynamic component lifecycle.
//!
//! # Components
//!
//! - [`countdown`] - `CountdownTimer`, the auto-dismiss state machine
//! - [`registry`] - `ComponentRegistry`, ordered tracking of live instances
//! - [`orchestrator`] - `Orchestrator`, creation, cascading actions and teardown
//!
//! # Usage
//!
//! ```
//! use live_mount::behavior::BehaviorFlags;
//! use live_mount::domain::component::ComponentKind;
//! use live_mount::lifecycle::Orchestrator;
//! use live_mount::mount::MemoryMount;
//! use live_mount::shape::WidgetSpec;
//!
//! let orchestrator = Orchestrator::with_defaults(MemoryMount::new());
//! let widget = orchestrator
//!     .create_instance(
//!         ComponentKind::Widget,
//!         WidgetSpec::numbered("Sample Widget", 1).into(),
//!         &BehaviorFlags::default().requests(),
//!     )
//!     .unwrap();
//!
//! orchestrator.perform_action(&widget, "like").unwrap();
//! assert_eq!(orchestrator.statistics().notifications_shown, 1);
//! ```

mod countdown;
mod orchestrator;
mod registry;
mod statistics;

pub use countdown::{CloseAction, CountdownState, CountdownStatus, CountdownTimer};
pub use orchestrator::{CreateRequest, Orchestrator};
pub use registry::ComponentRegistry;
pub use statistics::Statistics;
