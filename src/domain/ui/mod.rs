// SPDX-License-Identifier: MPL-2.0
//! UI timing types.
//!
//! Value objects for the time-driven parts of the lifecycle core,
//! independent of any presentation framework.

pub mod newtypes;

pub use newtypes::{DismissDuration, StaggerDelay, TickInterval};
