// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`ActivityCapacity`]: Capacity of the lifecycle activity log

mod newtypes;

pub use newtypes::{activity_capacity_bounds, ActivityCapacity};
