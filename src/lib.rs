// SPDX-License-Identifier: MPL-2.0
//! `live_mount` creates, tracks and tears down component instances at runtime.
//!
//! A host describes each instance declaratively (input, output and two-way
//! bindings plus optional behavior modules) and hands it to an
//! [`Orchestrator`](lifecycle::Orchestrator), which mounts it through a
//! [`MountPoint`](mount::MountPoint), keeps it registered, dismisses
//! notifications on a countdown and turns widget actions into notifications.

pub mod behavior;
pub mod binding;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod mount;
pub mod preview;
pub mod shape;

#[cfg(test)]
mod test_utils;
