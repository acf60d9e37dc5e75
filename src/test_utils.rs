// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Countdown fractions are `f64`; compare them with the `approx` macros
//! rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;
