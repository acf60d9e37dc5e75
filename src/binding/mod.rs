// SPDX-License-Identifier: MPL-2.0
//! Declarative bindings between a live instance and host-side state.
//!
//! A creation request carries a [`BindingSet`]: an ordered list of
//! [`BindingDescriptor`]s. Descriptors are pure data; the mount point decides
//! when to evaluate inputs and when to invoke output handlers.
//!
//! # Components
//!
//! - [`value`] - `Value`, the dynamically typed payload carried by bindings
//! - [`model`] - `ModelCell`, the shared cell behind two-way bindings
//! - [`descriptor`] - descriptor variants and set-level validation

mod descriptor;
mod model;
mod value;

pub use descriptor::{
    BindingDescriptor, BindingSet, Handler, InputBinding, OutputBinding, Resolver, TwoWayBinding,
};
pub use model::ModelCell;
pub use value::Value;
