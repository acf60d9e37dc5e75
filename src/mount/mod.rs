// SPDX-License-Identifier: MPL-2.0
//! The mount point: the collaborator that physically hosts instances.
//!
//! The lifecycle core never renders anything itself. It hands a kind, a
//! validated [`BindingSet`] and the resolved behavior modules to a
//! [`MountPoint`], and keeps only the returned [`InstanceRef`].

mod memory;

pub use memory::{MemoryMount, RenderedInstance};

use crate::behavior::BehaviorModule;
use crate::binding::BindingSet;
use crate::domain::component::{ComponentKind, InstanceRef};
use crate::error::{InstanceCreationError, MountError};

/// Physical host of the widget and notification containers.
pub trait MountPoint {
    /// Instantiates a component of `kind` with its bindings and modules.
    fn create(
        &mut self,
        kind: ComponentKind,
        bindings: BindingSet,
        modules: Vec<BehaviorModule>,
    ) -> Result<InstanceRef, InstanceCreationError>;

    /// Destroys one instance. Destroying a detached instance reports
    /// [`MountError::Detached`], which callers may ignore.
    fn destroy(&mut self, instance: InstanceRef) -> Result<(), MountError>;

    /// Empties both containers.
    fn clear(&mut self);
}
