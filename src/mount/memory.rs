// SPDX-License-Identifier: MPL-2.0
//! Headless in-memory mount point.
//!
//! Used by the demo binary and the tests. It keeps every live instance with
//! its bindings, so callers can render an instance (re-evaluating its
//! inputs), emit events from it, or write through its two-way fields as the
//! instance itself would.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use super::MountPoint;
use crate::behavior::{BehaviorId, BehaviorModule};
use crate::binding::{BindingDescriptor, BindingSet, Handler, Value};
use crate::domain::component::{ComponentKind, InstanceRef};
use crate::error::{InstanceCreationError, MountError};

struct MountedInstance {
    kind: ComponentKind,
    bindings: BindingSet,
    modules: Vec<BehaviorModule>,
}

#[derive(Default)]
struct Counters {
    create: usize,
    destroy: usize,
    clear: usize,
}

struct Inner {
    accepted: HashSet<ComponentKind>,
    next_id: u64,
    instances: BTreeMap<InstanceRef, MountedInstance>,
    emit_on_create: Option<String>,
    emit_on_destroy: Option<String>,
    counters: Counters,
}

/// What an instance would display right now.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInstance {
    pub kind: ComponentKind,
    /// Current value of every input and two-way field.
    pub fields: BTreeMap<String, Value>,
    pub modules: Vec<BehaviorId>,
}

/// Shared handle to an in-memory pair of containers.
///
/// Clones refer to the same containers.
#[derive(Clone)]
pub struct MemoryMount {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryMount {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMount {
    /// A mount point accepting both kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::accepting(ComponentKind::ALL)
    }

    /// A mount point with containers for the given kinds only.
    pub fn accepting(kinds: impl IntoIterator<Item = ComponentKind>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                accepted: kinds.into_iter().collect(),
                next_id: 1,
                instances: BTreeMap::new(),
                emit_on_create: None,
                emit_on_destroy: None,
                counters: Counters::default(),
            })),
        }
    }

    /// Makes every new instance emit `event` synchronously from inside
    /// `create`, as an eager component might.
    pub fn emit_on_create(&self, event: impl Into<String>) {
        self.inner.borrow_mut().emit_on_create = Some(event.into());
    }

    /// Makes every instance emit `event` synchronously from inside
    /// `destroy`, before it is detached.
    pub fn emit_on_destroy(&self, event: impl Into<String>) {
        self.inner.borrow_mut().emit_on_destroy = Some(event.into());
    }

    /// Emits `event` from `instance`. Returns the number of handlers invoked;
    /// a detached instance emits nothing.
    pub fn emit(&self, instance: InstanceRef, event: &str, payload: Value) -> usize {
        let handlers = self.handlers(instance, event);
        // Handlers may call back into this mount point.
        for handler in &handlers {
            handler(&payload);
        }
        handlers.len()
    }

    fn handlers(&self, instance: InstanceRef, event: &str) -> Vec<Handler> {
        self.inner
            .borrow()
            .instances
            .get(&instance)
            .map(|mounted| mounted.bindings.outputs(event).map(|b| b.handler()).collect())
            .unwrap_or_default()
    }

    /// Writes `value` through the two-way field `field`, from the instance side.
    pub fn write_model(&self, instance: InstanceRef, field: &str, value: impl Into<Value>) -> bool {
        let cell = self
            .inner
            .borrow()
            .instances
            .get(&instance)
            .and_then(|mounted| mounted.bindings.two_way(field).map(|b| b.cell().clone()));
        match cell {
            Some(cell) => {
                cell.set(value);
                true
            }
            None => false,
        }
    }

    /// Re-evaluates every field of `instance`.
    #[must_use]
    pub fn render(&self, instance: InstanceRef) -> Option<RenderedInstance> {
        let inner = self.inner.borrow();
        let mounted = inner.instances.get(&instance)?;
        let fields = mounted
            .bindings
            .iter()
            .filter_map(|descriptor| match descriptor {
                BindingDescriptor::Input(b) => Some((b.field().to_string(), b.resolve())),
                BindingDescriptor::TwoWay(b) => Some((b.field().to_string(), b.cell().get())),
                BindingDescriptor::Output(_) => None,
            })
            .collect();
        Some(RenderedInstance {
            kind: mounted.kind,
            fields,
            modules: mounted.modules.iter().map(BehaviorModule::id).collect(),
        })
    }

    #[must_use]
    pub fn is_mounted(&self, instance: InstanceRef) -> bool {
        self.inner.borrow().instances.contains_key(&instance)
    }

    /// Instances of `kind`, oldest first.
    #[must_use]
    pub fn mounted(&self, kind: ComponentKind) -> Vec<InstanceRef> {
        self.inner
            .borrow()
            .instances
            .iter()
            .filter(|(_, mounted)| mounted.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.inner.borrow().counters.create
    }

    #[must_use]
    pub fn destroy_calls(&self) -> usize {
        self.inner.borrow().counters.destroy
    }

    #[must_use]
    pub fn clear_calls(&self) -> usize {
        self.inner.borrow().counters.clear
    }
}

impl MountPoint for MemoryMount {
    fn create(
        &mut self,
        kind: ComponentKind,
        bindings: BindingSet,
        modules: Vec<BehaviorModule>,
    ) -> Result<InstanceRef, InstanceCreationError> {
        let (id, eager_event) = {
            let mut inner = self.inner.borrow_mut();
            inner.counters.create += 1;
            if !inner.accepted.contains(&kind) {
                return Err(InstanceCreationError::UnknownKind(kind));
            }
            if let Some(missing) = kind
                .required_inputs()
                .iter()
                .find(|field| bindings.input(field).is_none())
            {
                return Err(InstanceCreationError::Rejected(format!(
                    "missing required input `{missing}` for {kind}"
                )));
            }

            let id = InstanceRef::from_raw(inner.next_id);
            inner.next_id += 1;
            inner.instances.insert(
                id,
                MountedInstance {
                    kind,
                    bindings,
                    modules,
                },
            );
            (id, inner.emit_on_create.clone())
        };

        if let Some(event) = eager_event {
            self.emit(id, &event, Value::Unit);
        }
        Ok(id)
    }

    fn destroy(&mut self, instance: InstanceRef) -> Result<(), MountError> {
        let farewell = {
            let mut inner = self.inner.borrow_mut();
            inner.counters.destroy += 1;
            if !inner.instances.contains_key(&instance) {
                return Err(MountError::Detached(instance));
            }
            inner.emit_on_destroy.clone()
        };

        if let Some(event) = farewell {
            self.emit(instance, &event, Value::Unit);
        }
        self.inner.borrow_mut().instances.remove(&instance);
        Ok(())
    }

    fn clear(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.counters.clear += 1;
        inner.instances.clear();
    }
}
