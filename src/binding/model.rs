// SPDX-License-Identifier: MPL-2.0
//! Shared cell behind two-way bindings.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Value;

#[derive(Debug)]
struct ModelState {
    value: Value,
    version: u64,
}

/// A single owned value shared between the host and any number of instances.
///
/// Clones share the same storage: a `set` on one side is immediately visible
/// through every other clone, so neither side has to poll. The version
/// counter increases on every write and lets a renderer skip unchanged cells.
#[derive(Clone)]
pub struct ModelCell {
    state: Rc<RefCell<ModelState>>,
}

impl ModelCell {
    pub fn new(initial: impl Into<Value>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ModelState {
                value: initial.into(),
                version: 0,
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> Value {
        self.state.borrow().value.clone()
    }

    pub fn set(&self, value: impl Into<Value>) {
        let mut state = self.state.borrow_mut();
        state.value = value.into();
        state.version += 1;
    }

    /// Replaces the value with the result of `f` applied to the current one.
    pub fn update(&self, f: impl FnOnce(&Value) -> Value) {
        let next = f(&self.state.borrow().value);
        self.set(next);
    }

    /// Number of writes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    /// Returns true when both cells share storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &ModelCell) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ModelCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ModelCell")
            .field("value", &state.value)
            .field("version", &state.version)
            .finish()
    }
}
