// SPDX-License-Identifier: MPL-2.0
//! Binding descriptors and request-level validation.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use super::{ModelCell, Value};
use crate::error::InvalidBindingError;

/// Pull-based producer of an input value.
///
/// Producers must be free of side effects: mount points call them on every
/// render, not once.
pub type Resolver = Rc<dyn Fn() -> Value>;

/// Callback invoked with the payload of an emitted event.
pub type Handler = Rc<dyn Fn(&Value)>;

/// One-way host to instance binding.
#[derive(Clone)]
pub struct InputBinding {
    field: String,
    resolve: Resolver,
}

impl InputBinding {
    pub fn new(
        field: impl Into<String>,
        resolve: impl Fn() -> Value + 'static,
    ) -> Result<Self, InvalidBindingError> {
        Self::from_resolver(field, Rc::new(resolve))
    }

    pub fn from_resolver(
        field: impl Into<String>,
        resolve: Resolver,
    ) -> Result<Self, InvalidBindingError> {
        let field = field.into();
        if field.is_empty() {
            return Err(InvalidBindingError::EmptyField);
        }
        Ok(Self { field, resolve })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluates the producer.
    #[must_use]
    pub fn resolve(&self) -> Value {
        (self.resolve)()
    }
}

/// Instance to host event binding.
#[derive(Clone)]
pub struct OutputBinding {
    event: String,
    handle: Handler,
}

impl OutputBinding {
    pub fn new(
        event: impl Into<String>,
        handle: impl Fn(&Value) + 'static,
    ) -> Result<Self, InvalidBindingError> {
        Self::from_handler(event, Rc::new(handle))
    }

    pub fn from_handler(
        event: impl Into<String>,
        handle: Handler,
    ) -> Result<Self, InvalidBindingError> {
        let event = event.into();
        if event.is_empty() {
            return Err(InvalidBindingError::EmptyEvent);
        }
        Ok(Self { event, handle })
    }

    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns a shared reference to the handler so it can be invoked after
    /// any borrow on the owner has been released.
    #[must_use]
    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handle)
    }

    pub fn emit(&self, payload: &Value) {
        (self.handle)(payload);
    }
}

/// Field shared in both directions through a [`ModelCell`].
#[derive(Clone)]
pub struct TwoWayBinding {
    field: String,
    cell: ModelCell,
}

impl TwoWayBinding {
    pub fn new(field: impl Into<String>, cell: ModelCell) -> Result<Self, InvalidBindingError> {
        let field = field.into();
        if field.is_empty() {
            return Err(InvalidBindingError::EmptyField);
        }
        Ok(Self { field, cell })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn cell(&self) -> &ModelCell {
        &self.cell
    }
}

/// How one field or event of an instance is wired to the host.
#[derive(Clone)]
pub enum BindingDescriptor {
    Input(InputBinding),
    Output(OutputBinding),
    TwoWay(TwoWayBinding),
}

impl BindingDescriptor {
    pub fn input(
        field: impl Into<String>,
        resolve: impl Fn() -> Value + 'static,
    ) -> Result<Self, InvalidBindingError> {
        InputBinding::new(field, resolve).map(Self::Input)
    }

    /// Input whose producer always yields the same value.
    pub fn constant(
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, InvalidBindingError> {
        let value = value.into();
        Self::input(field, move || value.clone())
    }

    pub fn output(
        event: impl Into<String>,
        handle: impl Fn(&Value) + 'static,
    ) -> Result<Self, InvalidBindingError> {
        OutputBinding::new(event, handle).map(Self::Output)
    }

    pub fn two_way(field: impl Into<String>, cell: ModelCell) -> Result<Self, InvalidBindingError> {
        TwoWayBinding::new(field, cell).map(Self::TwoWay)
    }

    /// The bound field, for inputs and two-way bindings.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Input(b) => Some(b.field()),
            Self::TwoWay(b) => Some(b.field()),
            Self::Output(_) => None,
        }
    }

    /// The bound event, for outputs.
    #[must_use]
    pub fn event(&self) -> Option<&str> {
        match self {
            Self::Output(b) => Some(b.event()),
            _ => None,
        }
    }
}

impl fmt::Debug for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(b) => f.debug_tuple("Input").field(&b.field).finish(),
            Self::Output(b) => f.debug_tuple("Output").field(&b.event).finish(),
            Self::TwoWay(b) => f
                .debug_tuple("TwoWay")
                .field(&b.field)
                .field(&b.cell)
                .finish(),
        }
    }
}

/// Validated, ordered bindings of one creation request.
///
/// Every input and two-way field appears at most once. Several outputs may
/// listen to the same event.
#[derive(Debug, Clone, Default)]
pub struct BindingSet {
    descriptors: Vec<BindingDescriptor>,
    fields: HashSet<String>,
}

impl BindingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor, rejecting a field that is already bound.
    pub fn push(&mut self, descriptor: BindingDescriptor) -> Result<(), InvalidBindingError> {
        if let Some(field) = descriptor.field() {
            if !self.fields.insert(field.to_string()) {
                return Err(InvalidBindingError::DuplicateField(field.to_string()));
            }
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn try_from_descriptors(
        descriptors: impl IntoIterator<Item = BindingDescriptor>,
    ) -> Result<Self, InvalidBindingError> {
        let mut set = Self::new();
        for descriptor in descriptors {
            set.push(descriptor)?;
        }
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BindingDescriptor> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Finds the input binding for `field`.
    #[must_use]
    pub fn input(&self, field: &str) -> Option<&InputBinding> {
        self.descriptors.iter().find_map(|d| match d {
            BindingDescriptor::Input(b) if b.field() == field => Some(b),
            _ => None,
        })
    }

    /// Finds the two-way binding for `field`.
    #[must_use]
    pub fn two_way(&self, field: &str) -> Option<&TwoWayBinding> {
        self.descriptors.iter().find_map(|d| match d {
            BindingDescriptor::TwoWay(b) if b.field() == field => Some(b),
            _ => None,
        })
    }

    /// All outputs listening to `event`, in declaration order.
    pub fn outputs<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a OutputBinding> + 'a {
        self.descriptors.iter().filter_map(move |d| match d {
            BindingDescriptor::Output(b) if b.event() == event => Some(b),
            _ => None,
        })
    }
}
