// SPDX-License-Identifier: MPL-2.0
//! Inputs of the two component shapes.
//!
//! [`ShapeInputs`] is the generic, unvalidated list of fields a caller wants
//! bound. [`WidgetSpec`] and [`NotificationSpec`] are typed presets that lower
//! into it. Validation happens when the orchestrator turns the inputs into a
//! [`BindingSet`](crate::binding::BindingSet).

use std::rc::Rc;

use crate::binding::{BindingDescriptor, InputBinding, ModelCell, Resolver, TwoWayBinding, Value};
use crate::domain::ui::DismissDuration;
use crate::error::InvalidBindingError;

/// Field names shared by the orchestrator and the shapes.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const MESSAGE: &str = "message";
    pub const TYPE: &str = "type";
    pub const COLLAPSED: &str = "collapsed";
    pub const AUTO_DISMISS: &str = "autoDismiss";
    pub const DURATION: &str = "duration";
}

/// Event names emitted by the shapes.
pub mod events {
    pub const CLOSED: &str = "closed";
    pub const ACTION_PERFORMED: &str = "actionPerformed";
}

#[derive(Clone)]
enum InputSource {
    Dynamic(Resolver),
    Model(ModelCell),
}

/// Fields to bind on a new instance, in declaration order.
#[derive(Clone, Default)]
pub struct ShapeInputs {
    entries: Vec<(String, InputSource)>,
}

impl ShapeInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to a producer re-evaluated on every render.
    #[must_use]
    pub fn with_input(mut self, field: impl Into<String>, resolve: impl Fn() -> Value + 'static) -> Self {
        self.entries
            .push((field.into(), InputSource::Dynamic(Rc::new(resolve))));
        self
    }

    /// Binds `field` to a fixed value.
    #[must_use]
    pub fn with_value(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.with_input(field, move || value.clone())
    }

    /// Binds `field` in both directions through `cell`.
    #[must_use]
    pub fn with_model(mut self, field: impl Into<String>, cell: ModelCell) -> Self {
        self.entries.push((field.into(), InputSource::Model(cell)));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowers every entry into a descriptor, rejecting empty names.
    pub fn into_descriptors(self) -> Result<Vec<BindingDescriptor>, InvalidBindingError> {
        self.entries
            .into_iter()
            .map(|(field, source)| match source {
                InputSource::Dynamic(resolve) => {
                    InputBinding::from_resolver(field, resolve).map(BindingDescriptor::Input)
                }
                InputSource::Model(cell) => {
                    TwoWayBinding::new(field, cell).map(BindingDescriptor::TwoWay)
                }
            })
            .collect()
    }
}

/// Color scheme of a widget card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetVariant {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl WidgetVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetVariant::Info => "info",
            WidgetVariant::Success => "success",
            WidgetVariant::Warning => "warning",
            WidgetVariant::Danger => "danger",
        }
    }
}

/// Color scheme of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationVariant {
    Primary,
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl NotificationVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationVariant::Primary => "primary",
            NotificationVariant::Info => "info",
            NotificationVariant::Success => "success",
            NotificationVariant::Warning => "warning",
            NotificationVariant::Danger => "danger",
        }
    }
}

/// Inputs of a widget card.
#[derive(Debug, Clone)]
pub struct WidgetSpec {
    pub title: String,
    pub description: String,
    pub variant: WidgetVariant,
    /// Shared collapse state. Every widget given the same cell folds together.
    pub collapsed: Option<ModelCell>,
}

impl WidgetSpec {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: WidgetVariant::default(),
            collapsed: None,
        }
    }

    /// Widget number `n` of the session, with the standard description.
    pub fn numbered(title: impl Into<String>, n: u64) -> Self {
        Self::new(
            title,
            format!("This is widget #{n}, created at runtime with declarative bindings."),
        )
    }

    #[must_use]
    pub fn variant(mut self, variant: WidgetVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn collapsed(mut self, cell: ModelCell) -> Self {
        self.collapsed = Some(cell);
        self
    }
}

impl From<WidgetSpec> for ShapeInputs {
    fn from(spec: WidgetSpec) -> Self {
        let inputs = ShapeInputs::new()
            .with_value(fields::TITLE, spec.title)
            .with_value(fields::DESCRIPTION, spec.description)
            .with_value(fields::TYPE, spec.variant.as_str());
        match spec.collapsed {
            Some(cell) => inputs.with_model(fields::COLLAPSED, cell),
            None => inputs,
        }
    }
}

/// Inputs of a notification banner.
#[derive(Debug, Clone)]
pub struct NotificationSpec {
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
    pub auto_dismiss: bool,
    pub duration: DismissDuration,
}

impl NotificationSpec {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: NotificationVariant::default(),
            auto_dismiss: true,
            duration: DismissDuration::default(),
        }
    }

    /// Notification number `n` of the session, announcing its own lifetime.
    pub fn numbered(title: impl Into<String>, n: u64, duration: DismissDuration) -> Self {
        Self {
            duration,
            ..Self::new(
                title,
                format!(
                    "This is notification #{n}. It will auto-dismiss in {} seconds unless you close it manually.",
                    duration.whole_seconds()
                ),
            )
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: NotificationVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn auto_dismiss(mut self, enabled: bool) -> Self {
        self.auto_dismiss = enabled;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: DismissDuration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<NotificationSpec> for ShapeInputs {
    fn from(spec: NotificationSpec) -> Self {
        ShapeInputs::new()
            .with_value(fields::TITLE, spec.title)
            .with_value(fields::MESSAGE, spec.message)
            .with_value(fields::TYPE, spec.variant.as_str())
            .with_value(fields::AUTO_DISMISS, spec.auto_dismiss)
            .with_value(fields::DURATION, spec.duration.millis())
    }
}
