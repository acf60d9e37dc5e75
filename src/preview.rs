// SPDX-License-Identifier: MPL-2.0
//! Code-like rendering of a creation request.
//!
//! The demo host shows the operator what the last request looked like:
//! which fields were bound how, and which behavior modules were attached.

use std::fmt;

use crate::behavior::BehaviorModule;
use crate::binding::{BindingDescriptor, BindingSet};
use crate::domain::component::ComponentKind;

/// Snapshot of one creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationPreview {
    kind: ComponentKind,
    bindings: Vec<String>,
    modules: Vec<String>,
}

impl CreationPreview {
    /// Captures `bindings` and `modules`. Inputs are resolved once, at
    /// capture time.
    #[must_use]
    pub fn capture(kind: ComponentKind, bindings: &BindingSet, modules: &[BehaviorModule]) -> Self {
        let bindings = bindings
            .iter()
            .map(|descriptor| match descriptor {
                BindingDescriptor::Input(b) => format!("input('{}', {})", b.field(), b.resolve()),
                BindingDescriptor::TwoWay(b) => {
                    format!("twoWay('{}', {})", b.field(), b.cell().get())
                }
                BindingDescriptor::Output(b) => format!("output('{}')", b.event()),
            })
            .collect();
        let modules = modules
            .iter()
            .map(|module| match module.config() {
                Some(config) => format!("{} {config}", module.id()),
                None => module.id().to_string(),
            })
            .collect();
        Self {
            kind,
            bindings,
            modules,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }
}

impl fmt::Display for CreationPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "create({}, {{", self.kind)?;
        writeln!(f, "  bindings: [")?;
        for binding in &self.bindings {
            writeln!(f, "    {binding},")?;
        }
        writeln!(f, "  ],")?;
        writeln!(f, "  modules: [{}],", self.modules.join(", "))?;
        write!(f, "}})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ModelCell;

    #[test]
    fn renders_every_binding_kind() {
        let bindings = BindingSet::try_from_descriptors([
            BindingDescriptor::constant("title", "Sample Widget").expect("valid"),
            BindingDescriptor::two_way("collapsed", ModelCell::new(false)).expect("valid"),
            BindingDescriptor::output("closed", |_| {}).expect("valid"),
        ])
        .expect("valid set");
        let modules = [BehaviorModule::hover_effect(), BehaviorModule::pulse_animation(5000)];

        let preview = CreationPreview::capture(ComponentKind::Widget, &bindings, &modules);
        let expected = "\
create(widget, {
  bindings: [
    input('title', 'Sample Widget'),
    twoWay('collapsed', false),
    output('closed'),
  ],
  modules: [hover-effect, pulse-animation { intervalMs: 5000 }],
})";
        assert_eq!(preview.to_string(), expected);
    }

    #[test]
    fn no_modules_renders_empty_list() {
        let preview =
            CreationPreview::capture(ComponentKind::Notification, &BindingSet::new(), &[]);
        assert!(preview.to_string().contains("modules: [],"));
    }
}
