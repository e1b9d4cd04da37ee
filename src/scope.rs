use alloc::format;
use alloc::string::String;

use crate::{TemplateDeclaration, TemplateRegistry};

/// The registry handle a list passes down to the template declarations beneath it.
///
/// Declarations never see the list itself; they only get a scope. Nested subtrees receive a
/// [`TemplateScope::child`] that registers into the same list.
pub struct TemplateScope<'a, T, N> {
    registry: &'a mut TemplateRegistry<T, N>,
    default_name: &'a str,
    next_generated: &'a mut usize,
}

impl<'a, T, N> TemplateScope<'a, T, N> {
    pub(crate) fn new(
        registry: &'a mut TemplateRegistry<T, N>,
        default_name: &'a str,
        next_generated: &'a mut usize,
    ) -> Self {
        Self {
            registry,
            default_name,
            next_generated,
        }
    }

    pub fn child(&mut self) -> TemplateScope<'_, T, N> {
        TemplateScope {
            registry: &mut *self.registry,
            default_name: self.default_name,
            next_generated: &mut *self.next_generated,
        }
    }

    /// Registers a declaration and returns the name it was registered under.
    ///
    /// Returns `None` when the declaration has nothing to render.
    pub fn declare(&mut self, declaration: TemplateDeclaration<T, N>) -> Option<String> {
        let (name, condition, render) = declaration.into_parts();
        let render = render?;
        let name = match name {
            Some(name) => name,
            None if condition.is_some() => {
                let generated = format!("v-template-{}", *self.next_generated);
                *self.next_generated += 1;
                generated
            }
            None => String::from(self.default_name),
        };
        self.registry.register(name.clone(), condition, render);
        Some(name)
    }

    pub fn registry(&self) -> &TemplateRegistry<T, N> {
        self.registry
    }
}
