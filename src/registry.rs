use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{Condition, KeyedTemplate, RenderFn, TemplateDescriptor, TemplateNotFound};

/// The templates declared for one list instance, in registration order.
///
/// Written only while the list mounts; read-only once the list is interactive.
pub struct TemplateRegistry<T, N> {
    templates: Vec<TemplateDescriptor<T, N>>,
}

impl<T, N> TemplateRegistry<T, N> {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Adds a template, or replaces the one registered under the same name.
    ///
    /// A replaced template keeps its original position in the selection order.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        condition: Option<Condition<T>>,
        render: RenderFn<T, N>,
    ) {
        let descriptor = TemplateDescriptor {
            name: name.into(),
            condition,
            render,
        };

        match self
            .templates
            .iter_mut()
            .find(|t| t.name == descriptor.name)
        {
            Some(slot) => {
                ldebug!(name = %descriptor.name, "TemplateRegistry: replacing template");
                *slot = descriptor;
            }
            None => {
                ldebug!(
                    name = %descriptor.name,
                    conditional = descriptor.condition.is_some(),
                    "TemplateRegistry: registering template"
                );
                self.templates.push(descriptor);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t.name == name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    /// One keyed identity per template, in registration order.
    pub fn keyed_templates(&self) -> Vec<KeyedTemplate> {
        self.templates.iter().map(|t| t.keyed_template()).collect()
    }

    pub fn keyed_template(&self, name: &str) -> Option<KeyedTemplate> {
        self.find(name).map(|t| t.keyed_template())
    }

    pub fn get(&self, name: &str) -> Result<&TemplateDescriptor<T, N>, TemplateNotFound> {
        self.find(name).ok_or_else(|| TemplateNotFound {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor<T, N>> {
        self.templates.iter()
    }

    fn find(&self, name: &str) -> Option<&TemplateDescriptor<T, N>> {
        self.templates.iter().find(|t| t.name == name)
    }
}

impl<T, N> Default for TemplateRegistry<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, N> core::fmt::Debug for TemplateRegistry<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.templates.iter()).finish()
    }
}
