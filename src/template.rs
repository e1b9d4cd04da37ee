use alloc::string::String;
use alloc::sync::Arc;

use crate::{ConditionError, ItemContext};

/// A precompiled template condition.
///
/// Returning an error (or, with `std`, panicking) counts as "does not match".
pub type Condition<T> =
    Arc<dyn Fn(&ItemContext<'_, T>) -> Result<bool, ConditionError> + Send + Sync>;

/// A template render function producing a UI tree root for one item.
pub type RenderFn<T, N> = Arc<dyn Fn(&ItemContext<'_, T>) -> N + Send + Sync>;

/// A named template: how to render an item, and optionally when it applies.
///
/// Descriptors are immutable once registered.
pub struct TemplateDescriptor<T, N> {
    pub(crate) name: String,
    pub(crate) condition: Option<Condition<T>>,
    pub(crate) render: RenderFn<T, N>,
}

impl<T, N> TemplateDescriptor<T, N> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn condition(&self) -> Option<&Condition<T>> {
        self.condition.as_ref()
    }

    pub fn render(&self, ctx: &ItemContext<'_, T>) -> N {
        (self.render)(ctx)
    }

    pub fn keyed_template(&self) -> KeyedTemplate {
        KeyedTemplate::new(self.name.clone())
    }
}

impl<T, N> Clone for TemplateDescriptor<T, N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            condition: self.condition.clone(),
            render: Arc::clone(&self.render),
        }
    }
}

impl<T, N> core::fmt::Debug for TemplateDescriptor<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("name", &self.name)
            .field("has_condition", &self.condition.is_some())
            .finish_non_exhaustive()
    }
}

/// The identity a recycling list control uses to tag its slot pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyedTemplate {
    pub key: String,
}

impl KeyedTemplate {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A child template declaration, registered into the enclosing list at mount time.
///
/// Name resolution happens in [`crate::TemplateScope::declare`]: an explicit name wins;
/// a conditional template without one is named `v-template-<n>`; anything else is the
/// default template.
pub struct TemplateDeclaration<T, N> {
    name: Option<String>,
    condition: Option<Condition<T>>,
    render: Option<RenderFn<T, N>>,
}

impl<T, N> TemplateDeclaration<T, N> {
    pub fn new() -> Self {
        Self {
            name: None,
            condition: None,
            render: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a condition that cannot fail.
    pub fn with_if(
        mut self,
        condition: impl Fn(&ItemContext<'_, T>) -> bool + Send + Sync + 'static,
    ) -> Self
    where
        T: 'static,
    {
        self.condition = Some(Arc::new(
            move |ctx: &ItemContext<'_, T>| -> Result<bool, ConditionError> { Ok(condition(ctx)) },
        ));
        self
    }

    pub fn with_condition(
        mut self,
        condition: impl Fn(&ItemContext<'_, T>) -> Result<bool, ConditionError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn with_render(
        mut self,
        render: impl Fn(&ItemContext<'_, T>) -> N + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Option<String>, Option<Condition<T>>, Option<RenderFn<T, N>>) {
        (self.name, self.condition, self.render)
    }
}

impl<T, N> Default for TemplateDeclaration<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
