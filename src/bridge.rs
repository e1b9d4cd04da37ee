use alloc::string::String;

use crate::{
    BridgeError, BridgeOptions, ItemContext, ListHost, PatchError, RenderEngine, SlotId,
    SlotManager, TemplateRegistry, TemplateScope, select,
};

/// A list instance while its template declarations mount.
///
/// Registration is only possible here. [`ListBuilder::finish`] freezes the registry and
/// returns the interactive [`ListBridge`].
pub struct ListBuilder<T, E: RenderEngine> {
    options: BridgeOptions,
    registry: TemplateRegistry<T, E::Tree>,
    next_generated: usize,
}

impl<T, E: RenderEngine> ListBuilder<T, E>
where
    E::ViewId: Clone,
{
    pub fn new(options: BridgeOptions) -> Self {
        Self {
            options,
            registry: TemplateRegistry::new(),
            next_generated: 0,
        }
    }

    /// The scope handed to child template declarations.
    pub fn scope(&mut self) -> TemplateScope<'_, T, E::Tree> {
        TemplateScope::new(
            &mut self.registry,
            &self.options.default_template,
            &mut self.next_generated,
        )
    }

    pub fn registry(&self) -> &TemplateRegistry<T, E::Tree> {
        &self.registry
    }

    /// Hands the keyed templates to the list control and makes the list interactive.
    pub fn finish(self, host: &mut impl ListHost) -> ListBridge<T, E> {
        ldebug!(templates = self.registry.len(), "ListBuilder::finish");
        host.set_item_templates(self.registry.keyed_templates());
        ListBridge {
            options: self.options,
            registry: self.registry,
            slots: SlotManager::new(),
            failed: None,
        }
    }
}

/// Connects a template registry to a recycling list control.
///
/// For every slot the control needs, the bridge builds the item context, selects a template
/// and patches the slot, all synchronously inside the control's callback.
pub struct ListBridge<T, E: RenderEngine> {
    options: BridgeOptions,
    registry: TemplateRegistry<T, E::Tree>,
    slots: SlotManager<E>,
    failed: Option<String>,
}

impl<T, E: RenderEngine> ListBridge<T, E>
where
    E::ViewId: Clone,
{
    pub fn builder(options: BridgeOptions) -> ListBuilder<T, E> {
        ListBuilder::new(options)
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    pub fn registry(&self) -> &TemplateRegistry<T, E::Tree> {
        &self.registry
    }

    pub fn slots(&self) -> &SlotManager<E> {
        &self.slots
    }

    /// Whether a missing template has made this list unusable.
    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    pub fn context<'a>(&'a self, item: &'a T, index: usize) -> ItemContext<'a, T> {
        ItemContext::build(item, index, &self.options.names)
    }

    /// The template the list control should use for `item` (its pool key).
    pub fn template_for(&self, item: &T, index: usize) -> &str {
        let ctx = self.context(item, index);
        select(&self.registry, &ctx, &self.options.default_template)
    }

    /// Fills a slot for `item` at `index` and returns the native view to display.
    ///
    /// `existing` is the view the control is recycling, if any; its slot is recovered through
    /// the side table. With no view (or one this bridge never produced), a new slot is used; if
    /// the patch fails, that slot is released again.
    pub fn on_slot_needed(
        &mut self,
        engine: &mut E,
        item: &T,
        index: usize,
        existing: Option<&E::View>,
    ) -> Result<E::View, BridgeError<E::Error>> {
        if let Some(name) = &self.failed {
            engine.flush_pending_updates();
            return Err(BridgeError::Failed { name: name.clone() });
        }

        let (slot, fresh) = self.slot_for(engine, existing);
        let ctx = ItemContext::build(item, index, &self.options.names);
        let name = select(&self.registry, &ctx, &self.options.default_template);

        let result = self.slots.patch(engine, &self.registry, name, &ctx, slot);
        if fresh && result.is_err() {
            self.slots.release_unbound(slot);
        }
        match result {
            Ok(view) => Ok(view),
            Err(PatchError::TemplateMissing { name }) => {
                self.failed = Some(name.clone());
                Err(PatchError::TemplateMissing { name }.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The slot to patch, and whether it was allocated for this request.
    fn slot_for(&mut self, engine: &E, existing: Option<&E::View>) -> (SlotId, bool) {
        match existing {
            Some(view) => match self.slots.recover(engine, view) {
                Some(slot) => (slot, false),
                None => {
                    lwarn!("ListBridge: recycled view has no slot, allocating a new one");
                    (self.slots.allocate(), true)
                }
            },
            None => (self.slots.allocate(), true),
        }
    }
}
