use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::key::ViewSlotMap;
use crate::{ItemContext, PatchError, RenderEngine, TemplateRegistry};

/// Handle to one physical slot owned by a [`SlotManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One recyclable slot of the list control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewSlot<C> {
    /// No render container yet.
    Empty,
    /// Holds the container last patched with `template`.
    Bound { container: C, template: String },
}

impl<C> ViewSlot<C> {
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }

    pub fn container(&self) -> Option<&C> {
        match self {
            Self::Empty => None,
            Self::Bound { container, .. } => Some(container),
        }
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Bound { template, .. } => Some(template),
        }
    }
}

struct SlotEntry<C, V> {
    slot: ViewSlot<C>,
    view_id: Option<V>,
}

/// Owns the slot records and the native-view → slot side table.
///
/// Slots move `Empty -> Bound` on their first patch and stay `Bound` from then on; they are
/// never torn down here. Disposing of the pool is the list control's business.
pub struct SlotManager<E: RenderEngine> {
    slots: Vec<SlotEntry<E::Container, E::ViewId>>,
    by_view: ViewSlotMap<E::ViewId>,
}

impl<E: RenderEngine> SlotManager<E>
where
    E::ViewId: Clone,
{
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_view: ViewSlotMap::new(),
        }
    }

    /// Creates a new, empty slot.
    pub fn allocate(&mut self) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(SlotEntry {
            slot: ViewSlot::Empty,
            view_id: None,
        });
        ltrace!(slot = id.0, "SlotManager: allocated slot");
        id
    }

    /// Drops `id` again if it is the most recently allocated slot and was never bound.
    ///
    /// Returns whether the slot was removed.
    pub fn release_unbound(&mut self, id: SlotId) -> bool {
        let is_last_empty = id.0 + 1 == self.slots.len()
            && self.slots.last().is_some_and(|e| !e.slot.is_bound());
        if is_last_empty {
            self.slots.pop();
            ltrace!(slot = id.0, "SlotManager: released unbound slot");
        }
        is_last_empty
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, id: SlotId) -> Option<&ViewSlot<E::Container>> {
        self.slots.get(id.0).map(|e| &e.slot)
    }

    /// Recovers the slot that produced `view`.
    pub fn recover(&self, engine: &E, view: &E::View) -> Option<SlotId> {
        self.by_view.get(&engine.view_id(view)).copied()
    }

    /// Renders `name` for `ctx` into the slot and returns the native view.
    ///
    /// An empty slot gets a fresh container (mount); a bound slot re-renders into its existing
    /// container (update). Pending engine work is flushed before this returns, on every path.
    pub fn patch<T>(
        &mut self,
        engine: &mut E,
        registry: &TemplateRegistry<T, E::Tree>,
        name: &str,
        ctx: &ItemContext<'_, T>,
        id: SlotId,
    ) -> Result<E::View, PatchError<E::Error>> {
        let result = self.patch_unflushed(engine, registry, name, ctx, id);
        engine.flush_pending_updates();
        result
    }

    fn patch_unflushed<T>(
        &mut self,
        engine: &mut E,
        registry: &TemplateRegistry<T, E::Tree>,
        name: &str,
        ctx: &ItemContext<'_, T>,
        id: SlotId,
    ) -> Result<E::View, PatchError<E::Error>> {
        let Ok(descriptor) = registry.get(name) else {
            lwarn!(name, "SlotManager: template missing");
            return Err(PatchError::TemplateMissing {
                name: name.to_string(),
            });
        };
        let entry = self.slots.get_mut(id.0).ok_or(PatchError::UnknownSlot(id.0))?;
        let tree = descriptor.render(ctx);

        let view = match &mut entry.slot {
            ViewSlot::Empty => {
                ltrace!(slot = id.0, name, index = ctx.index(), "SlotManager: first render");
                let mut container = engine.create_container();
                let view = engine
                    .mount(tree, &mut container)
                    .map_err(PatchError::Render)?;
                entry.slot = ViewSlot::Bound {
                    container,
                    template: name.to_string(),
                };
                view
            }
            ViewSlot::Bound {
                container,
                template,
            } => {
                ltrace!(slot = id.0, name, index = ctx.index(), "SlotManager: reuse");
                let view = engine.update(tree, container).map_err(PatchError::Render)?;
                if template.as_str() != name {
                    *template = name.to_string();
                }
                view
            }
        };

        let view_id = engine.view_id(&view);
        if entry.view_id.as_ref() != Some(&view_id) {
            if let Some(old) = entry.view_id.take() {
                self.by_view.remove(&old);
            }
            self.by_view.insert(view_id.clone(), id);
            entry.view_id = Some(view_id);
        }
        Ok(view)
    }
}

impl<E: RenderEngine> Default for SlotManager<E>
where
    E::ViewId: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RenderEngine> core::fmt::Debug for SlotManager<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlotManager")
            .field("slots", &self.slots.len())
            .field("bound", &self.slots.iter().filter(|e| e.slot.is_bound()).count())
            .finish()
    }
}
