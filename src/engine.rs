use alloc::vec::Vec;

use crate::{KeyedTemplate, ViewKey};

/// The declarative rendering engine the bridge renders templates with.
///
/// Structural diffing lives entirely behind [`RenderEngine::update`].
///
/// Engines may batch work internally, but the list control reads the returned view as soon
/// as the bridge returns. [`crate::ListBridge`] (through [`crate::SlotManager::patch`]) is the
/// caller obliged to call [`RenderEngine::flush_pending_updates`] before handing a view back.
pub trait RenderEngine {
    /// A UI tree root produced by a template's render function.
    type Tree;
    /// A render root that a tree is mounted into and later re-rendered into.
    type Container;
    /// A reference to the realized native view.
    type View: Clone;
    /// A stable identity for a native view, used to recover the slot it belongs to.
    type ViewId: ViewKey;
    type Error;

    fn create_container(&mut self) -> Self::Container;

    /// First render of `tree` into an empty container.
    fn mount(
        &mut self,
        tree: Self::Tree,
        container: &mut Self::Container,
    ) -> Result<Self::View, Self::Error>;

    /// Re-render `tree` into a container that already holds a view.
    fn update(
        &mut self,
        tree: Self::Tree,
        container: &mut Self::Container,
    ) -> Result<Self::View, Self::Error>;

    /// Drains all deferred work now, synchronously.
    fn flush_pending_updates(&mut self);

    fn view_id(&self, view: &Self::View) -> Self::ViewId;
}

/// The recycling list control, as seen from the bridge while the list mounts.
pub trait ListHost {
    /// Receives one keyed identity per registered template, used to tag the slot pool.
    fn set_item_templates(&mut self, templates: Vec<KeyedTemplate>);
}
