use listbridge::RenderEngine;

use crate::{NativeId, NativeNode, Node};

/// A render root created by [`TreeEngine::create_container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(usize);

impl RootId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference to the native root view of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeView {
    pub root: RootId,
    pub id: NativeId,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("container {0:?} already holds a view")]
    AlreadyMounted(RootId),
    #[error("container {0:?} has nothing to update")]
    NotMounted(RootId),
    #[error("unknown container {0:?}")]
    UnknownContainer(RootId),
}

#[derive(Debug, Default)]
struct Root {
    realized: Option<NativeNode>,
    staged: Option<NativeNode>,
}

/// A retained-mode engine with batched realization.
///
/// `mount` and `update` reconcile the new tree against the root's latest state and stage the
/// result. The native tree a container shows only changes when
/// [`RenderEngine::flush_pending_updates`] runs.
///
/// Reconciliation is positional: a node with the same tag keeps its native identity and gets
/// its attributes and children patched; a different tag is realized from scratch.
#[derive(Debug, Default)]
pub struct TreeEngine {
    roots: Vec<Root>,
    pending: Vec<RootId>,
    next_id: u64,
    created: usize,
    flushes: usize,
}

impl TreeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The native tree currently shown by `view`'s container, if `view` is still its root.
    pub fn view(&self, view: &NativeView) -> Option<&NativeNode> {
        self.realized(view.root).filter(|node| node.id == view.id)
    }

    pub fn realized(&self, root: RootId) -> Option<&NativeNode> {
        self.roots.get(root.0)?.realized.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of native nodes created so far.
    pub fn created_nodes(&self) -> usize {
        self.created
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn container_count(&self) -> usize {
        self.roots.len()
    }

    fn root_mut(&mut self, id: RootId) -> Result<&mut Root, RenderError> {
        self.roots
            .get_mut(id.0)
            .ok_or(RenderError::UnknownContainer(id))
    }

    fn realize(&mut self, tree: Node) -> NativeNode {
        self.next_id += 1;
        self.created += 1;
        let id = NativeId(self.next_id);
        NativeNode {
            id,
            tag: tree.tag,
            attrs: tree.attrs,
            children: tree
                .children
                .into_iter()
                .map(|child| self.realize(child))
                .collect(),
        }
    }

    fn reconcile(&mut self, old: NativeNode, tree: Node) -> NativeNode {
        if old.tag != tree.tag {
            return self.realize(tree);
        }

        let mut old_children = old.children.into_iter();
        let children = tree
            .children
            .into_iter()
            .map(|child| match old_children.next() {
                Some(prev) => self.reconcile(prev, child),
                None => self.realize(child),
            })
            .collect();

        NativeNode {
            id: old.id,
            tag: old.tag,
            attrs: tree.attrs,
            children,
        }
    }

    fn stage(&mut self, id: RootId, node: NativeNode) -> NativeView {
        let view = NativeView { root: id, id: node.id };
        self.roots[id.0].staged = Some(node);
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
        view
    }
}

impl RenderEngine for TreeEngine {
    type Tree = Node;
    type Container = RootId;
    type View = NativeView;
    type ViewId = NativeId;
    type Error = RenderError;

    fn create_container(&mut self) -> RootId {
        self.roots.push(Root::default());
        RootId(self.roots.len() - 1)
    }

    fn mount(&mut self, tree: Node, container: &mut RootId) -> Result<NativeView, RenderError> {
        let id = *container;
        let root = self.root_mut(id)?;
        if root.realized.is_some() || root.staged.is_some() {
            return Err(RenderError::AlreadyMounted(id));
        }
        let node = self.realize(tree);
        Ok(self.stage(id, node))
    }

    fn update(&mut self, tree: Node, container: &mut RootId) -> Result<NativeView, RenderError> {
        let id = *container;
        let root = self.root_mut(id)?;
        let base = match root.staged.take() {
            Some(staged) => staged,
            None => root.realized.clone().ok_or(RenderError::NotMounted(id))?,
        };
        let node = self.reconcile(base, tree);
        Ok(self.stage(id, node))
    }

    fn flush_pending_updates(&mut self) {
        self.flushes += 1;
        for id in std::mem::take(&mut self.pending) {
            let root = &mut self.roots[id.0];
            if let Some(staged) = root.staged.take() {
                root.realized = Some(staged);
            }
        }
    }

    fn view_id(&self, view: &NativeView) -> NativeId {
        view.id
    }
}
