/// A declarative UI tree, as produced by a template's render function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for a `label` node with a `text` attribute.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new("label").with_attr("text", text)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Identity of a realized native node. Stable for as long as the node is kept by updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeId(pub(crate) u64);

/// A realized node in the engine's native tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NativeNode {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: NativeId,
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<NativeNode>,
}

impl NativeNode {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The declarative tree this native tree currently shows.
    pub fn shape(&self) -> Node {
        Node {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            children: self.children.iter().map(NativeNode::shape).collect(),
        }
    }

    /// Visits this node and its descendants, depth first.
    pub fn walk(&self, f: &mut impl FnMut(&NativeNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}
