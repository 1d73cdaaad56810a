//! Arena-backed node tree produced by the parser and consumed by styling and layout.
//!
//! Nodes live in an [`indextree::Arena`]. A parent owns its children in document
//! order; the upward link is an arena index, never an owning reference.

use indextree::{Arena, NodeId};
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub mod printing;
pub mod updating;

/// Resolved style properties of a node, keyed by property name.
pub type StyleMap = BTreeMap<String, String>;

/// Element attributes in source order. Keys are lower-cased and unique.
pub type Attributes = SmallVec<(String, String), 4>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String, attrs: Attributes },
    Text { text: String },
}

#[derive(Debug, Clone)]
pub struct DOMNode {
    pub kind: NodeKind,
    /// Filled in by the cascade; empty until styles are resolved.
    pub style: StyleMap,
}

impl DOMNode {
    pub fn element(tag: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.into(),
                attrs,
            },
            style: StyleMap::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text { text: text.into() },
            style: StyleMap::new(),
        }
    }

    /// Tag name for elements, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_element(&self, name: &str) -> bool {
        self.tag() == Some(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text { .. } => None,
        }
    }
}

/// A whole document: the arena plus its single `html` root.
#[derive(Clone)]
pub struct DOM {
    arena: Arena<DOMNode>,
    root: NodeId,
}

impl DOM {
    /// Create a document holding only an empty `html` root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DOMNode::element("html", Attributes::new()));
        Self { arena, root }
    }

    pub(crate) fn from_parts(arena: Arena<DOMNode>, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` refers to a live node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|node| !node.is_removed())
    }

    pub fn get(&self, id: NodeId) -> Option<&DOMNode> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(indextree::Node::get)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DOMNode> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(indextree::Node::get_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(indextree::Node::parent)
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.ancestors(&self.arena).skip(1)
    }

    /// `id` and all of its descendants in pre-order (document order).
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.descendants(&self.arena)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(DOMNode::tag)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|node| node.attribute(name))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn style(&self, id: NodeId) -> Option<&StyleMap> {
        self.get(id).map(|node| &node.style)
    }

    /// First direct child element of `parent` with the given tag.
    pub fn child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children(parent)
            .find(|child| self.tag(*child) == Some(tag))
    }

    /// All elements in document order, starting at the root.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root)
            .filter(|id| self.tag(*id).is_some())
    }

    /// Number of live nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.descendants(self.root).count()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).next().is_none()
    }

    /// Create a detached node owned by this document's arena.
    pub fn create_node(&mut self, node: DOMNode) -> NodeId {
        self.arena.new_node(node)
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    pub(crate) fn arena_mut(&mut self) -> &mut Arena<DOMNode> {
        &mut self.arena
    }
}

impl Default for DOM {
    fn default() -> Self {
        Self::new()
    }
}
