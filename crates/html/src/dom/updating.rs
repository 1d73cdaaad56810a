//! In-place mutation of a parsed document.
//!
//! The scripting bridge and the page's input handling never rebuild the tree; they
//! describe each edit as a [`DOMUpdate`] and apply it here. Styles and boxes are
//! recomputed wholesale by the next reflow, so nothing else needs notifying.

use super::{DOM, DOMNode, NodeKind};
use anyhow::{Error, anyhow};
use indextree::NodeId;
use log::trace;

#[derive(Debug, Clone)]
pub enum DOMUpdate {
    /// Set (or overwrite) an attribute on an element.
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    /// Replace every child of `node` with copies of `parent`'s children in `fragment`.
    ReplaceChildren {
        node: NodeId,
        fragment: DOM,
        parent: NodeId,
    },
}

impl DOM {
    /// Apply a single update. Fails when the target node is gone or is not an element.
    pub fn apply_update(&mut self, update: DOMUpdate) -> Result<(), Error> {
        match update {
            DOMUpdate::SetAttr { node, name, value } => self.set_attribute(node, &name, value),
            DOMUpdate::ReplaceChildren {
                node,
                fragment,
                parent,
            } => {
                let copies: Vec<NodeId> = fragment
                    .children(parent)
                    .map(|child| self.import_subtree(&fragment, child))
                    .collect();
                self.replace_children(node, copies)
            }
        }
    }

    /// Set an attribute, lower-casing the name. Last write wins.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: String) -> Result<(), Error> {
        let name = name.to_ascii_lowercase();
        let target = self
            .get_mut(node)
            .ok_or_else(|| anyhow!("set_attribute on a removed node"))?;
        let NodeKind::Element { attrs, .. } = &mut target.kind else {
            return Err(anyhow!("set_attribute on a text node"));
        };
        trace!("set attribute {name}={value:?}");
        if let Some(slot) = attrs.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            attrs.push((name, value));
        }
        Ok(())
    }

    /// Remove the old children of `node` (and their subtrees) and adopt `children` in order.
    pub fn replace_children(&mut self, node: NodeId, children: Vec<NodeId>) -> Result<(), Error> {
        if self.tag(node).is_none() {
            return Err(anyhow!("replace_children target is not a live element"));
        }
        let old: Vec<NodeId> = self.children(node).collect();
        for child in old {
            child.remove_subtree(self.arena_mut());
        }
        for child in children {
            self.append_child(node, child);
        }
        Ok(())
    }

    /// Deep-copy `node` from `other` into this document's arena, returning the detached copy.
    /// Styles are not copied; they are recomputed on the next reflow.
    pub fn import_subtree(&mut self, other: &Self, node: NodeId) -> NodeId {
        let kind = other
            .get(node)
            .map_or_else(|| NodeKind::Text { text: String::new() }, |src| src.kind.clone());
        let copy = self.create_node(DOMNode {
            kind,
            style: super::StyleMap::new(),
        });
        let children: Vec<NodeId> = other.children(node).collect();
        for child in children {
            let child_copy = self.import_subtree(other, child);
            copy.append(child_copy, self.arena_mut());
        }
        copy
    }
}
