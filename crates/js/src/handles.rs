use std::collections::HashMap;

use html::NodeId;
use log::trace;

use crate::NodeHandle;

/// Two-way table between document nodes and the integer handles scripts hold.
///
/// Handles are minted in order of first use, starting at 0, and are only valid for
/// the document they were minted for. Call [`ScriptBridge::reset`] when a new
/// document is loaded.
#[derive(Debug, Default)]
pub struct ScriptBridge {
    node_to_handle: HashMap<NodeId, NodeHandle>,
    handle_to_node: Vec<NodeId>,
}

impl ScriptBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `node`, minting one on first use.
    pub fn handle_of(&mut self, node: NodeId) -> NodeHandle {
        if let Some(handle) = self.node_to_handle.get(&node) {
            return *handle;
        }
        let handle = NodeHandle(self.handle_to_node.len() as u64);
        trace!("minted handle {handle:?} for {node:?}");
        self.handle_to_node.push(node);
        self.node_to_handle.insert(node, handle);
        handle
    }

    pub fn node_of(&self, handle: NodeHandle) -> Option<NodeId> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|index| self.handle_to_node.get(index))
            .copied()
    }

    /// Forget every handle.
    pub fn reset(&mut self) {
        self.node_to_handle.clear();
        self.handle_to_node.clear();
    }

    /// Number of handles minted for the current document.
    pub fn len(&self) -> usize {
        self.handle_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handle_to_node.is_empty()
    }
}
