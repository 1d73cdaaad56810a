//! Host functions a script runtime can call back into.

use anyhow::{Context as _, Result, anyhow};
use css::parse_selector;
use html::{DOM, DOMUpdate, NodeId, parse_fragment};
use log::debug;

use crate::console::Console;
use crate::{NodeHandle, ScriptBridge};

/// The page as seen from a running script.
///
/// Borrowing the document mutably for the lifetime of the host serializes script
/// mutations against layout.
pub struct ScriptHost<'page> {
    bridge: &'page mut ScriptBridge,
    dom: &'page mut DOM,
    reflow_requested: bool,
}

impl<'page> ScriptHost<'page> {
    pub fn new(bridge: &'page mut ScriptBridge, dom: &'page mut DOM) -> Self {
        Self {
            bridge,
            dom,
            reflow_requested: false,
        }
    }

    pub fn dom(&self) -> &DOM {
        self.dom
    }

    pub fn handle_of(&mut self, node: NodeId) -> NodeHandle {
        self.bridge.handle_of(node)
    }

    /// Live node behind `handle`.
    ///
    /// # Errors
    /// Unknown handles and handles to nodes removed from the document.
    pub fn node_of(&self, handle: NodeHandle) -> Result<NodeId> {
        self.bridge
            .node_of(handle)
            .filter(|node| self.dom.contains(*node))
            .ok_or_else(|| anyhow!("handle {} does not refer to a live node", handle.0))
    }

    /// Handles of every element matching `selector`, in document order.
    ///
    /// # Errors
    /// When `selector` does not parse.
    pub fn query_selector_all(&mut self, selector: &str) -> Result<Vec<NodeHandle>> {
        let parsed =
            parse_selector(selector).ok_or_else(|| anyhow!("invalid selector `{selector}`"))?;
        let dom: &DOM = self.dom;
        let matches: Vec<NodeId> = dom
            .elements()
            .filter(|node| parsed.matches(dom, *node))
            .collect();
        debug!("querySelectorAll({selector:?}) matched {}", matches.len());
        Ok(matches
            .into_iter()
            .map(|node| self.bridge.handle_of(node))
            .collect())
    }

    /// # Errors
    /// When `handle` is stale.
    pub fn get_attribute(&self, handle: NodeHandle, name: &str) -> Result<Option<String>> {
        let node = self.node_of(handle)?;
        Ok(self.dom.attribute(node, name).map(str::to_owned))
    }

    /// Replace the children of the element behind `handle` with `markup` parsed as a
    /// body fragment, and ask for a reflow.
    ///
    /// # Errors
    /// When `handle` is stale or refers to a text node.
    pub fn set_inner_html(&mut self, handle: NodeHandle, markup: &str) -> Result<()> {
        let node = self.node_of(handle)?;
        let (fragment, parent) = parse_fragment(markup);
        self.dom
            .apply_update(DOMUpdate::ReplaceChildren {
                node,
                fragment,
                parent,
            })
            .with_context(|| format!("setting innerHTML of handle {}", handle.0))?;
        self.reflow_requested = true;
        Ok(())
    }

    pub fn log(&self, message: &str) {
        Console::log(message);
    }

    /// Whether a host call changed the document since this host was created.
    pub fn reflow_requested(&self) -> bool {
        self.reflow_requested
    }
}
