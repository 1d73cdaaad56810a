//! Engine-agnostic scripting bridge.
//!
//! A [`ScriptRuntime`] evaluates page scripts and dispatches events. It reaches the
//! document only through a [`ScriptHost`], which hands out integer [`NodeHandle`]s
//! from the page's [`ScriptBridge`] instead of node references.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

use std::fmt;

use anyhow::Result;
use log::debug;

pub mod console;
mod handles;
mod host;

pub use console::Console;
pub use handles::ScriptBridge;
pub use host::ScriptHost;

/// A node as scripts see it. Only meaningful for the document it was minted for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeHandle(pub u64);

/// Events the page forwards to scripts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EventKind {
    Click,
    Keydown,
    Submit,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Keydown => "keydown",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A per-page script engine.
pub trait ScriptRuntime: Send {
    /// Evaluate a classic script fetched from `url`.
    ///
    /// # Errors
    /// Syntax and uncaught runtime errors of the script.
    fn run(&mut self, host: &mut ScriptHost<'_>, source: &str, url: &str) -> Result<()>;

    /// Dispatch `event` at `target`. Returns `true` when a listener prevented the
    /// default action.
    ///
    /// # Errors
    /// Uncaught errors thrown by listeners.
    fn dispatch_event(
        &mut self,
        host: &mut ScriptHost<'_>,
        target: NodeHandle,
        event: EventKind,
    ) -> Result<bool>;
}

/// Runtime for pages browsed without a script engine: scripts are skipped and no
/// listener ever cancels an event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRuntime;

impl ScriptRuntime for NullRuntime {
    fn run(&mut self, _host: &mut ScriptHost<'_>, source: &str, url: &str) -> Result<()> {
        debug!("no script engine, skipping {url} ({} bytes)", source.len());
        Ok(())
    }

    fn dispatch_event(
        &mut self,
        _host: &mut ScriptHost<'_>,
        _target: NodeHandle,
        _event: EventKind,
    ) -> Result<bool> {
        Ok(false)
    }
}
