#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]
#![allow(
    clippy::string_slice,
    reason = "Slices are taken at ASCII delimiters found by str::find"
)]

pub mod dom;
pub mod parser;

pub use dom::updating::DOMUpdate;
pub use dom::{Attributes, DOM, DOMNode, NodeKind, StyleMap};
pub use indextree::NodeId;
pub use parser::{parse_fragment, parse_html};
