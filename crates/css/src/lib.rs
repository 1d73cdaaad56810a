#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod parser;
pub mod selector;
pub mod types;
pub mod values;

pub use parser::{
    parse_declaration_block, parse_selector, parse_stylesheet, parse_stylesheet_with_next,
};
pub use selector::Selector;
pub use types::{Declarations, Rule};
