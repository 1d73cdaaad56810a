#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod cascade;
mod computed_style;
mod ua;

pub use cascade::{INHERITED_PROPERTIES, cascade_order, resolve_styles};
pub use computed_style::{ComputedStyle, StyleError};
pub use ua::ua_stylesheet;
