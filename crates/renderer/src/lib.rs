//! Paint commands and the display list handed to a presentation layer.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod color;
pub mod display_list;
mod paint;

pub use display_list::DisplayList;
pub use paint::PaintCommand;
