#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

use css::Rule;
use html::DOM;
use log::debug;
use renderer::PaintCommand;
use style_engine::resolve_styles;
use text::FontCache;
use tracing::info_span;

mod block;
mod error;
mod inline;
pub mod layout_box;
mod paint;
mod printing;

pub use block::{BLOCK_ELEMENTS, LayoutMode, NON_RENDERED, REPLACED, is_rendered, layout_mode};
pub use error::LayoutError;
pub use hit_test::{hit_test, node_at};
pub use inline::LEADING;
pub use layout_box::{
    BlockBox, BlockContents, BoxRef, DocumentBox, InlineBox, InputBox, LineBox, Rect, TextBox,
};
pub use paint::paint;

use block::{LayoutContext, layout_block};

/// Fixed page geometry that does not come from CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub margin_x: f32,
    pub margin_y: f32,
    /// Width of every `input` and `button` box.
    pub input_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 13.0,
            margin_y: 18.0,
            input_width: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Lay out a styled document and paint it.
///
/// Every node must carry a resolved style map (see [`style_engine::resolve_styles`]).
///
/// # Errors
/// [`LayoutError::Style`] when a node's style cannot be used. No partial layout is returned.
pub fn layout(
    dom: &DOM,
    viewport: Viewport,
    fonts: &FontCache,
    config: &LayoutConfig,
) -> Result<(DocumentBox, Vec<PaintCommand>), LayoutError> {
    let _span = info_span!("layouter.layout").entered();
    let ctx = LayoutContext { dom, fonts, config };
    let x = config.margin_x;
    let y = config.margin_y;
    let width = viewport.width - 2.0 * config.margin_x;
    let child = layout_block(&ctx, dom.root(), x, y, width)?;
    let document = DocumentBox {
        rect: Rect::new(x, y, width, child.rect.height),
        node: dom.root(),
        child,
    };
    let commands = paint(&document);
    debug!(
        "layout: document height {} with {} paint commands",
        document.rect.height,
        commands.len()
    );
    Ok((document, commands))
}

/// Cascade `rules` over `dom`, then lay it out.
///
/// # Errors
/// See [`layout`].
pub fn render(
    dom: &mut DOM,
    rules: &[Rule],
    viewport: Viewport,
    fonts: &FontCache,
    config: &LayoutConfig,
) -> Result<(DocumentBox, Vec<PaintCommand>), LayoutError> {
    resolve_styles(dom, rules);
    layout(dom, viewport, fonts, config)
}
