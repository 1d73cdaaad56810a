//! Block layout: stacking children vertically, width and x from the parent.

use html::{DOM, NodeId};
use log::trace;
use style_engine::ComputedStyle;
use text::{FontCache, FontHandle};

use crate::error::LayoutError;
use crate::inline::LineBreaker;
use crate::layout_box::{BlockBox, BlockContents, Rect};
use crate::LayoutConfig;

/// Elements that force their parent into block mode.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "html", "body", "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5", "h6",
    "hgroup", "header", "footer", "address", "p", "hr", "pre", "blockquote", "ol", "ul", "menu",
    "li", "dl", "dt", "dd", "figure", "figcaption", "main", "div", "table", "form", "fieldset",
    "legend", "details", "summary",
];

/// Elements that never produce boxes.
pub const NON_RENDERED: &[&str] = &["head", "script", "style", "title", "meta", "link"];

/// Atomic inline elements.
pub const REPLACED: &[&str] = &["input", "button"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Block,
    Inline,
}

pub fn layout_mode(dom: &DOM, node: NodeId) -> LayoutMode {
    let Some(tag) = dom.tag(node) else {
        return LayoutMode::Inline;
    };
    if dom
        .children(node)
        .any(|child| dom.tag(child).is_some_and(|name| BLOCK_ELEMENTS.contains(&name)))
    {
        LayoutMode::Block
    } else if dom.children(node).next().is_some() || tag == "input" {
        LayoutMode::Inline
    } else {
        LayoutMode::Block
    }
}

pub fn is_rendered(dom: &DOM, node: NodeId) -> bool {
    dom.tag(node)
        .is_none_or(|tag| !NON_RENDERED.contains(&tag))
}

pub(crate) struct LayoutContext<'doc> {
    pub dom: &'doc DOM,
    pub fonts: &'doc FontCache,
    pub config: &'doc LayoutConfig,
}

impl LayoutContext<'_> {
    pub fn style(&self, node: NodeId) -> Result<ComputedStyle, LayoutError> {
        let map = self.dom.style(node).ok_or(LayoutError::MissingNode(node))?;
        ComputedStyle::from_style_map(map).map_err(|source| LayoutError::Style { node, source })
    }

    pub fn font(&self, style: &ComputedStyle) -> FontHandle {
        self.fonts
            .get_font(style.font_size_px, style.weight, style.slant)
    }
}

/// Lay out `node` and its subtree in a box starting at `(x, y)` with the given width.
pub(crate) fn layout_block(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    x: f32,
    y: f32,
    width: f32,
) -> Result<BlockBox, LayoutError> {
    let style = ctx.style(node)?;
    let dom = ctx.dom;
    let contents = match layout_mode(dom, node) {
        LayoutMode::Block => {
            let mut children = Vec::new();
            let mut child_y = y;
            for child in dom.children(node).filter(|child| is_rendered(dom, *child)) {
                let block = layout_block(ctx, child, x, child_y, width)?;
                child_y = block.rect.bottom();
                children.push(block);
            }
            BlockContents::Blocks(children)
        }
        LayoutMode::Inline => {
            let mut breaker = LineBreaker::new(ctx, node, x, width);
            breaker.recurse(node)?;
            BlockContents::Lines(breaker.finish(y))
        }
    };
    let height = match &contents {
        BlockContents::Blocks(children) => children.iter().map(|child| child.rect.height).sum(),
        BlockContents::Lines(lines) => lines.iter().map(|line| line.rect.height).sum(),
    };
    let replaced = dom.tag(node).is_some_and(|tag| REPLACED.contains(&tag));
    let background_color = (style.has_background() && !replaced).then_some(style.background_color);
    trace!("block {:?} at ({x}, {y}) {width}x{height}", dom.tag(node));
    Ok(BlockBox {
        rect: Rect::new(x, y, width, height),
        node,
        contents,
        background_color,
    })
}
