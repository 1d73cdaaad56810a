//! Box tree produced by layout.
//!
//! Block boxes hold either child blocks or lines, never both. Lines hold atomic
//! inline items. Every box remembers the node it was generated for.

use html::NodeId;
use serde::{Deserialize, Serialize};
use text::FontHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the left and top edges are inside, the right and bottom are not.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.x <= px && px < self.x + self.width && self.y <= py && py < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBox {
    pub rect: Rect,
    pub node: NodeId,
    pub child: BlockBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockBox {
    pub rect: Rect,
    pub node: NodeId,
    pub contents: BlockContents,
    /// Painted behind the box when set.
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContents {
    Blocks(Vec<BlockBox>),
    Lines(Vec<LineBox>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub rect: Rect,
    /// The block whose inline content this line holds.
    pub node: NodeId,
    pub items: Vec<InlineBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InlineBox {
    Text(TextBox),
    Input(InputBox),
}

/// One word.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub node: NodeId,
    pub word: String,
    pub font: FontHandle,
    pub color: String,
}

/// An `input` or `button`, laid out as a fixed-width atom.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBox {
    pub rect: Rect,
    pub node: NodeId,
    /// Text drawn inside the box: the input's value or the button's label.
    pub text: String,
    pub font: FontHandle,
    pub color: String,
    pub background_color: Option<String>,
}

impl InlineBox {
    pub const fn rect(&self) -> Rect {
        match self {
            Self::Text(text) => text.rect,
            Self::Input(input) => input.rect,
        }
    }

    pub fn rect_mut(&mut self) -> &mut Rect {
        match self {
            Self::Text(text) => &mut text.rect,
            Self::Input(input) => &mut input.rect,
        }
    }

    pub const fn font(&self) -> &FontHandle {
        match self {
            Self::Text(text) => &text.font,
            Self::Input(input) => &input.font,
        }
    }

    pub const fn node(&self) -> NodeId {
        match self {
            Self::Text(text) => text.node,
            Self::Input(input) => input.node,
        }
    }
}

impl BlockBox {
    pub fn blocks(&self) -> &[Self] {
        match &self.contents {
            BlockContents::Blocks(blocks) => blocks,
            BlockContents::Lines(_) => &[],
        }
    }

    pub fn lines(&self) -> &[LineBox] {
        match &self.contents {
            BlockContents::Lines(lines) => lines,
            BlockContents::Blocks(_) => &[],
        }
    }
}

/// Borrowed view of any box in the tree.
#[derive(Debug, Clone, Copy)]
pub enum BoxRef<'tree> {
    Document(&'tree DocumentBox),
    Block(&'tree BlockBox),
    Line(&'tree LineBox),
    Inline(&'tree InlineBox),
}

impl BoxRef<'_> {
    pub const fn rect(&self) -> Rect {
        match self {
            Self::Document(document) => document.rect,
            Self::Block(block) => block.rect,
            Self::Line(line) => line.rect,
            Self::Inline(item) => item.rect(),
        }
    }

    pub const fn node(&self) -> NodeId {
        match self {
            Self::Document(document) => document.node,
            Self::Block(block) => block.node,
            Self::Line(line) => line.node,
            Self::Inline(item) => item.node(),
        }
    }
}

impl DocumentBox {
    /// Every box in pre-order, the document first.
    pub fn boxes(&self) -> Vec<BoxRef<'_>> {
        fn visit<'tree>(block: &'tree BlockBox, out: &mut Vec<BoxRef<'tree>>) {
            out.push(BoxRef::Block(block));
            match &block.contents {
                BlockContents::Blocks(children) => {
                    for child in children {
                        visit(child, out);
                    }
                }
                BlockContents::Lines(lines) => {
                    for line in lines {
                        out.push(BoxRef::Line(line));
                        out.extend(line.items.iter().map(BoxRef::Inline));
                    }
                }
            }
        }

        let mut out = vec![BoxRef::Document(self)];
        visit(&self.child, &mut out);
        out
    }
}
