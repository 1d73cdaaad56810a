//! Inline layout: greedy line breaking of words and replaced elements.

use html::{DOM, NodeId};
use log::{debug, trace};
use style_engine::ComputedStyle;
use text::FontHandle;

use crate::block::{LayoutContext, NON_RENDERED};
use crate::error::LayoutError;
use crate::layout_box::{InlineBox, InputBox, LineBox, Rect, TextBox};

/// Line height and baseline placement factor.
pub const LEADING: f32 = 1.25;

pub(crate) struct LineBreaker<'ctx, 'doc> {
    ctx: &'ctx LayoutContext<'doc>,
    block: NodeId,
    x: f32,
    width: f32,
    cursor: f32,
    /// Never empty; the last entry is the line being filled.
    lines: Vec<Vec<InlineBox>>,
}

impl<'ctx, 'doc> LineBreaker<'ctx, 'doc> {
    pub fn new(ctx: &'ctx LayoutContext<'doc>, block: NodeId, x: f32, width: f32) -> Self {
        Self {
            ctx,
            block,
            x,
            width,
            cursor: 0.0,
            lines: vec![Vec::new()],
        }
    }

    /// Walk `node` in document order, placing every word and replaced element.
    pub fn recurse(&mut self, node: NodeId) -> Result<(), LayoutError> {
        let dom = self.ctx.dom;
        if let Some(text) = dom.text(node) {
            let style = self.ctx.style(node)?;
            let font = self.ctx.font(&style);
            for word in text.split_whitespace() {
                self.word(node, word, &style, font);
            }
            return Ok(());
        }
        match dom.tag(node) {
            Some("br") => self.new_line(),
            Some("input" | "button") => self.input(node)?,
            Some(tag) if NON_RENDERED.contains(&tag) => {}
            _ => {
                for child in dom.children(node) {
                    self.recurse(child)?;
                }
            }
        }
        Ok(())
    }

    fn new_line(&mut self) {
        self.cursor = 0.0;
        self.lines.push(Vec::new());
    }

    fn current_line_is_empty(&self) -> bool {
        self.lines.last().is_none_or(Vec::is_empty)
    }

    /// A non-empty line is closed when the next item would overflow it.
    fn break_if_needed(&mut self, width: f32) {
        if self.cursor + width > self.width && !self.current_line_is_empty() {
            self.new_line();
        }
    }

    /// `x` for the next item: chained from the previous item on the line.
    fn next_x(&self) -> f32 {
        match self.lines.last().and_then(|line| line.last()) {
            Some(previous) => {
                previous.rect().right() + self.ctx.fonts.space_width(previous.font())
            }
            None => self.x,
        }
    }

    fn place(&mut self, item: InlineBox, advance: f32) {
        if let Some(line) = self.lines.last_mut() {
            line.push(item);
        } else {
            self.lines.push(vec![item]);
        }
        self.cursor += advance;
    }

    fn word(&mut self, node: NodeId, word: &str, style: &ComputedStyle, font: FontHandle) {
        let width = self.ctx.fonts.measure(&font, word);
        self.break_if_needed(width);
        let x = self.next_x();
        trace!("word {word:?} at x={x} width={width}");
        let item = InlineBox::Text(TextBox {
            rect: Rect::new(x, 0.0, width, font.metrics.linespace),
            node,
            word: word.to_owned(),
            font,
            color: style.color.clone(),
        });
        self.place(item, width + self.ctx.fonts.space_width(&font));
    }

    fn input(&mut self, node: NodeId) -> Result<(), LayoutError> {
        let style = self.ctx.style(node)?;
        let font = self.ctx.font(&style);
        let width = self.ctx.config.input_width;
        self.break_if_needed(width);
        let x = self.next_x();
        let item = InlineBox::Input(InputBox {
            rect: Rect::new(x, 0.0, width, font.metrics.linespace),
            node,
            text: replaced_text(self.ctx.dom, node),
            font,
            background_color: style.has_background().then(|| style.background_color.clone()),
            color: style.color,
        });
        self.place(item, width + self.ctx.fonts.space_width(&font));
        Ok(())
    }

    /// Stack the collected lines from `y` down and fix every item's vertical position.
    pub fn finish(self, y: f32) -> Vec<LineBox> {
        let mut line_y = y;
        self.lines
            .into_iter()
            .map(|mut items| {
                let height = position_line(&mut items, line_y);
                let line = LineBox {
                    rect: Rect::new(self.x, line_y, self.width, height),
                    node: self.block,
                    items,
                };
                line_y += height;
                line
            })
            .collect()
    }
}

/// Align items on a shared baseline. Returns the line height; empty lines are 0 high.
fn position_line(items: &mut [InlineBox], y: f32) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let max_ascent = items
        .iter()
        .map(|item| item.font().metrics.ascent)
        .fold(0.0, f32::max);
    let max_descent = items
        .iter()
        .map(|item| item.font().metrics.descent)
        .fold(0.0, f32::max);
    let baseline = y + LEADING * max_ascent;
    for item in items.iter_mut() {
        let ascent = item.font().metrics.ascent;
        item.rect_mut().y = baseline - ascent;
    }
    LEADING * (max_ascent + max_descent)
}

/// The value of an `input`, or the label of a `button` with a single text child.
fn replaced_text(dom: &DOM, node: NodeId) -> String {
    if dom.tag(node) == Some("input") {
        return dom.attribute(node, "value").unwrap_or_default().to_owned();
    }
    let mut children = dom.children(node);
    match (children.next(), children.next()) {
        (Some(only), None) if dom.text(only).is_some() => {
            dom.text(only).unwrap_or_default().to_owned()
        }
        (None, _) => String::new(),
        _ => {
            debug!("button with markup inside renders empty");
            String::new()
        }
    }
}
