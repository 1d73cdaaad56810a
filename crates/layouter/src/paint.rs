//! Box tree to paint commands.

use renderer::PaintCommand;

use crate::layout_box::{BlockBox, BlockContents, DocumentBox, InlineBox, Rect};

/// Paint commands for the whole document in painting order.
pub fn paint(document: &DocumentBox) -> Vec<PaintCommand> {
    let mut commands = Vec::new();
    paint_block(&document.child, &mut commands);
    commands
}

fn paint_block(block: &BlockBox, out: &mut Vec<PaintCommand>) {
    if let Some(color) = &block.background_color {
        out.push(fill(block.rect, color));
    }
    match &block.contents {
        BlockContents::Lines(lines) => {
            for item in lines.iter().flat_map(|line| &line.items) {
                paint_inline(item, out);
            }
        }
        BlockContents::Blocks(children) => {
            for child in children {
                paint_block(child, out);
            }
        }
    }
}

fn paint_inline(item: &InlineBox, out: &mut Vec<PaintCommand>) {
    match item {
        InlineBox::Text(word) => out.push(PaintCommand::DrawText {
            x: word.rect.x,
            y: word.rect.y,
            text: word.word.clone(),
            font: word.font,
            color: word.color.clone(),
        }),
        InlineBox::Input(input) => {
            if let Some(color) = &input.background_color {
                out.push(fill(input.rect, color));
            }
            out.push(PaintCommand::DrawText {
                x: input.rect.x,
                y: input.rect.y,
                text: input.text.clone(),
                font: input.font,
                color: input.color.clone(),
            });
        }
    }
}

fn fill(rect: Rect, color: &str) -> PaintCommand {
    PaintCommand::DrawRect {
        x1: rect.x,
        y1: rect.y,
        x2: rect.right(),
        y2: rect.bottom(),
        color: color.to_owned(),
    }
}
