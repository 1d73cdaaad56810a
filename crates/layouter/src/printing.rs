use std::fmt;

use serde_json::{Value, json};

use crate::layout_box::{BlockBox, BlockContents, DocumentBox, InlineBox, LineBox, Rect};

fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        formatter.write_str("  ")?;
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

impl fmt::Display for Rect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Indented box tree, one box per line.
impl fmt::Display for DocumentBox {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "#document {}", self.rect)?;
        fmt_block(&self.child, formatter, 1)
    }
}

fn fmt_block(block: &BlockBox, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write_indent(formatter, depth)?;
    write!(formatter, "block {}", block.rect)?;
    if let Some(color) = &block.background_color {
        write!(formatter, " background={color}")?;
    }
    writeln!(formatter)?;
    match &block.contents {
        BlockContents::Blocks(children) => {
            for child in children {
                fmt_block(child, formatter, depth + 1)?;
            }
        }
        BlockContents::Lines(lines) => {
            for line in lines {
                fmt_line(line, formatter, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn fmt_line(line: &LineBox, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write_indent(formatter, depth)?;
    writeln!(formatter, "line {}", line.rect)?;
    for item in &line.items {
        write_indent(formatter, depth + 1)?;
        match item {
            InlineBox::Text(word) => {
                writeln!(formatter, "\"{}\" {}", escape_text(&word.word), word.rect)?;
            }
            InlineBox::Input(input) => {
                writeln!(formatter, "input \"{}\" {}", escape_text(&input.text), input.rect)?;
            }
        }
    }
    Ok(())
}

fn rect_json(rect: Rect) -> Value {
    json!([rect.x, rect.y, rect.width, rect.height])
}

fn block_json(block: &BlockBox) -> Value {
    match &block.contents {
        BlockContents::Blocks(children) => json!({
            "rect": rect_json(block.rect),
            "background": block.background_color,
            "blocks": children.iter().map(block_json).collect::<Vec<_>>(),
        }),
        BlockContents::Lines(lines) => json!({
            "rect": rect_json(block.rect),
            "background": block.background_color,
            "lines": lines.iter().map(line_json).collect::<Vec<_>>(),
        }),
    }
}

fn line_json(line: &LineBox) -> Value {
    let items: Vec<Value> = line
        .items
        .iter()
        .map(|item| match item {
            InlineBox::Text(word) => json!({
                "text": word.word,
                "rect": rect_json(word.rect),
                "size": word.font.descriptor.size_px,
                "color": word.color,
            }),
            InlineBox::Input(input) => json!({
                "input": input.text,
                "rect": rect_json(input.rect),
                "background": input.background_color,
            }),
        })
        .collect();
    json!({ "rect": rect_json(line.rect), "items": items })
}

impl DocumentBox {
    /// Deterministic snapshot of the box tree, node ids left out.
    pub fn to_json_value(&self) -> Value {
        json!({
            "rect": rect_json(self.rect),
            "child": block_json(&self.child),
        })
    }
}
