use core::fmt;

use super::{DOM, DOMNode, NodeKind};
use indextree::NodeId;

use serde_json::{Map, Value, json};

fn sorted_attrs(node: &DOMNode) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = match &node.kind {
        NodeKind::Element { attrs, .. } => attrs.iter().cloned().collect(),
        NodeKind::Text { .. } => Vec::new(),
    };
    pairs.sort_by(|left, right| left.0.cmp(&right.0));
    pairs
}

fn node_to_json(dom: &DOM, id: NodeId) -> Value {
    let Some(node) = dom.get(id) else {
        return Value::Null;
    };
    match &node.kind {
        NodeKind::Element { tag, .. } => {
            let mut attrs_obj = Map::new();
            for (key, value) in sorted_attrs(node) {
                attrs_obj.insert(key, Value::String(value));
            }
            let children: Vec<Value> = dom
                .children(id)
                .map(|child| node_to_json(dom, child))
                .filter(|value| !value.is_null())
                .collect();
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": children,
            })
        }
        NodeKind::Text { text } => json!({ "type": "text", "text": text }),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn write_html(dom: &DOM, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };
    match &node.kind {
        NodeKind::Text { text } => out.push_str(&escape_text(text)),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attrs.iter() {
                out.push(' ');
                out.push_str(key);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');
            if crate::parser::is_self_closing(tag) {
                return;
            }
            for child in dom.children(id) {
                write_html(dom, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

impl fmt::Debug for DOM {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_node(
            dom: &DOM,
            id: NodeId,
            formatter: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            let Some(node) = dom.get(id) else {
                return Ok(());
            };
            write!(formatter, "{:width$}", "", width = depth * 2)?;
            match &node.kind {
                NodeKind::Element { tag, .. } => {
                    write!(formatter, "<{tag}")?;
                    for (key, value) in sorted_attrs(node) {
                        write!(formatter, " {key}={value:?}")?;
                    }
                    writeln!(formatter, ">")?;
                }
                NodeKind::Text { text } => writeln!(formatter, "{text:?}")?,
            }
            for child in dom.children(id) {
                fmt_node(dom, child, formatter, depth + 1)?;
            }
            Ok(())
        }

        writeln!(formatter, "DOM")?;
        fmt_node(self, self.root(), formatter, 0)
    }
}

impl DOM {
    /// Build a deterministic JSON representation of the document.
    /// Schema:
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root())
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }

    /// Serialize the subtree at `id` back to markup. Attributes keep source order.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        write_html(self, id, &mut out);
        out
    }

    /// Serialize the children of `id`, the `innerHTML` of an element.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            write_html(self, child, &mut out);
        }
        out
    }
}
