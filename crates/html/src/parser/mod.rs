//! Recovering tree constructor.
//!
//! The input is scanned one character at a time, alternating between text and tag
//! accumulation on `<` and `>`. Every tag and text token first goes through implicit
//! tag insertion, so the result always has the shape `html > (head, body)` no matter
//! how malformed the markup is. Parsing never fails.

mod entities;
mod tokens;

use crate::dom::{Attributes, DOM, DOMNode};
use indextree::{Arena, NodeId};
use log::{debug, trace};

pub use entities::decode_entities;
pub use tokens::parse_tag;

/// Elements that never take children and are attached without being pushed.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements that belong in `head` when they appear before any body content.
pub const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

fn is_head_tag(tag: &str) -> bool {
    HEAD_TAGS.contains(&tag)
}

/// Parse a full document. Always returns a tree rooted at `html`.
pub fn parse_html(markup: &str) -> DOM {
    let mut parser = HTMLParser::new();
    parser.feed(markup);
    parser.finish()
}

/// Parse `markup` as the content of a `body` element.
///
/// Returns the parsed document and the `body` node whose children are the fragment.
pub fn parse_fragment(markup: &str) -> (DOM, NodeId) {
    let dom = parse_html(&format!("<html><body>{markup}</body></html>"));
    let body = dom.child_element(dom.root(), "body").unwrap_or_else(|| dom.root());
    (dom, body)
}

/// Token the implicit-tag rules look at: an open/close tag name or a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Next<'a> {
    Open(&'a str),
    Close(&'a str),
    Text,
}

impl Next<'_> {
    fn is_open(&self, name: &str) -> bool {
        matches!(self, Next::Open(tag) if *tag == name)
    }

    fn is_close(&self, name: &str) -> bool {
        matches!(self, Next::Close(tag) if *tag == name)
    }

    fn is_head_only(&self) -> bool {
        matches!(self, Next::Open(tag) if is_head_tag(tag))
    }
}

pub struct HTMLParser {
    arena: Arena<DOMNode>,
    /// Open elements, outermost first.
    unfinished: Vec<NodeId>,
    root: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
    buffer: String,
    in_tag: bool,
}

impl HTMLParser {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            unfinished: Vec::new(),
            root: None,
            head: None,
            body: None,
            buffer: String::new(),
            in_tag: false,
        }
    }

    /// Scan a chunk of markup. May be called repeatedly before [`Self::finish`].
    pub fn feed(&mut self, markup: &str) {
        for ch in markup.chars() {
            match ch {
                '<' => {
                    // A second `<` inside a tag turns the partial tag into text.
                    if !self.buffer.is_empty() {
                        let text = core::mem::take(&mut self.buffer);
                        self.add_text(&text);
                    }
                    self.in_tag = true;
                }
                '>' if self.in_tag => {
                    self.in_tag = false;
                    let tag = core::mem::take(&mut self.buffer);
                    self.add_tag(&tag);
                }
                _ => self.buffer.push(ch),
            }
        }
    }

    /// Flush trailing text, close every open element and return the document.
    pub fn finish(mut self) -> DOM {
        if !self.in_tag && !self.buffer.is_empty() {
            let text = core::mem::take(&mut self.buffer);
            self.add_text(&text);
        }
        // Children are attached when opened, so closing is just unwinding.
        self.unfinished.truncate(1);
        let root = match self.root {
            Some(root) => root,
            None => self.open_root(Attributes::new()),
        };
        debug!("parsed document with {} nodes", self.arena.count());
        DOM::from_parts(self.arena, root)
    }

    fn top(&self) -> Option<NodeId> {
        self.unfinished.last().copied()
    }

    fn open_tags(&self) -> Vec<&str> {
        self.unfinished
            .iter()
            .filter_map(|id| self.arena.get(*id).and_then(|node| node.get().tag()))
            .collect()
    }

    fn add_text(&mut self, text: &str) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags(Next::Text);
        let Some(parent) = self.top() else {
            return;
        };
        let decoded = decode_entities(text);
        trace!("text {decoded:?}");
        let node = self.arena.new_node(DOMNode::text(decoded));
        parent.append(node, &mut self.arena);
    }

    fn add_tag(&mut self, raw: &str) {
        if raw.starts_with('!') {
            return;
        }
        let Some((tag, attrs)) = parse_tag(raw) else {
            return;
        };
        if let Some(name) = tag.strip_prefix('/') {
            self.implicit_tags(Next::Close(name));
            self.close_tag();
        } else {
            self.implicit_tags(Next::Open(&tag));
            self.open_tag(tag, attrs);
        }
    }

    fn close_tag(&mut self) {
        if self.unfinished.len() <= 1 {
            return;
        }
        if let Some(node) = self.unfinished.pop() {
            trace!("close {:?}", self.arena.get(node).and_then(|n| n.get().tag()));
        }
    }

    fn open_tag(&mut self, tag: String, attrs: Attributes) {
        match tag.as_str() {
            "html" => {
                if self.unfinished.is_empty() {
                    self.open_root(attrs);
                } else if let Some(root) = self.root {
                    self.merge_attributes(root, attrs);
                }
                return;
            }
            "head" => {
                if self.open_tags() == ["html"] && self.head.is_none() && self.body.is_none() {
                    self.head = Some(self.push_element(tag, attrs));
                }
                return;
            }
            "body" => {
                if self.open_tags() == ["html"] {
                    if let Some(body) = self.body {
                        self.merge_attributes(body, attrs);
                        self.unfinished.push(body);
                    } else {
                        self.body = Some(self.push_element(tag, attrs));
                    }
                }
                return;
            }
            _ => {}
        }
        if is_self_closing(&tag) {
            if let Some(parent) = self.top() {
                trace!("void <{tag}>");
                let node = self.arena.new_node(DOMNode::element(tag, attrs));
                parent.append(node, &mut self.arena);
            }
            return;
        }
        self.push_element(tag, attrs);
    }

    /// Create an element under the current top and make it the new top.
    fn push_element(&mut self, tag: String, attrs: Attributes) -> NodeId {
        trace!("open <{tag}>");
        let node = self.arena.new_node(DOMNode::element(tag, attrs));
        if let Some(parent) = self.top() {
            parent.append(node, &mut self.arena);
        }
        self.unfinished.push(node);
        node
    }

    fn open_root(&mut self, attrs: Attributes) -> NodeId {
        let root = self.arena.new_node(DOMNode::element("html", attrs));
        self.root = Some(root);
        self.unfinished.push(root);
        root
    }

    fn merge_attributes(&mut self, node: NodeId, attrs: Attributes) {
        let Some(entry) = self.arena.get_mut(node) else {
            return;
        };
        if let crate::dom::NodeKind::Element { attrs: existing, .. } = &mut entry.get_mut().kind {
            for (key, value) in attrs {
                if !existing.iter().any(|(name, _)| *name == key) {
                    existing.push((key, value));
                }
            }
        }
    }

    /// Insert the `html`, `head` and `body` tags the markup left out.
    fn implicit_tags(&mut self, next: Next<'_>) {
        loop {
            let open = self.open_tags();
            if open.is_empty() {
                if next.is_open("html") {
                    break;
                }
                self.open_root(Attributes::new());
            } else if open == ["html"]
                && !next.is_open("head")
                && !next.is_open("body")
                && !next.is_close("html")
            {
                if let Some(body) = self.body {
                    self.unfinished.push(body);
                } else if next.is_head_only() {
                    if let Some(head) = self.head {
                        self.unfinished.push(head);
                    } else {
                        self.head = Some(self.push_element("head".to_owned(), Attributes::new()));
                    }
                } else {
                    self.body = Some(self.push_element("body".to_owned(), Attributes::new()));
                }
            } else if open == ["html", "head"] && !next.is_close("head") && !next.is_head_only() {
                self.unfinished.pop();
            } else {
                break;
            }
        }
    }
}

impl Default for HTMLParser {
    fn default() -> Self {
        Self::new()
    }
}
