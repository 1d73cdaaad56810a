//! Subresources referenced by a parsed document.

use html::{DOM, NodeId};

/// Where one author stylesheet comes from, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// `<link rel=stylesheet href=...>`, href as written.
    Linked(String),
    /// Text of a `<style>` element.
    Inline(String),
}

pub fn stylesheet_sources(dom: &DOM) -> Vec<StyleSource> {
    dom.elements()
        .filter_map(|node| match dom.tag(node)? {
            "link" if dom.attribute(node, "rel") == Some("stylesheet") => dom
                .attribute(node, "href")
                .map(|href| StyleSource::Linked(href.to_owned())),
            "style" => Some(StyleSource::Inline(text_content(dom, node))),
            _ => None,
        })
        .collect()
}

/// `src` of every `<script>` in document order. Inline scripts are not run.
pub fn script_sources(dom: &DOM) -> Vec<String> {
    dom.elements()
        .filter(|node| dom.tag(*node) == Some("script"))
        .filter_map(|node| dom.attribute(node, "src").map(str::to_owned))
        .collect()
}

fn text_content(dom: &DOM, node: NodeId) -> String {
    dom.descendants(node)
        .filter_map(|child| dom.text(child))
        .collect()
}
